//! Control surface: keyboard and mouse input mapped to commands
//!
//! Widgets carry a `Command` instead of a callback, and the loop applies it
//! to the simulation context it owns.

use crate::sim::Simulation;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use crossterm::style::Color;
use rand::Rng;

/// Rows reserved at the bottom of the screen for the footer
pub const FOOTER_HEIGHT: u16 = 1;

const BUTTON_WIDTH: u16 = 10;
const BUTTON_GAP: u16 = 1;
const BUTTON_COLOR: Color = Color::Grey;
const HOVER_COLOR: Color = Color::White;
const STATUS_COLOR: Color = Color::DarkGrey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Randomize,
    TogglePause,
    Step,
    Clear,
    Faster,
    Slower,
    NextPalette,
    Help,
    Quit,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('r') => Some(Command::Randomize),
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(Command::TogglePause),
            KeyCode::Char('s') | KeyCode::Char('.') => Some(Command::Step),
            KeyCode::Char('c') => Some(Command::Clear),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::Faster),
            KeyCode::Char('-') => Some(Command::Slower),
            KeyCode::Char('g') => Some(Command::NextPalette),
            KeyCode::Char('?') => Some(Command::Help),
            _ => None,
        }
    }

    /// Apply a command that only touches the simulation.
    /// Returns false for commands the loop handles itself.
    pub fn apply<R: Rng + ?Sized>(self, sim: &mut Simulation, rng: &mut R) -> bool {
        match self {
            Command::Randomize => sim.randomize(rng),
            Command::TogglePause => sim.toggle_pause(),
            Command::Step => {
                sim.step_once();
            }
            Command::Clear => sim.clear(),
            _ => return false,
        }
        true
    }
}

/// Clickable footer button
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub command: Command,
}

impl Button {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.y && col >= self.x && col < self.x + self.width
    }

    pub fn label(&self, sim: &Simulation) -> &'static str {
        match self.command {
            Command::Randomize => "RANDOM",
            Command::TogglePause if sim.is_paused() => "RESUME",
            Command::TogglePause => "PAUSE",
            Command::Step => "STEP",
            Command::Clear => "CLEAR",
            _ => "",
        }
    }

    pub fn draw(&self, term: &mut Terminal, sim: &Simulation, hovered: bool) {
        let color = if hovered { HOVER_COLOR } else { BUTTON_COLOR };
        let inner = (self.width as usize).saturating_sub(2);
        let text = format!("[{:^inner$}]", self.label(sim), inner = inner);
        term.set_str(self.x as i32, self.y as i32, &text, Some(color), hovered);
    }
}

/// Status line with buttons and a readout
pub struct Footer {
    buttons: Vec<Button>,
    hover: Option<usize>,
    row: u16,
}

impl Footer {
    /// Lay out the buttons on the last terminal row
    pub fn new(term_height: u16) -> Self {
        let row = term_height.saturating_sub(FOOTER_HEIGHT);
        let buttons = [Command::Randomize, Command::TogglePause, Command::Step, Command::Clear]
            .into_iter()
            .enumerate()
            .map(|(i, command)| Button {
                x: i as u16 * (BUTTON_WIDTH + BUTTON_GAP),
                y: row,
                width: BUTTON_WIDTH,
                command,
            })
            .collect();
        Self { buttons, hover: None, row }
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    #[cfg(test)]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    fn button_at(&self, col: u16, row: u16) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains(col, row))
    }

    /// Track hover and map left clicks to button commands
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> Option<Command> {
        self.hover = self.button_at(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.hover.map(|i| self.buttons[i].command),
            _ => None,
        }
    }

    pub fn draw(&self, term: &mut Terminal, sim: &Simulation, status: &str) {
        for (i, button) in self.buttons.iter().enumerate() {
            button.draw(term, sim, self.hover == Some(i));
        }
        let x = self.buttons.last().map(|b| b.x + b.width + BUTTON_GAP * 2).unwrap_or(0);
        term.set_str(x as i32, self.row as i32, status, Some(STATUS_COLOR), false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Policy;
    use crossterm::event::KeyModifiers;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(Command::from_key(KeyCode::Char(' ')), Some(Command::TogglePause));
        assert_eq!(Command::from_key(KeyCode::Char('r')), Some(Command::Randomize));
        assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::Char('z')), None);
    }

    #[test]
    fn apply_dispatches_core_commands() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sim = Simulation::new(10, 10, Policy::Decay, 5).unwrap();
        assert!(Command::TogglePause.apply(&mut sim, &mut rng));
        assert!(sim.is_paused());
        assert!(Command::Step.apply(&mut sim, &mut rng));
        assert_eq!(sim.generation(), 1);
        assert!(Command::Randomize.apply(&mut sim, &mut rng));
        assert_eq!(sim.generation(), 0);
        assert!(!Command::Quit.apply(&mut sim, &mut rng));
    }

    #[test]
    fn click_hits_button() {
        let mut footer = Footer::new(24);
        assert_eq!(footer.row(), 23);
        let pause = &footer.buttons()[1];
        let (x, y) = (pause.x + 2, pause.y);
        assert_eq!(
            footer.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), x, y)),
            Some(Command::TogglePause)
        );
        assert_eq!(footer.handle_mouse(&mouse(MouseEventKind::Moved, x, y)), None);
        assert_eq!(footer.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), x, 0)), None);
    }

    #[test]
    fn pause_label_follows_state() {
        let mut sim = Simulation::new(4, 4, Policy::Plain, 1).unwrap();
        let footer = Footer::new(10);
        let pause = &footer.buttons()[1];
        assert_eq!(pause.label(&sim), "PAUSE");
        sim.toggle_pause();
        assert_eq!(pause.label(&sim), "RESUME");
    }

    #[test]
    fn footer_draws_labels() {
        let sim = Simulation::new(4, 4, Policy::Plain, 1).unwrap();
        let footer = Footer::new(3);
        let mut term = Terminal::headless(80, 3);
        footer.draw(&mut term, &sim, "gen 0");
        let line: String = (0..10).map(|x| term.cell(x, 2).ch).collect();
        assert_eq!(line, "[ RANDOM ]");
    }
}
