use crate::terminal::Terminal;
use crossterm::style::Color;

pub const HELP_TEXT: &str = "\
AFTERGLOW
space/p  Pause / resume
s  .     Step once (paused)
r        Randomize
c        Clear
+  -     Faster / slower
g        Next palette
!@#$%^   Pick palette
click    Toggle cell / press button
?        Close help
q  Esc   Quit";

/// Render a centered help overlay box with the provided text.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) {
    if help_text.is_empty() {
        return;
    }
    let (width, height) = term.size();

    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2; // 1 row padding top/bottom

    // Center the box
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    let border_color = Some(Color::White);
    let text_color = Some(Color::Grey);

    let horizontal = |term: &mut Terminal, y: usize, left: char, right: char| {
        term.set(start_x as i32, y as i32, left, border_color, false);
        for x in 1..box_width - 1 {
            term.set((start_x + x) as i32, y as i32, '─', border_color, false);
        }
        term.set((start_x + box_width - 1) as i32, y as i32, right, border_color, false);
    };

    horizontal(term, start_y, '┌', '┐');

    for (i, line) in lines.iter().enumerate() {
        let y = start_y + 1 + i;
        term.set(start_x as i32, y as i32, '│', border_color, false);

        let padding = max_width.saturating_sub(line.chars().count());
        let padded = format!(" {}{} ", line, " ".repeat(padding));
        term.set_str((start_x + 1) as i32, y as i32, &padded, text_color, i == 0);

        term.set((start_x + box_width - 1) as i32, y as i32, '│', border_color, false);
    }

    horizontal(term, start_y + box_height - 1, '└', '┘');
}
