/// Smoke tests to verify the binary runs without panicking
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new("cargo")
        .arg("run")
        .arg("--")
        .args(args)
        .output()
        .expect("Failed to execute cargo run")
}

#[test]
fn binary_shows_help() {
    let output = run(&["--help"]);

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("afterglow"),
        "Help output should mention afterglow"
    );
}

#[test]
fn binary_shows_version() {
    let output = run(&["--version"]);

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = run(&["nonexistent-command"]);

    // Should fail with error, not panic
    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

#[test]
fn print_mode_renders_grid() {
    let output = run(&["print", "-n", "5", "--cols", "10", "--rows", "5", "--seed", "1", "--glyph", "#"]);

    assert!(
        output.status.success(),
        "print failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Default block is 2px: 2 columns by 1 row per cell
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains('#'));
    assert!(stdout.contains("\x1b[38;2;"));
}

#[test]
fn unknown_policy_fails_gracefully() {
    let output = run(&["print", "--policy", "sparkle"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown policy"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked at"));
}

#[test]
fn malformed_gradient_aborts_startup() {
    let path = std::env::temp_dir().join(format!("afterglow-smoke-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[[gradient]]\nposition = 0.0\ncolor = \"#ffffff\"\n\n[[gradient]]\nposition = 0.5\ncolor = \"#000000\"\n",
    )
    .expect("Failed to write temp config");

    let output = run(&["print", "--config", path.to_str().expect("utf-8 temp path")]);
    let _ = std::fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked at"));
}

#[test]
fn huge_print_grid_fails_gracefully() {
    let output = run(&["print", "--cols", "4294967296", "--rows", "4294967296"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked at"));
}
