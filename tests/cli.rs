use std::io::Write;
use std::process::{Command, Stdio};

fn run(input: &[u8], args: &[&str]) -> (String, bool) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chessgraph"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start binary");

    let stdin = child.stdin.as_mut().expect("Failed to open stdin");
    stdin.write_all(input).expect("Failed to write to stdin");
    stdin.flush().expect("Failed to flush stdin");

    let output = child.wait_with_output().expect("Failed to read output");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_move_then_fen() {
    let (stdout, success) = run(b"e2e4\nfen\nhistory\nquit\n", &[]);

    assert!(success);
    assert!(stdout.contains("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1"));
    assert!(stdout.contains("e2-e4"));
}

#[test]
fn test_illegal_move_is_reported() {
    let (stdout, success) = run(b"e2e5\nturn\n", &[]);

    // end of input quits
    assert!(success);
    assert!(stdout.contains("e2 cannot move to e5"));
    assert!(stdout.lines().any(|line| line == "white"));
}

#[test]
fn test_bad_fen_fails() {
    let (_, success) = run(b"quit\n", &["--fen", "8/8/8 w - - 0 1"]);

    assert!(!success);
}

#[test]
fn test_seeded_opponent_answers() {
    let (stdout, success) = run(
        b"e2e4\nfen\nquit\n",
        &["--opponent", "black", "--seed", "3"],
    );

    assert!(success);
    // after the opponent's reply it is white's turn again
    assert!(stdout.lines().any(|line| line.ends_with(" w - - 0 2") || line.ends_with(" w - - 1 2")));
}

#[test]
fn test_seed_option_reseeds_the_opponent() {
    let input = b"set seed = 11\ne2e4\nfen\nquit\n";
    let (first, _) = run(input, &["--opponent", "black", "--seed", "1"]);
    let (second, _) = run(input, &["--opponent", "black", "--seed", "2"]);

    let fen = |stdout: &str| {
        stdout
            .lines()
            .find(|line| line.contains(" w - - "))
            .map(|line| line.to_string())
    };

    assert!(fen(&first).is_some());
    assert_eq!(fen(&first), fen(&second));
}
