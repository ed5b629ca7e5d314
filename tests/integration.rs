use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "rankfile";

#[test]
fn banner() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("quit\n")
            .assert()
            .success()
            .stdout(contains("rankfile ").and(contains("commit"))),
    );
}

#[test]
fn plays_a_game() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("f3\ne5\ng4\nQh4#\nfen\nquit\n")
            .assert()
            .success()
            .stdout(
                contains("Qh4#\nBlack wins by checkmate (0-1)")
                    .and(contains("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -")),
            ),
    );
}

#[test]
fn reports_bad_input() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("Ke2\nposition 8/8 w\nhello world\nperft 2\n")
            .assert()
            .success()
            .stdout(
                contains("error: illegal move")
                    .and(contains("error: parse error"))
                    .and(contains("error: unknown command: hello world"))
                    .and(contains("400")),
            ),
    );
}

#[test]
fn perft_flag() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.args(["--perft", "2"])
            .assert()
            .success()
            .stdout(contains("perft 1: nodes 20").and(contains("perft 2: nodes 400"))),
    );
}

#[test]
fn computer_plays_black() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.args([
            "--fen",
            "6k1/5ppp/8/8/8/8/r4PPP/6K1 b - - 0 1",
            "--computer",
            "b",
            "--seed",
            "7",
        ])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(contains("Ra1#\nBlack wins by checkmate (0-1)")),
    );
}

#[test]
fn invalid_fen_flag() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(cmd.args(["--fen", "8/8/8 w"]).assert().failure());
}

#[test]
fn depth_is_bounded() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(cmd.args(["--depth", "255"]).assert().failure());
}
