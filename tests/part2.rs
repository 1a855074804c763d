use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("tests/inputs/new_stack.txt");

    cmd.assert().success().stdout(str::contains("is #119315717512026."));
}

#[test]
fn part2_small_deck_repeats() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.args([
        "tests/inputs/new_stack.txt",
        "--deck-size",
        "10007",
        "--repeat",
        "3",
    ]);

    cmd.assert().success().stdout(str::contains("is #7986."));
}

#[test]
fn part2_repeated_cut() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.args([
        "tests/inputs/cut.txt",
        "--deck-size",
        "11",
        "--repeat",
        "5",
        "--position",
        "2",
    ]);

    cmd.assert().success().stdout(str::contains("is #6."));
}

#[test]
fn part2_rejects_tiny_deck() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.args(["tests/inputs/cut.txt", "--deck-size", "1"]);

    cmd.assert().failure();
}

#[test]
fn part2_strict_rejects_unknown_technique() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.args(["tests/inputs/unknown.txt", "--deck-size", "11", "--strict"]);

    cmd.assert().failure().stderr(str::contains("shuffle wildly"));
}
