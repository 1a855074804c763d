use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/inputs/new_stack.txt");

    cmd.assert().success().stdout(str::contains("card(2019) is at #7987"));
}

#[test]
fn part1_small_deck_example() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.args(["tests/inputs/example.txt", "--deck-size", "10", "--card", "7"]);

    cmd.assert().success().stdout(str::contains("card(7) is at #6"));
}

#[test]
fn part1_fails_when_card_not_in_deck() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.args(["tests/inputs/example.txt", "--deck-size", "10"]);

    cmd.assert()
        .failure()
        .stderr(str::contains("Card(2019) isn't in deck with 10 cards"));
}

#[test]
fn part1_skips_unknown_technique() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.args(["tests/inputs/unknown.txt", "--deck-size", "10", "--card", "0"]);

    cmd.assert().success().stdout(str::contains("card(0) is at #7"));
}

#[test]
fn part1_strict_rejects_unknown_technique() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.args(["tests/inputs/unknown.txt", "--deck-size", "10", "--strict"]);

    cmd.assert()
        .failure()
        .stderr(str::contains("shuffle wildly"))
        .stderr(str::contains("line 2"));
}

#[test]
fn part1_fails_on_missing_input() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/inputs/no_such_file.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to read shuffle techniques"));
}
