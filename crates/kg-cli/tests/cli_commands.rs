//! Integration tests for the kg CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const JP: &str = r#"{
    "10000": {
        "Name": "Hoshino", "FamilyName": "Takanashi", "School": "Abydos",
        "StarGrade": 3, "CharacterAge": "17", "TacticRole": "Tanker",
        "WeaponType": "SG", "BulletType": "Pierce", "ArmorType": "HeavyArmor",
        "CharHeightMetric": "145cm", "Hobby": "Napping",
        "IsReleased": [true, true, true]
    }
}"#;

const UNIFIED: &str = r#"[
    {"Id": 1, "Name": "Hoshino", "FamilyName": "Takanashi", "School": "Abydos",
     "StarGrade": 3, "IsReleased": [true, true, true]},
    {"Id": 2, "Name": "Mika", "FamilyName": "Misono", "School": "Trinity",
     "StarGrade": 4, "IsReleased": [true, false, false]}
]"#;

/// Create a temp directory with one roster file per server.
fn test_data() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("students_jp.json"), JP).unwrap();
    fs::write(dir.path().join("students_gl.json"), JP).unwrap();
    fs::write(dir.path().join("students_cn.json"), "{}").unwrap();
    dir
}

fn kg() -> Command {
    Command::cargo_bin("kg").unwrap()
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_wins_with_single_student() {
    let dir = test_data();
    let state = dir.path().join("state.json");

    kg().args(["play", "-d", path(dir.path()), "--state", path(&state)])
        .write_stdin("Hoshino\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Kivotos Guessr")
                .and(predicate::str::contains("Correct! It was TakanashiHoshino."))
                .and(predicate::str::contains("Goodbye!")),
        );

    let saved = fs::read_to_string(&state).unwrap();
    assert!(saved.contains("baGuessr_gamesWon"));
}

#[test]
fn play_unknown_name_suggests() {
    let dir = test_data();
    let state = dir.path().join("state.json");

    kg().args(["play", "-d", path(dir.path()), "--state", path(&state)])
        .write_stdin("guess Takana\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Did you mean: TakanashiHoshino?"));
}

#[test]
fn play_empty_server_reports_error() {
    let dir = test_data();
    let state = dir.path().join("state.json");

    kg().args([
        "play",
        "-d",
        path(dir.path()),
        "--region",
        "cn",
        "--state",
        path(&state),
    ])
    .write_stdin("quit\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("No students are released on CN"));
}

#[test]
fn play_missing_data_reports_error() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");

    kg().args(["play", "-d", path(dir.path()), "--state", path(&state)])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not load JP server data"));
}

#[test]
fn play_rejects_unknown_region() {
    let dir = test_data();
    let state = dir.path().join("state.json");

    kg().args([
        "play",
        "-d",
        path(dir.path()),
        "--region",
        "kr",
        "--state",
        path(&state),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("kr"));
}

// ---------------------------------------------------------------------------
// roster
// ---------------------------------------------------------------------------

#[test]
fn roster_lists_students() {
    let dir = test_data();
    kg().args(["roster", "-d", path(dir.path())])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("TakanashiHoshino")
                .and(predicate::str::contains("Abydos"))
                .and(predicate::str::contains("1 students available on JP")),
        );
}

#[test]
fn roster_filters_unified_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("students.json");
    fs::write(&file, UNIFIED).unwrap();

    kg().args(["roster", "--unified", path(&file), "-r", "gl"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1 students available on GL (2 in roster)")
                .and(predicate::str::contains("MisonoMika").not()),
        );
}

#[test]
fn roster_empty_server() {
    let dir = test_data();
    kg().args(["roster", "-d", path(dir.path()), "-r", "cn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No students are released"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_data() {
    let dir = test_data();
    kg().args(["check", "-d", path(dir.path())])
        .assert()
        .success()
        .stdout(predicate::str::contains("All roster data is valid."));
}

#[test]
fn check_fails_on_malformed_record() {
    let dir = test_data();
    fs::write(
        dir.path().join("students_gl.json"),
        r#"{"1": {"Name": "Aru", "IsReleased": [true, false]}}"#,
    )
    .unwrap();

    kg().args(["check", "-d", path(dir.path())])
        .assert()
        .failure()
        .stdout(predicate::str::contains("GL server data"))
        .stderr(predicate::str::contains("data check failed"));
}

// ---------------------------------------------------------------------------
// settings
// ---------------------------------------------------------------------------

#[test]
fn settings_shows_defaults() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");

    kg().args(["settings", "--state", path(&state)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Max guesses: 8")
                .and(predicate::str::contains("Hints:       on"))
                .and(predicate::str::contains("Server:      jp")),
        );
}

#[test]
fn settings_persist_between_runs() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");

    kg().args([
        "settings",
        "--state",
        path(&state),
        "--max-guesses",
        "12",
        "--hints",
        "off",
        "--region",
        "gl",
        "--theme",
        "dark",
    ])
    .assert()
    .success();

    kg().args(["settings", "--state", path(&state)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Max guesses: 12")
                .and(predicate::str::contains("Hints:       off"))
                .and(predicate::str::contains("Server:      gl"))
                .and(predicate::str::contains("showing dark")),
        );
}

#[test]
fn settings_accepts_hand_edited_numbers() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    fs::write(&state, r#"{"baGuessr_maxGuesses": 12, "baGuessr_selectedServer": "gl"}"#).unwrap();

    kg().args(["settings", "--state", path(&state)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Max guesses: 12")
                .and(predicate::str::contains("Server:      gl")),
        );
}

#[test]
fn settings_rejects_invalid_budget() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");

    kg().args([
        "settings",
        "--state",
        path(&state),
        "--max-guesses",
        "21",
        "--theme",
        "dark",
    ])
    .assert()
    .failure();

    assert!(!state.exists());
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

#[test]
fn stats_count_wins_and_reset() {
    let dir = test_data();
    let state = dir.path().join("state.json");

    kg().args(["play", "-d", path(dir.path()), "--state", path(&state)])
        .write_stdin("Hoshino\nnew\nHoshino\n")
        .assert()
        .success();

    kg().args(["stats", "--state", path(&state)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Games played: 1")
                .and(predicate::str::contains("Games won:    2")),
        );

    kg().args(["stats", "--state", path(&state), "--reset"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Statistics reset.")
                .and(predicate::str::contains("Games played: 0"))
                .and(predicate::str::contains("Win rate:     -")),
        );
}
