//! Binary-level tests for `hs`

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use historystore::HistoryLog;

fn hs(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hs").expect("hs binary should build");
    cmd.arg("--dir").arg(temp.path()).arg("--file").arg("trips.json");
    cmd
}

#[test]
fn test_list_empty() {
    let temp = TempDir::new().unwrap();
    hs(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history entries"));
}

#[test]
fn test_list_shows_destinations_newest_first() {
    let temp = TempDir::new().unwrap();
    let log: HistoryLog<serde_json::Value> = HistoryLog::open(temp.path(), "trips.json").unwrap();
    log.append(json!({ "tripParameters": { "destination": "Paris" } }));
    log.append(json!({ "tripParameters": { "destination": "Tokyo" } }));

    let output = hs(&temp).arg("list").assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();

    let tokyo = text.find("Tokyo").expect("Tokyo listed");
    let paris = text.find("Paris").expect("Paris listed");
    assert!(tokyo < paris);
}

#[test]
fn test_show_and_clear() {
    let temp = TempDir::new().unwrap();
    let log: HistoryLog<serde_json::Value> = HistoryLog::open(temp.path(), "trips.json").unwrap();
    let entries = log.append(json!({ "tripParameters": { "destination": "Rome" } }));
    let id = entries[0].id.clone();

    hs(&temp)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rome"));

    hs(&temp).arg("clear").assert().success();

    hs(&temp)
        .args(["show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry not found"));
}

#[test]
fn test_path_prints_file_location() {
    let temp = TempDir::new().unwrap();
    hs(&temp)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("trips.json"));
}
