use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fieldkit() -> Command {
    Command::cargo_bin("fieldkit").unwrap()
}

/// Config pinned to 2024 so century handling does not depend on the clock.
fn pinned_config(dir: &TempDir) -> String {
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "date": { "reference_year": 2024 } }"#).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn extract_date_corrects_ocr_glyphs() {
    let dir = TempDir::new().unwrap();
    let config = pinned_config(&dir);

    fieldkit()
        .args(["--config", &config, "extract", "-t", "date", "DOB: O 1 / I 5 / 2 O 2 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"2023-01-15\""))
        .stdout(predicate::str::contains("\"type\": \"date\""));
}

#[test]
fn extract_date_moves_future_year_back() {
    let dir = TempDir::new().unwrap();
    let config = pinned_config(&dir);

    fieldkit()
        .args(["--config", &config, "extract", "-t", "date", "-f", "text", "12/25/2099"])
        .assert()
        .success()
        .stdout("1999-12-25\n");
}

#[test]
fn extract_name_from_stdin() {
    fieldkit()
        .args(["extract", "-t", "human_name", "-f", "text"])
        .write_stdin("SMITH, JOHN")
        .assert()
        .success()
        .stdout("John Smith\n");
}

#[test]
fn extract_missing_value_is_not_an_error() {
    fieldkit()
        .args(["extract", "-t", "date", "nothing to see"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": null"));
}

#[test]
fn unknown_type_fails() {
    fieldkit()
        .args(["extract", "-t", "zip_code", "12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field type: zip_code"));
}

#[test]
fn score_name() {
    fieldkit()
        .args(["score", "-t", "human_name", "-q", "John Smith", "Name: John Smith"])
        .assert()
        .success()
        .stdout("1.0000\n");
}

#[test]
fn score_single_letter_query_is_zero() {
    fieldkit()
        .args(["score", "-t", "human_name", "-q", "J. Q.", "J Q"])
        .assert()
        .success()
        .stdout("0.0000\n");
}

#[test]
fn compare_dates() {
    let dir = TempDir::new().unwrap();
    let config = pinned_config(&dir);

    fieldkit()
        .args(["--config", &config, "compare", "-t", "date", "O1/I5/2O23", "2023-01-15"])
        .assert()
        .success()
        .stdout("1.0000\n");
}

#[test]
fn batch_writes_csv() {
    let dir = TempDir::new().unwrap();
    let config = pinned_config(&dir);
    let input = dir.path().join("fields.csv");
    let output = dir.path().join("out.csv");
    fs::write(
        &input,
        "type,text\nhuman_name,\"SMITH, JOHN\"\ndate,O1/I5/2O23\nproper_noun,uniteD staTES\ndate,none\n",
    )
    .unwrap();

    fieldkit()
        .args(["--config", &config, "batch", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "type,text,value,start,end");
    assert_eq!(lines[1], "human_name,\"SMITH, JOHN\",John Smith,0,11");
    assert_eq!(lines[2], "date,O1/I5/2O23,2023-01-15,0,10");
    assert_eq!(lines[3], "proper_noun,uniteD staTES,United States,0,13");
    assert_eq!(lines[4], "date,none,,,");
}

#[test]
fn batch_rejects_unknown_type() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fields.csv");
    fs::write(&input, "type,text\nzip_code,12345\n").unwrap();

    fieldkit()
        .args(["batch", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn config_init_and_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let path_str = path.to_string_lossy().into_owned();

    fieldkit()
        .args(["--config", &path_str, "config", "init"])
        .assert()
        .success();
    assert!(Path::new(&path).exists());

    fieldkit()
        .args(["--config", &path_str, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    fieldkit()
        .args(["--config", &path_str, "config", "set", "name.min_token_len", "3"])
        .assert()
        .success();

    fieldkit()
        .args(["--config", &path_str, "config", "get", "name.min_token_len"])
        .assert()
        .success()
        .stdout("3\n");

    fieldkit()
        .args(["--config", &path_str, "config", "set", "name.min_token_len", "0"])
        .assert()
        .failure();
}

#[test]
fn config_set_rejects_sections_and_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let path_str = path.to_string_lossy().into_owned();

    fieldkit()
        .args(["--config", &path_str, "config", "set", "date", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("section"));

    fieldkit()
        .args(["--config", &path_str, "config", "set", "date.century", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    fieldkit()
        .args(["--config", &path_str, "config", "set", "date.reference_year", "1990"])
        .assert()
        .success();

    fieldkit()
        .args(["--config", &path_str, "config", "get", "date.reference_year"])
        .assert()
        .success()
        .stdout("1990\n");
}

#[test]
fn extract_apostrophe_name() {
    fieldkit()
        .args(["extract", "-t", "human_name", "-f", "text", "O'BRIEN, MARY"])
        .assert()
        .success()
        .stdout("Mary O'Brien\n");
}
