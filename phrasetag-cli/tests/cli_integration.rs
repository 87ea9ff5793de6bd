//! Integration tests for the phrasetag CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// `phrasetag tag` against the TSV corpus with stopwords excluded
fn tag_command() -> Command {
    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.arg("tag")
        .arg("-q")
        .arg("-c")
        .arg(fixture_path("names.tsv"))
        .args(["-x", "of", "-x", "the"]);
    cmd
}

#[test]
fn test_tag_whole_no_sub() {
    let mut cmd = tag_command();
    cmd.arg("-i").arg(fixture_path("sample.txt"));

    cmd.assert().success().stdout(
        "tests/fixtures/sample.txt\t4\t18\t3\n\
         tests/fixtures/sample.txt\t12\t34\t1\n\
         tests/fixtures/sample.txt\t45\t51\t2\n",
    );
}

#[test]
fn test_tag_all_reports_nested_names() {
    let mut cmd = tag_command();
    cmd.arg("-i")
        .arg(fixture_path("sample.txt"))
        .args(["--overlaps", "all"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sample.txt\t12\t18\t0\n"))
        .stdout(predicate::str::contains("sample.txt\t4\t18\t3\n"));
}

#[test]
fn test_exclusions_keep_stopwords_out() {
    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.arg("tag")
        .arg("-q")
        .arg("-c")
        .arg(fixture_path("names.tsv"))
        .arg("-i")
        .arg(fixture_path("sample.txt"));

    // "The" is only tagged when nothing excludes it
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sample.txt\t0\t3\t5\n"));

    let mut cmd = tag_command();
    cmd.arg("-i").arg(fixture_path("sample.txt"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\t0\t3\t").not());
}

#[test]
fn test_character_offsets_and_match_text() {
    let mut cmd = tag_command();
    cmd.arg("-i")
        .arg(fixture_path("zurich.txt"))
        .arg("--match-text");

    cmd.assert().success().stdout(
        "tests/fixtures/zurich.txt\t0\t6\t6\tZürich\n\
         tests/fixtures/zurich.txt\t13\t19\t0\tLondon\n",
    );
}

#[test]
fn test_partial_and_fragment_modes() {
    let temp_dir = TempDir::new().unwrap();
    let doc = temp_dir.path().join("doc.txt");
    fs::write(&doc, "school City").unwrap();

    let mut cmd = tag_command();
    cmd.arg("-i").arg(&doc).args(["--mode", "whole"]);
    cmd.assert().success().stdout("");

    let mut cmd = tag_command();
    cmd.arg("-i").arg(&doc).args(["--mode", "partial"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\t0\t6\t1\n"))
        .stdout(predicate::str::contains("\t7\t11\t").not());

    let mut cmd = tag_command();
    cmd.arg("-i").arg(&doc).args(["--mode", "fragment"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\t0\t6\t1\n"))
        .stdout(predicate::str::contains("\t7\t11\t3\n"));
}

#[test]
fn test_json_output() {
    let mut cmd = tag_command();
    cmd.arg("-i")
        .arg(fixture_path("*.txt"))
        .args(["-f", "json", "--match-text"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let documents: Value = serde_json::from_slice(&output).unwrap();
    let documents = documents.as_array().unwrap();

    // Sorted path order
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["source"], "tests/fixtures/sample.txt");
    assert_eq!(documents[0]["tags_count"], 3);
    assert_eq!(documents[1]["source"], "tests/fixtures/zurich.txt");

    let london = &documents[1]["tags"][1];
    assert_eq!(london["start_offset"], 13);
    assert_eq!(london["byte_start"], 14);
    assert_eq!(london["match_text"], "London");
    assert_eq!(london["ids"], serde_json::json!(["0"]));
}

#[test]
fn test_jsonl_corpus() {
    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.arg("tag")
        .arg("-q")
        .arg("-c")
        .arg(fixture_path("names.jsonl"))
        .args(["-x", "of", "-x", "the"])
        .arg("-i")
        .arg(fixture_path("sample.txt"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sample.txt\t4\t18\t3\n"))
        .stdout(predicate::str::contains("sample.txt\t45\t51\t2\n"));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("tags.tsv");

    let mut cmd = tag_command();
    cmd.arg("-i")
        .arg(fixture_path("sample.txt"))
        .arg("-o")
        .arg(&output_file)
        .args(["-t", "2"]);

    cmd.assert().success().stdout("");

    let content = fs::read_to_string(&output_file).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("\t45\t51\t2"));
}

#[test]
fn test_config_file_settings() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("phrasetag.toml");
    fs::write(
        &config,
        r#"
[tagging]
overlaps = "ALL"
match_text = true

[corpus]
exclude = ["the", "of"]

[output]
default_format = "json"
pretty_json = false
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.arg("tag")
        .arg("-q")
        .arg("-c")
        .arg(fixture_path("names.tsv"))
        .arg("-i")
        .arg(fixture_path("sample.txt"))
        .arg("--config")
        .arg(&config);

    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 1);

    let documents: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(documents[0]["tags_count"], 4);
    assert_eq!(documents[0]["tags"][1]["match_text"], "London");
}

#[test]
fn test_generate_config_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("phrasetag.toml");

    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.arg("generate-config").arg("-o").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration template written"));

    let mut cmd = tag_command();
    cmd.arg("-i")
        .arg(fixture_path("sample.txt"))
        .arg("--config")
        .arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sample.txt\t4\t18\t3\n"));
}

#[test]
fn test_missing_corpus() {
    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.arg("tag")
        .arg("-q")
        .arg("-c")
        .arg("nonexistent.tsv")
        .arg("-i")
        .arg(fixture_path("sample.txt"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Corpus not found: nonexistent.tsv"));
}

#[test]
fn test_no_matching_documents() {
    let mut cmd = tag_command();
    cmd.arg("-i").arg("nonexistent/*.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No documents found"));
}

#[test]
fn test_invalid_mode() {
    let mut cmd = tag_command();
    cmd.arg("-i")
        .arg(fixture_path("sample.txt"))
        .args(["--mode", "longest"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'longest'"));
}

#[test]
fn test_list_commands() {
    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.args(["list", "modes"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("FRAGMENT"));

    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.args(["list", "policies"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("NO_SUB"));
}

#[test]
fn test_help_and_version() {
    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tag"))
        .stdout(predicate::str::contains("generate-config"));

    let mut cmd = Command::cargo_bin("phrasetag").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("phrasetag"));
}
