use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SITES: &str = r#"[
  { "department": "Admissions", "rows": [
    ["1", "Apply", "prod, staging", "", "Enrollment", "https://apply.example.edu", "", "true", "", "true", "Drupal"],
    ["2", "Visit", "prod", "", "Enrollment", "https://visit.example.edu", "", "false", "", "true", "Drupal 7"],
    ["short", "row"]
  ]},
  { "department": "Athletics", "rows": [
    ["3", "Gophers", "dev, prod", "", "", "https://gophers.example.edu", "", "true", "", "false", "WordPress"]
  ]},
  { "department": "IT", "rows": [
    ["4", "Portal", "prod", "", "OIT", "https://portal.example.edu", "", "false", "2", "false", "WordPress, Drupal"],
    ["5", "Status", "", "", "OIT", "https://status.example.edu", "", "yes", "", "1", ""]
  ]},
  { "department": "Libraries", "rows": [
    ["6", "Catalog", "staging", "", "", "https://catalog.example.edu", "", "", "", "true", "Drupal"]
  ]}
]"#;

struct Fixture {
    dir: TempDir,
    data: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("sites.json");
        std::fs::write(&data, SITES).unwrap();
        Self { dir, data }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The binary with plain output, an isolated config dir, and the temp dir as cwd.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sitesift").unwrap();
        cmd.current_dir(self.path())
            .env_remove("SITESIFT_DATA")
            .env_remove("RUST_LOG")
            .arg("--data")
            .arg(&self.data)
            .arg("--config")
            .arg(self.path().join("config"))
            .arg("--no-color");
        cmd
    }
}

#[test]
fn test_query_without_search_or_filters_shows_no_table() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("query")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No search or filters active. 6 records loaded.",
        ))
        .stdout(predicate::str::contains("Search & Filter Results").not());
}

#[test]
fn test_query_search() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["query", "--search", "portal"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Showing 1 of 6 results matching \"portal\"",
        ))
        .stdout(predicate::str::contains("Portal"))
        .stdout(predicate::str::contains("Apply").not())
        .stdout(predicate::str::contains("End of matching results"));
}

#[test]
fn test_query_highlight_marks_matches() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["query", "--search", "portal", "--highlight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*Portal*"));
}

#[test]
fn test_query_filters_combine() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["query", "--cms", "Drupal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 4 of 6 results"))
        .stdout(predicate::str::contains("[CMS: Drupal]"));

    fx.cmd()
        .args(["query", "--cms", "Drupal", "--dept", "IT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 of 6 results"))
        .stdout(predicate::str::contains("Portal"));
}

#[test]
fn test_query_no_matches() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["query", "--search", "nothing-like-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results matching search criteria"));

    fx.cmd()
        .args(["query", "--dept", "Law"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results matching filter criteria"));
}

#[test]
fn test_query_json() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["--format", "json", "query", "--dept", "IT"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["view"]["state"], "table");
    assert_eq!(json["view"]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["chips"][0]["value"], "IT");
}

#[test]
fn test_options_follow_the_search() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["options", "--search", "admissions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filter and Sort"))
        .stdout(predicate::str::contains(
            "Filters will be applied to search results.",
        ))
        .stdout(predicate::str::contains("Departments (1)"))
        .stdout(predicate::str::contains("[ ] Admissions"))
        .stdout(predicate::str::contains("Libraries").not());

    fx.cmd()
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("Filters will be applied to all data."))
        .stdout(predicate::str::contains("Departments (4)"));
}

#[test]
fn test_export_writes_csv() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["export", "--env", "prod", "-o", "prod-sites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 4 records"));

    let content = std::fs::read_to_string(fx.path().join("prod-sites.csv")).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Department,Title,Environments,Aliases,Owners,Primary URL,Notes,Pope Tech,Errors,Active,CMS")
    );
    assert!(lines.next().unwrap().starts_with("\"Admissions\",\"Apply\""));
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn test_export_refuses_empty_results() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["export", "--search", "nothing-like-this", "-o", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data to export"));
    assert!(!fx.path().join("empty.csv").exists());
}

#[test]
fn test_export_refuses_blank_name() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["export", "--dept", "IT", "-o", " .CSV "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a filename"));
}

#[test]
fn test_exported_csv_loads_again() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["export", "--search", "example", "-o", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 6 records"));

    let mut cmd = Command::cargo_bin("sitesift").unwrap();
    cmd.current_dir(fx.path())
        .env_remove("SITESIFT_DATA")
        .args(["--no-color", "--config"])
        .arg(fx.path().join("config"))
        .arg("--data")
        .arg(fx.path().join("all.csv"))
        .args(["query", "--dept", "IT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 2 of 6 results"));
}

#[test]
fn test_shell_session() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("shell")
        .write_stdin("type por\ntype portal\nshow\nfilter active true\nchips\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Showing 1 of 6 results matching \"portal\"",
        ))
        .stdout(predicate::str::contains(
            "No results matching search and filter criteria",
        ))
        .stdout(predicate::str::contains("[Active: Yes]"));
}

#[test]
fn test_config_set_and_show() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["config", "multi_value_match", "token"])
        .assert()
        .success()
        .stdout(predicate::str::contains("multi_value_match set to token"));

    fx.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("multi_value_match = token"))
        .stdout(predicate::str::contains("debounce_ms = 250"));

    fx.cmd()
        .args(["config", "debounce_ms", "soon"])
        .assert()
        .failure();
}

#[test]
fn test_token_matching_from_config() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["config", "multi_value_match", "token"])
        .assert()
        .success();

    // "Drupal 7" no longer counts as Drupal
    fx.cmd()
        .args(["query", "--cms", "Drupal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 3 of 6 results"));
}

#[test]
fn test_missing_data() {
    let fx = Fixture::new();
    let mut cmd = Command::cargo_bin("sitesift").unwrap();
    cmd.current_dir(fx.path())
        .env_remove("SITESIFT_DATA")
        .arg("--config")
        .arg(fx.path().join("config"))
        .arg("query")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data file given"));

    let mut cmd = Command::cargo_bin("sitesift").unwrap();
    cmd.current_dir(fx.path())
        .env("SITESIFT_DATA", fx.path().join("gone.json"))
        .arg("--config")
        .arg(fx.path().join("config"))
        .arg("query")
        .assert()
        .failure()
        .stderr(predicate::str::contains("data file not found"));
}
