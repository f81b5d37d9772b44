//! Basic CLI integration tests. Lookups that would hit the network are not
//! exercised here; these cover argument handling and the offline paths.

#![allow(deprecated)] // Command::cargo_bin deprecated for custom build-dir; still works for default

use assert_cmd::Command;

#[test]
fn help_prints_and_exits_success() {
    Command::cargo_bin("find-libraries")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn config_show_runs() {
    Command::cargo_bin("find-libraries")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success();
}

#[test]
fn config_show_json_valid() {
    let out = Command::cargo_bin("find-libraries")
        .unwrap()
        .args(["config", "show", "--json"])
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    let _: serde_json::Value =
        serde_json::from_str(stdout).expect("config show --json should output valid JSON");
}

#[test]
fn lookup_requires_title_and_author() {
    Command::cargo_bin("find-libraries")
        .unwrap()
        .args(["lookup", "--title", "Kindred"])
        .assert()
        .failure();
}

#[test]
fn shelf_with_missing_file_fails() {
    Command::cargo_bin("find-libraries")
        .unwrap()
        .args(["shelf", "/nonexistent/export.csv"])
        .assert()
        .failure();
}

#[test]
fn shelf_with_no_rows_prints_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    std::fs::write(&path, "Title,Author,Bookshelves\n").unwrap();

    let out = Command::cargo_bin("find-libraries")
        .unwrap()
        .args(["shelf", path.to_str().unwrap()])
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(stdout).unwrap();
    assert!(records.is_empty());
}

#[test]
fn export_csv_quotes_fields_with_commas() {
    let out = Command::cargo_bin("find-libraries")
        .unwrap()
        .args(["export-csv", "title", "author"])
        .write_stdin(r#"[{"title": "Foo, Bar", "author": "Baz"}]"#)
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert_eq!(stdout, "title,author\n\"Foo, Bar\",Baz\n");
}

#[test]
fn export_csv_rejects_invalid_json() {
    Command::cargo_bin("find-libraries")
        .unwrap()
        .args(["export-csv", "title"])
        .write_stdin("not json")
        .assert()
        .failure();
}

#[test]
fn export_csv_defaults_to_record_columns() {
    let out = Command::cargo_bin("find-libraries")
        .unwrap()
        .arg("export-csv")
        .write_stdin(r#"[{"title": "Kindred", "author": "Octavia E. Butler", "source": "hoopla"}]"#)
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert!(stdout.starts_with("title,author,source,source_detail,acquisition_url,format\n"));
    assert!(stdout.contains("Kindred,Octavia E. Butler,hoopla,,,"));
}
