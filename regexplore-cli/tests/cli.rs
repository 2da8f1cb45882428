use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn tokenize_as_json() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["tokenize", r"(?<ip>\d+)", "--format", "json"]);

    let output_pred = predicate::str::contains("\"namedGroupMarker\"")
        .and(predicate::str::contains("start of named group 'ip'"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn classify_ip_address() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["classify", "192.168.1.1"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("\\d{1,3}\\.\\d{1,3}\\.\\d{1,3}\\.\\d{1,3}\n"));
}

#[test]
fn classify_unmatched_span_fails() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["classify", "two\nlines"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("try 'generalize'"));
}

#[test]
fn classify_with_explicit_literal() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["classify", "a.b", "--with", "literal"]);

    cmd.assert().success().stdout(predicate::str::diff("a\\.b\n"));
}

#[test]
fn generalize_request_line_with_name() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["generalize", "GET /index.html HTTP/1.1\n", "--name", "request"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("(?<request>(?:GET|"))
        .stdout(predicate::str::contains("HTTP/\\d\\.\\d\\s+)"));
}

#[test]
fn generalize_single_line_selection_is_wildcard() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["generalize", "connection reset by peer"]);

    cmd.assert().success().stdout(predicate::str::diff(".*\n"));
}

#[test]
fn generalize_rejects_bad_capture_name() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["generalize", "abc", "--name", "1st"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid capture name '1st'"));
}

#[test]
fn generalize_shows_segments() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["generalize", "a b\nc", "--segments", "--format", "json"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"rule\": \"whitespace\""));
}

#[test]
fn match_counts_lines() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["match", r"\d+", "--text", "a1\nb22\nc333"]);

    cmd.assert().success().stdout(predicate::str::diff(
        "line 1 @1: \"1\"\n    match = \"1\"\nline 2 @4: \"22\"\n    match = \"22\"\nline 3 @8: \"333\"\n    match = \"333\"\n",
    ));
}

#[test]
fn match_with_highlight() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["match", "b+", "--text", "abbcb", "--highlight"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("a[[bb]]c[[b]]"));
}

#[test]
fn match_without_global_flag_stops_after_first() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["match", "b", "--text", "bbb", "--flags", "", "--format", "json"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"startOffset\": 0"))
        .stdout(predicate::str::contains("\"startOffset\": 1").not());
}

#[test]
fn match_invalid_pattern_reports_error() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["match", "(", "--text", "abc"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid pattern"));
}

#[test]
fn match_invalid_pattern_as_json_error_value() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.args(["match", "(", "--text", "abc", "--format", "json"]);

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"error\""))
        .stdout(predicate::str::contains("\"budget_exceeded\": false"));
}

#[test]
fn match_reads_sample_file_and_config() {
    let mut sample = tempfile::NamedTempFile::new().unwrap();
    write!(sample, "x\nx\nx\n").unwrap();

    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, "[matcher]\nmax_matches = 2\n").unwrap();

    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.arg("match")
        .arg("x")
        .arg("--file")
        .arg(sample.path())
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("more than 2 matches"));
}

#[test]
fn list_classifiers() {
    let mut cmd = cargo_bin_cmd!("regexplore");
    cmd.arg("classifiers");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ipv4"))
        .stdout(predicate::str::contains("Exact text (explicit only)"));
}
