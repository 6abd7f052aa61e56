use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::tempdir;

/// Write a listing with anchors for the given addresses plus a log, and
/// return the three standard paths.
fn write_inputs(root: &Path, addresses: &[u64], log: &str) -> (String, String, String) {
    let html: String =
        addresses.iter().map(|a| format!("<a id=\"sub_{:08X}\">code</a>\n", a)).collect();
    let html_path = root.join("listing.html");
    let log_path = root.join("recomp.log");
    let out_path = root.join("switch_tables.toml");
    fs::write(&html_path, html).expect("write html");
    fs::write(&log_path, log).expect("write log");
    (
        html_path.to_string_lossy().into_owned(),
        log_path.to_string_lossy().into_owned(),
        out_path.to_string_lossy().into_owned(),
    )
}

#[test]
fn round_trip_selects_the_function_containing_the_switch() {
    let dir = tempdir().expect("tempdir");
    let (html, log, out) = write_inputs(
        dir.path(),
        &[0x82001000, 0x82001200, 0x82001300],
        "ERROR: Switch case at 0x82001050\n",
    );

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 functions found!"));

    let written = fs::read_to_string(&out).expect("read output");
    assert_eq!(written, "functions = [\n    { address = 0x82001000, size = 0x1FC }\n]");
}

#[test]
fn empty_log_triggers_dump_all_fallback() {
    let dir = tempdir().expect("tempdir");
    let (html, log, out) = write_inputs(dir.path(), &[0x82001000, 0x82001200, 0x82001300], "");

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dumping ALL parsed functions (fallback)."));

    let written = fs::read_to_string(&out).expect("read output");
    assert_eq!(written.matches("address =").count(), 3);
}

#[test]
fn no_dump_all_writes_an_empty_list() {
    let dir = tempdir().expect("tempdir");
    let (html, log, out) = write_inputs(dir.path(), &[0x82001000, 0x82001200], "");

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str(), "--no-dump-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip dump-all (flag disabled)."));

    assert_eq!(fs::read_to_string(&out).expect("read output"), "functions = []");
}

#[test]
fn missing_positional_arguments_fail_with_usage() {
    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_input_file_fails_without_writing_output() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("out.toml");

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([
            dir.path().join("missing.html").to_str().unwrap(),
            dir.path().join("missing.log").to_str().unwrap(),
            out.to_str().unwrap(),
        ])
        .assert()
        .failure();

    assert!(!out.exists(), "no partial output may be written on failure");
}

#[test]
fn malformed_addr_range_aborts_the_run() {
    let dir = tempdir().expect("tempdir");
    let (html, log, out) = write_inputs(dir.path(), &[0x82001000], "");

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str(), "--addr-range", "82000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed address range"));
}

#[test]
fn malformed_batch_size_is_silently_ignored() {
    let dir = tempdir().expect("tempdir");
    let (html, log, out) = write_inputs(dir.path(), &[0x82001000, 0x82001200], "");

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str(), "--batch-size", "lots"])
        .assert()
        .success();

    let written = fs::read_to_string(&out).expect("read output");
    assert_eq!(written.matches("address =").count(), 2);
}

#[test]
fn batch_size_truncates_to_the_smallest_entries() {
    let dir = tempdir().expect("tempdir");
    // Gaps grow left to right, so the smallest ranges come first.
    let (html, log, out) = write_inputs(
        dir.path(),
        &[0x82001000, 0x82001020, 0x82001060, 0x820010C0, 0x82001140],
        "",
    );

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str(), "--batch-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch-size 2: 2 (was 5)"));

    let written = fs::read_to_string(&out).expect("read output");
    assert_eq!(written.matches("address =").count(), 2);
    assert!(written.contains("0x82001000"));
    assert!(written.contains("0x82001020"));
}

#[test]
fn stray_trailing_tokens_are_ignored() {
    let dir = tempdir().expect("tempdir");
    let (html, log, out) = write_inputs(dir.path(), &[0x82001000], "");

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str(), "--min-size", "0x10", "--frobnicate"])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).expect("read output").contains("0x82001000"));
}

#[test]
fn known_flags_after_a_stray_token_still_apply() {
    let dir = tempdir().expect("tempdir");
    // Anchors 0x10 apart: the first range is 0xC wide, the tail 0x40.
    let (html, log, out) = write_inputs(dir.path(), &[0x82001000, 0x82001010], "");

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str(), "--frobnicate", "--min-size", "0x20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Min-size 0x20: 1 (was 2)"));

    let written = fs::read_to_string(&out).expect("read output");
    assert_eq!(written.matches("address =").count(), 1);
    assert!(!written.contains("{ address = 0x82001000, size = 0xC }"));
    assert!(written.contains("0x82001010"));
}

#[test]
fn min_size_filter_reports_counts() {
    let dir = tempdir().expect("tempdir");
    let (html, log, out) =
        write_inputs(dir.path(), &[0x82001000, 0x82001010, 0x82001200], "");

    assert_cmd::cargo::cargo_bin_cmd!("funcsift")
        .args([html.as_str(), log.as_str(), out.as_str(), "--min-size", "0x20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Min-size 0x20: 2 (was 3)"));
}
