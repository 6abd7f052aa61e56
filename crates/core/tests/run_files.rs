use std::fs;

use sift_core::model::OutputEntry;
use sift_core::pipeline::{run_files, SiftOptions};
use tempfile::tempdir;

#[test]
fn run_files_writes_the_rendered_list_once() {
    let dir = tempdir().expect("tempdir");
    let html_path = dir.path().join("listing.html");
    let log_path = dir.path().join("recomp.log");
    let out_path = dir.path().join("out.toml");

    fs::write(&html_path, "<a id=\"sub_82001000\"></a><a id=\"sub_82001200\"></a>")
        .expect("write html");
    fs::write(&log_path, "ERROR: Switch case at 0x82001050\n").expect("write log");

    let entries =
        run_files(&html_path, &log_path, &out_path, &SiftOptions::default()).expect("run");

    assert_eq!(entries, vec![OutputEntry { address: 0x82001000, size: 0x1FC }]);
    assert_eq!(
        fs::read_to_string(&out_path).expect("read output"),
        "functions = [\n    { address = 0x82001000, size = 0x1FC }\n]"
    );
}

#[test]
fn invalid_bytes_in_inputs_are_tolerated() {
    let dir = tempdir().expect("tempdir");
    let html_path = dir.path().join("listing.html");
    let log_path = dir.path().join("recomp.log");
    let out_path = dir.path().join("out.toml");

    // Valid markers surrounded by bytes that are not UTF-8.
    let mut html = b"\xFF\xFE<a id=\"sub_82001000\"></a>\xFF".to_vec();
    html.extend_from_slice(b"<a id=\"sub_82001100\"></a>");
    fs::write(&html_path, html).expect("write html");
    fs::write(&log_path, b"\xFFERROR: Switch case at 0x82001010\n").expect("write log");

    let entries =
        run_files(&html_path, &log_path, &out_path, &SiftOptions::default()).expect("run");

    assert_eq!(entries, vec![OutputEntry { address: 0x82001000, size: 0xFC }]);
}

#[test]
fn missing_log_is_a_contextual_error() {
    let dir = tempdir().expect("tempdir");
    let html_path = dir.path().join("listing.html");
    fs::write(&html_path, "<a id=\"sub_82001000\"></a>").expect("write html");

    let err = run_files(
        &html_path,
        &dir.path().join("missing.log"),
        &dir.path().join("out.toml"),
        &SiftOptions::default(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("Failed to read recompiler log"), "unexpected error: {err}");
}
