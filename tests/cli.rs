mod common;

use std::process::Command;
use common::{write_wav, Tags};

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_track-dedupe"))
}

#[test]
fn duplicates_fails_when_report_cannot_be_written() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(dir.path(), "a.wav", 8000, 2, &Tags { title: Some("A"), ..Default::default() });
    let report = dir.path().join("no_such_dir").join("report.csv");

    let status = binary()
        .args(["duplicates", "-i"])
        .arg(dir.path())
        .arg("--report")
        .arg(&report)
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn scan_fails_when_csv_cannot_be_written() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(dir.path(), "a.wav", 8000, 2, &Tags::default());

    let status = binary()
        .args(["scan", "-i"])
        .arg(dir.path())
        .arg("--csv")
        .arg(dir.path().join("no_such_dir").join("tracks.csv"))
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn duplicates_dry_run_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(dir.path(), "a.wav", 8000, 2, &Tags { title: Some("A"), ..Default::default() });
    write_wav(dir.path(), "b.wav", 8000, 3, &Tags { title: Some("A"), ..Default::default() });

    let status = binary()
        .args(["duplicates", "-i"])
        .arg(dir.path())
        .arg("--report")
        .arg(dir.path().join("report.csv"))
        .status()
        .unwrap();
    assert!(status.success());
    assert!(dir.path().join("a.wav").exists());
    assert!(dir.path().join("b.wav").exists());
    assert!(dir.path().join("report.csv").exists());
}
