#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn wgc() -> Command {
    cargo_bin_cmd!("wageclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_wageclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB, set the wage to 25 and book two sessions
pub fn init_db_with_data(db_path: &str) {
    wgc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    wgc()
        .args(["--db", db_path, "wage", "25"])
        .assert()
        .success();

    // 90 minutes → 37.50
    wgc()
        .args(["--db", db_path, "save", "--minutes", "90", "--date", "2025-09-01"])
        .assert()
        .success();

    // 2 hours → 50.00
    wgc()
        .args(["--db", db_path, "save", "--ms", "7200000", "--date", "2025-09-15"])
        .assert()
        .success();
}
