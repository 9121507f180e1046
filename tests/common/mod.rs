#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// The binary, pointed at a storage file inside `dir`.
pub fn book(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("STORAGE_CHOICE", "file")
        .env("STORAGE_PATH", storage_path(dir))
        .env_remove("STORAGE_KEY")
        .env_remove("RUST_LOG");
    cmd
}

pub fn storage_path(dir: &TempDir) -> PathBuf {
    dir.path().join("storage.json")
}

/// Adds a contact and returns its id as printed by `add`.
pub fn add(dir: &TempDir, args: &[&str]) -> String {
    let output = book(dir).arg("add").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    printed_id(&output.stdout)
}

pub fn printed_id(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .find_map(|line| line.strip_prefix("Id: "))
        .map(str::to_string)
        .expect("output has an Id line")
}
