#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// Directory holding the bundled Temple of Heaven sample.
pub fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../scenic-nav-lib/data")
        .canonicalize()
        .expect("sample data present")
}

pub fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("scenic-nav-cli");
    cmd.env("RUST_LOG", "error");
    cmd
}

/// Command preconfigured to read the sample data.
pub fn sample_command() -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir").arg(sample_data_dir());
    cmd
}

/// Two spots and no paths between them.
pub fn disconnected_data() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("spots.json"),
        r#"[
  {"id": 1, "nameZh": "北门", "nameEn": "North Gate", "x": 0.0, "y": 0.0, "category": "入口"},
  {"id": 2, "nameZh": "南门", "nameEn": "South Gate", "x": 0.0, "y": 100.0, "category": "入口"}
]"#,
    )
    .expect("write spots");
    fs::write(
        dir.path().join("graph.csv"),
        "FromId,ToId,Weight,Type,IsCrowded\n",
    )
    .expect("write edges");
    dir
}
