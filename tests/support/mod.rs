#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::{DateTime, Utc};
use sprintboard::day::parse_timestamp;
use sprintboard::AggregateOptions;
use tempfile::TempDir;

pub const MOCK_BUCKETS: &str = include_str!("../fixtures/mock_buckets.json");

/// Fallback clock used for the Sprint 2 tasks, which carry no `created`.
pub const MOCK_NOW: &str = "2023-10-09T08:00:00Z";

pub fn mock_now() -> DateTime<Utc> {
    parse_timestamp(MOCK_NOW).expect("mock clock")
}

pub fn mock_options() -> AggregateOptions {
    AggregateOptions::at(mock_now())
}

pub fn sprintboard_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sprintboard").expect("binary");
    cmd.env_remove("SPRINTBOARD_CONFIG")
        .env_remove("SPRINTBOARD_NOW")
        .env_remove("RUST_LOG");
    cmd
}

/// Scratch directory holding input files and an optional config.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn write_mock(&self) -> PathBuf {
        self.write_file("buckets.json", MOCK_BUCKETS)
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = sprintboard_cmd();
        cmd.current_dir(self.path()).args(["--now", MOCK_NOW]);
        cmd
    }
}
