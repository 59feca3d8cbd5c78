#![allow(dead_code)]

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated application directory for one CLI run (or several sharing state).
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn records_path(&self) -> PathBuf {
        self.dir.path().join("records.txt")
    }

    pub fn write_records(&self, contents: &str) {
        fs::write(self.records_path(), contents).expect("write records file");
    }

    pub fn read_records(&self) -> String {
        fs::read_to_string(self.records_path()).expect("read records file")
    }

    pub fn write_config(&self, json: &str) {
        fs::write(self.dir.path().join("config.json"), json).expect("write config file");
    }

    /// Binary configured for script mode against this home directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("moneybook").expect("moneybook binary");
        cmd.env("MONEYBOOK_HOME", self.dir.path())
            .env("MONEYBOOK_CLI_SCRIPT", "1")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
