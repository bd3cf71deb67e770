#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use std::sync::OnceLock;
use tempfile::TempDir;

fn config_home() -> &'static TempDir {
    static CONFIG_HOME: OnceLock<TempDir> = OnceLock::new();
    CONFIG_HOME.get_or_init(|| tempfile::tempdir().unwrap())
}

/// `fgtree` command isolated from the user's config file.
pub fn fgtree_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fgtree").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home().path());
    cmd.env_remove("SHELL");
    cmd
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
