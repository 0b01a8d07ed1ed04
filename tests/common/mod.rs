#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn formsite_cmd() -> Command {
    let mut cmd = Command::cargo_bin("formsite").unwrap();
    cmd.env_remove("FORMSITE_ROOT");
    cmd.env_remove("FORMSITE_LOG");
    cmd
}

/// Run `formsite init` on the given directory
pub fn init_site(path: &Path) {
    formsite_cmd()
        .arg("init")
        .arg(path)
        .arg("--name")
        .arg("Formly")
        .arg("--base-url")
        .arg("https://formly.example")
        .assert()
        .success();
}
