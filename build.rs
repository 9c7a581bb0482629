// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=TOUCHCAM_VERSION");

    // Packaged builds set the version explicitly
    let version = std::env::var("TOUCHCAM_VERSION").unwrap_or_else(|_| git_version());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// `0.1.0` at a tag, `0.1.0-5-gabcdef1` after it, the short hash without tags
fn git_version() -> String {
    let described = Command::new("git")
        .args(["describe", "--tags", "--always", "--match", "v*"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string());

    match described {
        Some(v) => v.strip_prefix('v').map(str::to_string).unwrap_or(v),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}
