//! Build identification for the tvs-search startup log
//!
//! Exposes `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` to `env!`.

use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Stdout of a successful `git` invocation, trimmed
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    // Abbreviated commit, suffixed "-dirty" for uncommitted changes
    let revision = git(&["describe", "--always", "--dirty", "--abbrev=8"])
        .unwrap_or_else(|| UNKNOWN.to_string());

    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string());

    for (key, value) in [
        ("GIT_HASH", revision),
        ("BUILD_TIMESTAMP", built_at.to_string()),
        ("BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={key}={value}");
    }
}
