//! Stamps the binary with its git revision and build date for `--version`.

use std::path::Path;
use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn main() {
    let head = Path::new("../../.git/HEAD");
    if head.exists() {
        println!("cargo::rerun-if-changed={}", head.display());
    }

    let revision = git(&["describe", "--always", "--dirty"]).unwrap_or_else(|| "unknown".into());
    let built = chrono::Utc::now().format("%Y-%m-%d");

    println!("cargo::rustc-env=TERMX_GIT_HASH={revision}");
    println!("cargo::rustc-env=TERMX_BUILD_DATE={built}");
}
