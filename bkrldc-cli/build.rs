use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

const SHA_VAR: &str = "BKRLDC_BUILD_SHA";

/// `git describe` of the workspace, `-dirty` when the tree has edits.
fn describe(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}

fn main() {
    let manifest = env::var_os("CARGO_MANIFEST_DIR")
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let workspace = manifest.parent().unwrap_or(&manifest).to_path_buf();

    // Source tarballs have no .git; packagers pass the revision in.
    let sha = match env::var(SHA_VAR) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => describe(&workspace).unwrap_or_else(|| "unknown".to_string()),
    };

    println!("cargo:rerun-if-env-changed={SHA_VAR}");
    println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());
    println!("cargo:rerun-if-changed={}", workspace.join(".git/index").display());
    println!("cargo:rustc-env={SHA_VAR}={sha}");
}
