use std::path::Path;
use std::process::Command;

/// Revision shown by `tally check`. A packager can pin it with
/// `TALLY_BUILD_SHA`; otherwise it comes from the enclosing git checkout.
fn main() {
    println!("cargo:rerun-if-env-changed=TALLY_BUILD_SHA");

    let pinned = std::env::var("TALLY_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty());
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = Path::new(&manifest_dir).join("..");

    let revision = pinned
        .or_else(|| git_revision(&workspace))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=TALLY_BUILD_SHA={revision}");
}

/// Short commit id, with `-dirty` when tracked files have local edits
fn git_revision(workspace: &Path) -> Option<String> {
    let git = |args: &[&str]| {
        Command::new("git")
            .arg("-C")
            .arg(workspace)
            .args(args)
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    };

    let sha = git(&["rev-parse", "--short", "HEAD"]).filter(|s| !s.is_empty())?;
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"]).is_some_and(|s| !s.is_empty());
    Some(if dirty { format!("{sha}-dirty") } else { sha })
}
