//! Top-level subcommand orchestration.

pub mod apply;
pub mod completions;
pub mod diff;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalOpts;

/// Directory under the repository root holding the managed source files.
const SKEL_DIR: &str = "skel";

/// Resolve the repository root from CLI arguments or auto-detection.
///
/// Tries, in order: the `--root` flag, the `DOTSKEL_ROOT` environment
/// variable, directories around the running binary, and finally the
/// current directory. Every candidate, explicit ones included, must
/// contain a `skel/` directory.
///
/// # Errors
///
/// Returns an error if an explicit root lacks a `skel/` directory, or no
/// auto-detection candidate contains one.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return checked_root(root.clone());
    }

    if let Ok(root) = std::env::var("DOTSKEL_ROOT") {
        return checked_root(PathBuf::from(root));
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        // target/{debug,release}/ sits two levels below the repo root;
        // an installed binary may live in <root>/bin/ or the root itself.
        let candidates = [parent.join("../.."), parent.join(".."), parent.to_path_buf()];
        for candidate in &candidates {
            if candidate.join(SKEL_DIR).is_dir() {
                return Ok(std::fs::canonicalize(candidate)?);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    if cwd.join(SKEL_DIR).is_dir() {
        return Ok(cwd);
    }

    anyhow::bail!("cannot determine repository root. Use --root or set DOTSKEL_ROOT")
}

/// Accept `root` only if it holds a `skel/` directory.
fn checked_root(root: PathBuf) -> Result<PathBuf> {
    anyhow::ensure!(
        root.join(SKEL_DIR).is_dir(),
        "no {SKEL_DIR}/ directory under {}",
        root.display()
    );
    Ok(root)
}

/// The skel source directory under `root`.
#[must_use]
pub fn skel_dir(root: &std::path::Path) -> PathBuf {
    root.join(SKEL_DIR)
}
