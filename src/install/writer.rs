//! File placement: atomic copies and hard-link replacement.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Sibling staging name for `dest`, appended rather than substituted so
/// an existing extension survives.
fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map_or_else(|| OsString::from("dotskel"), OsString::from);
    name.push(".dotskel_tmp");
    dest.with_file_name(name)
}

/// Write `text` to `dest` atomically: stage next to the destination, then
/// rename into place. Creates missing parent directories.
///
/// # Errors
///
/// Returns an error if the staging file cannot be written or renamed; the
/// staging file is removed on failure.
pub(super) fn copy_into_place(dest: &Path, text: &str) -> Result<()> {
    ensure_parent_dir(dest)?;
    let staging = staging_path(dest);
    std::fs::write(&staging, text)
        .with_context(|| format!("write staging file: {}", staging.display()))?;
    if let Err(e) = std::fs::rename(&staging, dest) {
        let _ = std::fs::remove_file(&staging);
        return Err(e).with_context(|| format!("replace {}", dest.display()));
    }
    Ok(())
}

/// Materialize `dest` as a hard link to `source`, atomically replacing
/// whatever is there: the link is created under a staging name first, then
/// renamed over the destination. Creates missing parent directories.
///
/// # Errors
///
/// Returns an error if the link cannot be created (hard links require both
/// paths on the same filesystem) or the rename fails.
pub(super) fn replace_with_link(source: &Path, dest: &Path) -> Result<()> {
    ensure_parent_dir(dest)?;
    let staging = staging_path(dest);
    if staging.symlink_metadata().is_ok() {
        std::fs::remove_file(&staging)
            .with_context(|| format!("remove stale staging file: {}", staging.display()))?;
    }
    std::fs::hard_link(source, &staging)
        .with_context(|| format!("link {} => {}", source.display(), staging.display()))?;
    if let Err(e) = std::fs::rename(&staging, dest) {
        let _ = std::fs::remove_file(&staging);
        return Err(e).with_context(|| format!("replace {}", dest.display()));
    }
    // When dest is already a hard link to source, rename() over the same
    // inode succeeds without consuming the staging link.
    if staging.symlink_metadata().is_ok() {
        std::fs::remove_file(&staging)
            .with_context(|| format!("remove staging file: {}", staging.display()))?;
    }
    Ok(())
}
