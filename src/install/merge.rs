//! External merge-tool handoff.
//!
//! The install text is staged to a temporary file next to the destination
//! so the tool compares what an install would write, not the raw source.
//! The staging file is removed when the handoff returns, whether or not
//! the tool succeeded.

use std::ffi::OsString;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result};
use tempfile::NamedTempFile;

use super::context::Context;
use crate::reconcile::Reconciliation;

/// Stage the install text and run the platform merge tool on it and the
/// destination. A missing tool is a warning, not an error.
///
/// # Errors
///
/// Returns an error if the staging file cannot be created or the tool
/// cannot be spawned.
pub(super) fn run_merge_tool(ctx: &Context<'_>, rec: &Reconciliation<'_>) -> Result<()> {
    let staged = stage_install_text(rec)?;
    let staged_arg = staged.path().display().to_string();
    let dest_arg = rec.dest_path.display().to_string();

    let result = if ctx.platform.is_windows() {
        let comspec = std::env::var("COMSPEC").unwrap_or_else(|_| String::from("cmd.exe"));
        let command = format!("start /wait winmerge {staged_arg} {dest_arg}");
        ctx.executor.run_unchecked(&comspec, &["/c", &command])?
    } else {
        if !ctx.executor.which("meld") {
            ctx.log.warn("meld is not available on PATH, skipping merge");
            return Ok(());
        }
        ctx.executor
            .run_unchecked("meld", &[&staged_arg, &dest_arg])?
    };

    if !result.success {
        let status = result
            .code
            .map_or_else(|| String::from("signal"), |c| c.to_string());
        ctx.log
            .warn(&format!("merge tool exited with status {status}"));
    }
    Ok(())
}

/// Write the install text to a uniquely named temporary file in the
/// destination's directory. The `NamedTempFile` guard deletes it on drop.
fn stage_install_text(rec: &Reconciliation<'_>) -> Result<NamedTempFile> {
    let parent = rec.dest_path.parent().unwrap_or_else(|| Path::new("."));
    let name = rec
        .dest_path
        .file_name()
        .map_or_else(|| OsString::from("dotskel"), OsString::from);
    let prefix = format!("{}_skel.", name.to_string_lossy());
    let mut staged = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| format!("create merge staging file in {}", parent.display()))?;
    staged
        .write_all(rec.install_text().as_bytes())
        .context("write merge staging file")?;
    Ok(staged)
}
