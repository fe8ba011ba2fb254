//! Terminal presentation of diffs and per-file banners.
//!
//! Diff content stays plain text all the way through the engine; color is
//! applied here, at the edge, right before a line reaches the console. The
//! file log receives the same lines with ANSI stripped.

use std::path::Path;

/// Colorize one unified-diff line.
///
/// Additions are green, removals red, hunk headers cyan, and the file
/// label pair bold. Context lines pass through unchanged.
#[must_use]
pub fn colorize_diff_line(line: &str) -> String {
    if line.starts_with("+++") || line.starts_with("---") {
        format!("\x1b[1m{line}\x1b[0m")
    } else if line.starts_with('+') {
        format!("\x1b[32m{line}\x1b[0m")
    } else if line.starts_with('-') {
        format!("\x1b[31m{line}\x1b[0m")
    } else if line.starts_with("@@") {
        format!("\x1b[36m{line}\x1b[0m")
    } else {
        line.to_owned()
    }
}

/// The banner announcing which file pair is being processed.
#[must_use]
pub fn file_banner(source: &Path, dest: &Path) -> String {
    format!(
        "\x1b[30;46m# {} => {} \x1b[0m",
        source.display(),
        dest.display()
    )
}
