//! Diff filter for the Git Bash shell profile.

use std::sync::LazyLock;

use regex::Regex;

use super::{LineFilter, pattern};

/// Lines suppressed from profile diffs: machine-managed `PATH` exports,
/// ssh-agent key loading, and blank lines.
static MACHINE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^\s*(?:export\s+PATH=|ssh-add\b|$)"));

/// Diff filter for `.profile` on Windows.
///
/// The Git Bash profile accumulates per-machine `export PATH=` entries and
/// `ssh-add` invocations that are expected to differ from the canonical copy;
/// this filter drops them (and blank lines) from both diff sides so only
/// substantive edits surface. Only the Windows branch of the catalog uses it.
#[derive(Debug, Clone, Copy)]
pub struct ProfileDiffFilter;

impl LineFilter for ProfileDiffFilter {
    fn apply(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .filter(|line| !MACHINE_LINE_RE.is_match(line))
            .cloned()
            .collect()
    }
}
