//! Filters for the git configuration file.
//!
//! The managed `.gitconfig` is shared across machines, but two kinds of lines
//! legitimately differ per machine: credential-helper configuration (each
//! platform uses a different helper, and some machines append their own) and
//! `[safe] directory` whitelist entries accumulated locally. The diff filter
//! hides those from comparisons; the copy filter activates Windows-only lines
//! that are kept commented out in the canonical copy.

use std::sync::LazyLock;

use regex::Regex;

use super::{LineFilter, pattern};
use crate::platform::Platform;

/// Lines removed from diffs inside `[credential]`: any `helper =` assignment
/// and the gpg `credentialStore` selector.
static CREDENTIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^\s*(helper\s*=|credentialStore\s*=\s*gpg\s*$)"));

/// The one credential helper line that stays visible on Windows.
static MANAGER_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)^\s*helper\s*=\s*manager\s*$"));

/// A `[safe]` whitelist entry.
static SAFE_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)^\s*directory\s*="));

/// Copy filter for the git config: activates Windows-only lines.
///
/// Lines beginning with the two-character marker `#w` have the marker
/// stripped; all other lines pass through unchanged. The canonical
/// `.gitconfig` keeps Windows-specific settings commented out this way so the
/// same source file serves both platforms. Only the Windows branch of the
/// catalog constructs this filter.
#[derive(Debug, Clone, Copy)]
pub struct GitConfigCopyFilter;

impl LineFilter for GitConfigCopyFilter {
    fn apply(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| match line.strip_prefix("#w") {
                Some(rest) => rest.to_string(),
                None => line.clone(),
            })
            .collect()
    }
}

/// Diff filter for the git config: hides per-machine credential and `[safe]`
/// lines from comparisons.
///
/// Section membership is tracked by the most recently seen section header
/// (trimmed, lower-cased, `[`-prefixed line). Two independent passes run over
/// the input: the first decides whether the whole `[safe]` section can be
/// dropped (true only while every non-header line in it is a `directory =`
/// entry), the second re-tracks sections from scratch and emits the surviving
/// lines. The droppability decision is global: if `[safe]` appears more than
/// once, all occurrences are dropped or kept together.
#[derive(Debug, Clone, Copy)]
pub struct GitConfigDiffFilter {
    platform: Platform,
}

impl GitConfigDiffFilter {
    /// Create the filter for an explicit platform.
    ///
    /// On Windows the `helper = manager` line inside `[credential]` is
    /// retained (it is the managed value there); everywhere else every
    /// credential helper line is hidden.
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl LineFilter for GitConfigDiffFilter {
    fn apply(&self, lines: &[String]) -> Vec<String> {
        // First pass: is every line of [safe] a plain directory entry?
        let mut section: Option<String> = None;
        let mut drop_safe = true;
        for line in lines {
            let trimmed = line.trim();
            if trimmed.starts_with('[') {
                section = Some(trimmed.to_lowercase());
            } else if section.as_deref() == Some("[safe]") && !SAFE_RE.is_match(line) {
                drop_safe = false;
            }
        }

        // Second pass: emit, with fresh section tracking. The header line
        // itself is subject to the rules of the section it opens, so a
        // droppable [safe] header disappears along with its entries.
        let mut section: Option<String> = None;
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let trimmed = line.trim();
            if trimmed.starts_with('[') {
                section = Some(trimmed.to_lowercase());
            }
            if section.as_deref() == Some("[credential]")
                && CREDENTIAL_RE.is_match(line)
                && !(self.platform.is_windows() && MANAGER_RE.is_match(line))
            {
                continue;
            }
            if section.as_deref() == Some("[safe]") && (drop_safe || SAFE_RE.is_match(line)) {
                continue;
            }
            out.push(line.clone());
        }
        out
    }
}
