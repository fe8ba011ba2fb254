//! Line filters applied to managed-file content.
//!
//! A filter is a pure transformation from an ordered sequence of lines to
//! another ordered sequence of lines. Copy filters normalize source content
//! before it is written; diff filters suppress expected differences from both
//! sides of a comparison. Filters never reorder lines and never introduce
//! lines not derived from their input.

mod git_config;
mod profile;

pub use git_config::{GitConfigCopyFilter, GitConfigDiffFilter};
pub use profile::ProfileDiffFilter;

use std::fmt;

use regex::Regex;

/// A pure lines-to-lines transformation.
///
/// Implementations must be deterministic, total for any well-formed line
/// sequence, and free of side effects. Input lines carry no terminators and
/// output lines must not either.
pub trait LineFilter: fmt::Debug + Send + Sync {
    /// Transform `lines` into the filtered sequence.
    fn apply(&self, lines: &[String]) -> Vec<String>;
}

/// The identity filter: returns its input unchanged.
///
/// Used as the effective filter for every [`FileSpec`](crate::config::FileSpec)
/// field that does not override it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFilter;

impl LineFilter for NullFilter {
    fn apply(&self, lines: &[String]) -> Vec<String> {
        lines.to_vec()
    }
}

/// Split text into terminator-free lines (`\n` or `\r\n`).
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(ToOwned::to_owned).collect()
}

/// Compile a hard-coded pattern.
#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("hard-coded pattern compiles")
}

#[cfg(test)]
pub(crate) fn to_lines(text: &[&str]) -> Vec<String> {
    text.iter().map(ToOwned::to_owned).map(String::from).collect()
}
