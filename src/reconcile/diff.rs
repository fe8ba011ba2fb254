//! Unified diff rendering between two line sequences.

use similar::TextDiff;

/// Render a unified diff of `old` against `new` with three lines of context.
///
/// Returns the diff split into lines without terminators, starting with the
/// `---`/`+++` header pair. Equal inputs render to an empty vector.
#[must_use]
pub fn render_unified(
    old: &[String],
    new: &[String],
    from_label: &str,
    to_label: &str,
) -> Vec<String> {
    let old_text = join(old);
    let new_text = join(new);
    let diff = TextDiff::from_lines(old_text.as_str(), new_text.as_str());
    diff.unified_diff()
        .context_radius(3)
        .header(from_label, to_label)
        .to_string()
        .lines()
        .map(str::to_owned)
        .collect()
}

// Terminate every line so the diff engine never sees a "missing newline"
// on either side.
fn join(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::filters::to_lines;

    #[test]
    fn renders_header_and_hunk() {
        let old = to_lines(&["line one", "line two"]);
        let new = to_lines(&["line one", "line two", "line three"]);
        let diff = render_unified(&old, &new, "local/.vimrc", "skel/.vimrc");

        assert_eq!(diff[0], "--- local/.vimrc");
        assert_eq!(diff[1], "+++ skel/.vimrc");
        assert!(diff[2].starts_with("@@ "));
        assert_eq!(diff.last().map(String::as_str), Some("+line three"));
    }

    #[test]
    fn equal_inputs_render_empty() {
        let lines = to_lines(&["same"]);
        assert!(render_unified(&lines, &lines, "a", "b").is_empty());
    }

    #[test]
    fn removed_lines_carry_minus_prefix() {
        let old = to_lines(&["keep", "drop me"]);
        let new = to_lines(&["keep"]);
        let diff = render_unified(&old, &new, "a", "b");

        let removed: Vec<&String> = diff
            .iter()
            .filter(|l| l.starts_with('-') && !l.starts_with("---"))
            .collect();
        assert_eq!(removed, [&"-drop me".to_owned()]);
    }

    #[test]
    fn empty_old_side_is_all_additions() {
        let new = to_lines(&["alpha", "beta"]);
        let diff = render_unified(&[], &new, "a", "b");

        let added = diff
            .iter()
            .filter(|l| l.starts_with('+') && !l.starts_with("+++"))
            .count();
        assert_eq!(added, 2);
    }
}
