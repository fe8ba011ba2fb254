//! Read-only comparison of skel sources against their installed destinations.
//!
//! Reconciling never touches the filesystem beyond reading the two files.
//! Classification is a pure function of the source text, the destination
//! text (or its absence), and the file spec's filters, so repeated runs
//! over unchanged files always produce the same answer.

mod diff;

pub use diff::render_unified;

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::config::FileSpec;
use crate::error::ReconcileError;
use crate::filters::split_lines;

/// How an installed file relates to its skel source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// The destination does not exist yet.
    Missing,
    /// Source and destination are byte-for-byte identical.
    Identical,
    /// The destination already matches the copy-filtered source.
    Equivalent,
    /// Raw contents differ, but the diff filter removes every difference.
    Insignificant,
    /// Contents differ beyond what the filters account for.
    Differs {
        /// Unified diff of the filtered views, destination side first.
        diff: Vec<String>,
    },
}

impl Comparison {
    /// Whether the destination already holds the intended content.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Identical | Self::Equivalent)
    }
}

/// The outcome of comparing one managed file, with everything the caller
/// needs to present or resolve the difference.
#[derive(Debug)]
pub struct Reconciliation<'a> {
    spec: &'a FileSpec,
    /// Absolute path of the skel source.
    pub source_path: PathBuf,
    /// Absolute path of the installed destination.
    pub dest_path: PathBuf,
    /// Diff label for the destination side.
    pub dest_label: String,
    /// Diff label for the source side.
    pub source_label: String,
    /// The classification of the pair.
    pub comparison: Comparison,
    source_text: String,
    dest_text: Option<String>,
}

impl<'a> Reconciliation<'a> {
    /// The file spec this reconciliation was built from.
    #[must_use]
    pub const fn spec(&self) -> &'a FileSpec {
        self.spec
    }

    /// The copy-filtered source lines, the content a resolution would
    /// install.
    #[must_use]
    pub fn filtered_source_lines(&self) -> Vec<String> {
        self.spec
            .copy_filter()
            .apply(&split_lines(&self.source_text))
    }

    /// The exact text an install writes to the destination.
    ///
    /// Without a copy filter this is the source verbatim. With one, the
    /// filtered lines are joined with `\n`, keeping a trailing newline
    /// only if the source had one.
    #[must_use]
    pub fn install_text(&self) -> String {
        if !self.spec.has_copy_filter() {
            return self.source_text.clone();
        }
        let mut text = self.filtered_source_lines().join("\n");
        if self.source_text.ends_with('\n') {
            text.push('\n');
        }
        text
    }

    /// Unified diff of the raw lines, bypassing the diff filter.
    ///
    /// The source side is still copy-filtered, so the diff shows what an
    /// install would actually change. Empty when the destination is
    /// missing.
    #[must_use]
    pub fn unfiltered_diff(&self) -> Vec<String> {
        let Some(dest_text) = self.dest_text.as_deref() else {
            return Vec::new();
        };
        render_unified(
            &split_lines(dest_text),
            &self.filtered_source_lines(),
            &self.dest_label,
            &self.source_label,
        )
    }
}

/// Compares managed files against their installed destinations.
#[derive(Debug)]
pub struct Reconciler {
    skel_dir: PathBuf,
    home: PathBuf,
}

impl Reconciler {
    /// Create a reconciler resolving sources under `skel_dir` and
    /// destinations under `home`.
    #[must_use]
    pub const fn new(skel_dir: PathBuf, home: PathBuf) -> Self {
        Self { skel_dir, home }
    }

    /// Read both sides of `spec` and classify their relationship.
    ///
    /// A missing destination is a first-class outcome, not an error. A
    /// missing source is an error, since the skel directory defines what
    /// should exist.
    pub fn reconcile<'a>(&self, spec: &'a FileSpec) -> Result<Reconciliation<'a>, ReconcileError> {
        let source_path = spec.source_path(&self.skel_dir);
        let dest_path = spec.dest_path(&self.home);

        let source_text = match fs::read_to_string(&source_path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ReconcileError::MissingSource { path: source_path });
            }
            Err(err) => {
                return Err(ReconcileError::Read {
                    path: source_path,
                    source: err,
                });
            }
        };
        let dest_text = match fs::read_to_string(&dest_path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                return Err(ReconcileError::Read {
                    path: dest_path,
                    source: err,
                });
            }
        };

        let dest_label = format!("local/{}", spec.dest_name());
        let source_label = format!("skel/{}", spec.source);
        let comparison = classify(
            spec,
            &source_text,
            dest_text.as_deref(),
            &dest_label,
            &source_label,
        );

        Ok(Reconciliation {
            spec,
            source_path,
            dest_path,
            dest_label,
            source_label,
            comparison,
            source_text,
            dest_text,
        })
    }
}

fn classify(
    spec: &FileSpec,
    source_text: &str,
    dest_text: Option<&str>,
    dest_label: &str,
    source_label: &str,
) -> Comparison {
    let Some(dest_text) = dest_text else {
        return Comparison::Missing;
    };
    if source_text == dest_text {
        return Comparison::Identical;
    }

    // The destination is never copy-filtered; it already went through the
    // filter when it was installed.
    let src_lines = spec.copy_filter().apply(&split_lines(source_text));
    let dst_lines = split_lines(dest_text);
    if src_lines == dst_lines {
        return Comparison::Equivalent;
    }

    // Destination first, so the diff reads as what a resolution would do
    // to the installed file.
    let old = spec.diff_filter().apply(&dst_lines);
    let new = spec.diff_filter().apply(&src_lines);
    if old == new {
        return Comparison::Insignificant;
    }
    Comparison::Differs {
        diff: render_unified(&old, &new, dest_label, source_label),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::filters::{GitConfigCopyFilter, GitConfigDiffFilter, LineFilter};
    use crate::platform::{Os, Platform};
    use std::path::Path;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        reconciler: Reconciler,
        skel: PathBuf,
        home: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().expect("tempdir");
        let skel = tmp.path().join("skel");
        let home = tmp.path().join("home");
        fs::create_dir_all(&skel).expect("create skel");
        fs::create_dir_all(&home).expect("create home");
        Fixture {
            reconciler: Reconciler::new(skel.clone(), home.clone()),
            skel,
            home,
            _tmp: tmp,
        }
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).expect("write fixture file");
    }

    /// A filter that fails the test if it is ever applied.
    #[derive(Debug)]
    struct UnreachableFilter;

    impl LineFilter for UnreachableFilter {
        fn apply(&self, _lines: &[String]) -> Vec<String> {
            panic!("filter must not run for this comparison");
        }
    }

    #[test]
    fn missing_destination() {
        let fx = fixture();
        write(&fx.skel, ".vimrc", "set number\n");

        let spec = FileSpec::new(".vimrc");
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.comparison, Comparison::Missing);
        assert!(rec.unfiltered_diff().is_empty());
        assert_eq!(rec.dest_path, fx.home.join(".vimrc"));
    }

    #[test]
    fn identical_files() {
        let fx = fixture();
        write(&fx.skel, ".vimrc", "set number\n");
        write(&fx.home, ".vimrc", "set number\n");

        let spec = FileSpec::new(".vimrc");
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.comparison, Comparison::Identical);
        assert!(rec.comparison.is_settled());
    }

    #[test]
    fn identical_files_never_run_filters() {
        let fx = fixture();
        write(&fx.skel, ".gitconfig", "[user]\nname = h\n");
        write(&fx.home, ".gitconfig", "[user]\nname = h\n");

        // Byte-equal pairs short-circuit before either filter is consulted.
        let spec = FileSpec::new(".gitconfig")
            .with_copy_filter(UnreachableFilter)
            .with_diff_filter(UnreachableFilter);
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.comparison, Comparison::Identical);
    }

    #[test]
    fn classification_is_stable_across_repeated_runs() {
        let fx = fixture();
        write(&fx.skel, ".vimrc", "set number\nsyntax on\n");
        write(&fx.home, ".vimrc", "set number\n");

        let spec = FileSpec::new(".vimrc");
        let first = fx.reconciler.reconcile(&spec).expect("first run");
        let second = fx.reconciler.reconcile(&spec).expect("second run");

        assert_eq!(first.comparison, second.comparison);
        assert_eq!(first.unfiltered_diff(), second.unfiltered_diff());
    }

    #[test]
    fn copy_filtered_source_matches_destination() {
        let fx = fixture();
        write(&fx.skel, ".gitconfig", "#w[user]\nname = h\n");
        write(&fx.home, ".gitconfig", "[user]\nname = h\n");

        let spec = FileSpec::new(".gitconfig").with_copy_filter(GitConfigCopyFilter);
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.comparison, Comparison::Equivalent);
    }

    #[test]
    fn trailing_newline_only_difference_is_equivalent() {
        let fx = fixture();
        write(&fx.skel, ".screenrc", "startup_message off");
        write(&fx.home, ".screenrc", "startup_message off\n");

        let spec = FileSpec::new(".screenrc");
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.comparison, Comparison::Equivalent);
    }

    #[test]
    fn filtered_away_noise_is_insignificant() {
        let fx = fixture();
        write(&fx.skel, ".gitconfig", "[credential]\nhelper = store\n");
        write(&fx.home, ".gitconfig", "[credential]\nhelper = cache\n");

        let spec = FileSpec::new(".gitconfig")
            .with_diff_filter(GitConfigDiffFilter::new(Platform::new(Os::Linux)));
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.comparison, Comparison::Insignificant);
        // The raw difference is still visible on request.
        assert!(!rec.unfiltered_diff().is_empty());
    }

    #[test]
    fn added_line_produces_labeled_diff() {
        let fx = fixture();
        write(&fx.skel, ".vimrc", "set number\nsyntax on\n");
        write(&fx.home, ".vimrc", "set number\n");

        let spec = FileSpec::new(".vimrc");
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        let Comparison::Differs { diff } = &rec.comparison else {
            panic!("expected Differs, got {:?}", rec.comparison);
        };
        assert_eq!(diff[0], "--- local/.vimrc");
        assert_eq!(diff[1], "+++ skel/.vimrc");
        let added: Vec<&String> = diff
            .iter()
            .filter(|l| l.starts_with('+') && !l.starts_with("+++"))
            .collect();
        assert_eq!(added, [&"+syntax on".to_owned()]);
    }

    #[test]
    fn diff_labels_use_destination_override() {
        let fx = fixture();
        write(&fx.skel, "config_git_ignore", "*.swp\n");
        fs::create_dir_all(fx.home.join(".config/git")).expect("create config dir");
        write(&fx.home.join(".config/git"), "ignore", "*.bak\n");

        let spec = FileSpec::new("config_git_ignore").with_target("~/.config/git/ignore");
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        let Comparison::Differs { diff } = &rec.comparison else {
            panic!("expected Differs, got {:?}", rec.comparison);
        };
        assert_eq!(diff[0], "--- local/~/.config/git/ignore");
        assert_eq!(diff[1], "+++ skel/config_git_ignore");
    }

    #[test]
    fn missing_source_is_an_error() {
        let fx = fixture();
        let spec = FileSpec::new(".vimrc");

        let err = fx.reconciler.reconcile(&spec).expect_err("must fail");
        assert!(matches!(err, ReconcileError::MissingSource { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_destination_is_an_error() {
        let fx = fixture();
        write(&fx.skel, ".vimrc", "set number\n");
        fs::create_dir_all(fx.home.join(".vimrc")).expect("create dir in place of file");

        let spec = FileSpec::new(".vimrc");
        let err = fx.reconciler.reconcile(&spec).expect_err("must fail");
        assert!(matches!(err, ReconcileError::Read { .. }));
    }

    #[test]
    fn install_text_is_verbatim_without_copy_filter() {
        let fx = fixture();
        write(&fx.skel, ".vimrc", "set number\r\nsyntax on");

        let spec = FileSpec::new(".vimrc");
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.install_text(), "set number\r\nsyntax on");
    }

    #[test]
    fn install_text_applies_copy_filter() {
        let fx = fixture();
        write(&fx.skel, ".gitconfig", "#w[user]\nname = h\n");

        let spec = FileSpec::new(".gitconfig").with_copy_filter(GitConfigCopyFilter);
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.install_text(), "[user]\nname = h\n");
    }

    #[test]
    fn install_text_keeps_missing_trailing_newline() {
        let fx = fixture();
        write(&fx.skel, ".gitconfig", "#w[user]");

        let spec = FileSpec::new(".gitconfig").with_copy_filter(GitConfigCopyFilter);
        let rec = fx.reconciler.reconcile(&spec).expect("reconcile");

        assert_eq!(rec.install_text(), "[user]");
    }
}
