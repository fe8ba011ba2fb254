//! The managed-file model: what gets installed, where, and with which filters.

mod catalog;

pub use catalog::managed_files;

use std::path::{Path, PathBuf};

use crate::filters::{LineFilter, NullFilter};

static NULL_FILTER: NullFilter = NullFilter;

/// One managed file: its source name in the skel directory, an optional
/// destination override, and its filters.
///
/// Specs are built once at startup by [`managed_files`] and never mutated.
/// When `target` is absent the destination name equals the source name.
/// Absent filters behave as the identity transform.
#[derive(Debug)]
pub struct FileSpec {
    /// File name under the skel directory.
    pub source: String,
    /// Destination override; may carry a `~/` prefix or be relative to the
    /// home directory.
    pub target: Option<String>,
    copy_filter: Option<Box<dyn LineFilter>>,
    diff_filter: Option<Box<dyn LineFilter>>,
}

impl FileSpec {
    /// Create a spec installing `source` under the same name in the home
    /// directory, with no filters.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: None,
            copy_filter: None,
            diff_filter: None,
        }
    }

    /// Override the destination path.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the filter applied to source content before it is written.
    #[must_use]
    pub fn with_copy_filter(mut self, filter: impl LineFilter + 'static) -> Self {
        self.copy_filter = Some(Box::new(filter));
        self
    }

    /// Set the filter applied to both sides before diffing.
    #[must_use]
    pub fn with_diff_filter(mut self, filter: impl LineFilter + 'static) -> Self {
        self.diff_filter = Some(Box::new(filter));
        self
    }

    /// The destination display name: the target override, or the source name.
    #[must_use]
    pub fn dest_name(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.source)
    }

    /// Whether this spec normalizes content on copy.
    ///
    /// Files with a copy filter must always be copied, never hard-linked,
    /// since the written content differs from the source.
    #[must_use]
    pub const fn has_copy_filter(&self) -> bool {
        self.copy_filter.is_some()
    }

    /// The copy filter, defaulting to the identity transform.
    #[must_use]
    pub fn copy_filter(&self) -> &dyn LineFilter {
        self.copy_filter.as_deref().unwrap_or(&NULL_FILTER)
    }

    /// The diff filter, defaulting to the identity transform.
    #[must_use]
    pub fn diff_filter(&self) -> &dyn LineFilter {
        self.diff_filter.as_deref().unwrap_or(&NULL_FILTER)
    }

    /// Absolute path of the source file under `skel_dir`.
    #[must_use]
    pub fn source_path(&self, skel_dir: &Path) -> PathBuf {
        skel_dir.join(&self.source)
    }

    /// Absolute destination path, resolved against `home`.
    ///
    /// A `~/` prefix is replaced by `home`, a relative path is joined under
    /// `home`, and an absolute path is used as-is.
    #[must_use]
    pub fn dest_path(&self, home: &Path) -> PathBuf {
        let name = self.dest_name();
        if let Some(rest) = name.strip_prefix("~/") {
            return home.join(rest);
        }
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            home.join(path)
        }
    }
}
