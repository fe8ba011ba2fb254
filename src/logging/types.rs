//! Core logging types: per-file entries and statuses.

/// Per-file outcome for summary reporting.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Destination display name.
    pub name: String,
    /// Final status of the file.
    pub status: FileStatus,
    /// Optional detail message (e.g., action taken or error description).
    pub message: Option<String>,
}

/// Status of one processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Destination already matched the source, raw or after filtering.
    UpToDate,
    /// Content was copied or linked into place.
    Installed,
    /// Destination still differs from the source after this run.
    Differs,
    /// Dry-run mode; the pending action was only reported.
    DryRun,
    /// Processing encountered an error and could not complete.
    Failed,
}
