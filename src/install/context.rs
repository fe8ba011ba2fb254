use std::path::PathBuf;

use anyhow::Result;

use crate::exec::Executor;
use crate::logging::Logger;
use crate::platform::Platform;

/// Behavior switches for a run, resolved from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOpts {
    /// Copy files into place instead of hard linking them.
    pub copy: bool,
    /// Prompt before clobbering a destination that differs.
    pub interactive: bool,
    /// Hand differing files to an external merge tool.
    pub merge: bool,
    /// Show the diff without the diff filter when the filtered one is empty.
    pub unfiltered: bool,
}

/// Shared context for processing the managed-file list.
pub struct Context<'a> {
    /// Root of the skel tree holding the source files.
    pub skel_dir: PathBuf,
    /// User's home directory path.
    pub home: PathBuf,
    /// Detected platform information.
    pub platform: Platform,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// Behavior switches from the command line.
    pub opts: InstallOpts,
    /// Logger for output and per-file recording.
    pub log: &'a Logger,
    /// Command executor (for testing or real merge-tool invocations).
    pub executor: &'a dyn Executor,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("skel_dir", &self.skel_dir)
            .field("home", &self.home)
            .field("platform", &self.platform)
            .field("dry_run", &self.dry_run)
            .field("opts", &self.opts)
            .field("log", &"<Logger>")
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl<'a> Context<'a> {
    /// Creates a new context for an install or diff run.
    ///
    /// # Errors
    ///
    /// Returns an error if the HOME (or USERPROFILE on Windows) environment
    /// variable is not set.
    pub fn new(
        skel_dir: PathBuf,
        platform: Platform,
        dry_run: bool,
        opts: InstallOpts,
        log: &'a Logger,
        executor: &'a dyn Executor,
    ) -> Result<Self> {
        let home = if cfg!(target_os = "windows") {
            std::env::var("USERPROFILE")
                .or_else(|_| std::env::var("HOME"))
                .map_err(|_| {
                    anyhow::anyhow!("neither USERPROFILE nor HOME environment variable is set")
                })?
        } else {
            std::env::var("HOME")
                .map_err(|_| anyhow::anyhow!("HOME environment variable is not set"))?
        };

        Ok(Self {
            skel_dir,
            home: PathBuf::from(home),
            platform,
            dry_run,
            opts,
            log,
            executor,
        })
    }
}
