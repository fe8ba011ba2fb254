// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed skel repository with a fake home
// directory and a fluent builder so each integration test can set up an
// isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotskel_cli::exec::Executor;
use dotskel_cli::install::{Context, InstallOpts};
use dotskel_cli::logging::Logger;
use dotskel_cli::platform::{Os, Platform};

/// Write a plausible source file for every entry in the Linux catalog into
/// `skel`, so the full managed-file list reconciles cleanly against the tree.
///
/// Creates:
/// - `.bash_aliases`: a couple of shell aliases
/// - `.vimrc`: minimal vim settings
/// - `git_mysync.py`: the sync helper script
/// - `.gitconfig`: user and core sections
/// - `.perlcriticrc`
/// - `.perltidyrc`
/// - `.screenrc`
/// - `config_git_ignore`: global git ignore patterns
pub fn setup_default_skel(skel: &Path) {
    let files: &[(&str, &str)] = &[
        (".bash_aliases", "alias ll='ls -al'\nalias gs='git status'\n"),
        (".vimrc", "set nocompatible\nset number\nsyntax on\n"),
        ("git_mysync.py", "#!/usr/bin/env python3\nprint('sync')\n"),
        (
            ".gitconfig",
            "[user]\n\tname = Skel User\n[core]\n\tautocrlf = input\n",
        ),
        (".perlcriticrc", "severity = 3\n"),
        (".perltidyrc", "-l=100\n"),
        (".screenrc", "startup_message off\n"),
        ("config_git_ignore", "*.swp\n*.orig\n"),
    ];
    for (name, content) in files {
        std::fs::write(skel.join(name), content).expect("write skel file");
    }
}

/// An isolated skel repository and fake home directory backed by a
/// [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped (via the underlying
/// [`tempfile::TempDir`]).
pub struct IntegrationTestContext {
    /// Temporary directory containing `skel/` and `home/` subdirectories.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with the default skel tree and an empty home.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let skel = root.path().join("skel");
        std::fs::create_dir_all(&skel).expect("create skel dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        setup_default_skel(&skel);
        Self { root }
    }

    /// Path to the temporary root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the skel directory holding the source files.
    pub fn skel_dir(&self) -> PathBuf {
        self.root.path().join("skel")
    }

    /// Path to the fake home directory files are installed into.
    pub fn home_dir(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Build an install context targeting Linux.
    pub fn context<'a>(
        &self,
        opts: InstallOpts,
        dry_run: bool,
        log: &'a Logger,
        executor: &'a dyn Executor,
    ) -> Context<'a> {
        self.context_for_platform(Platform::new(Os::Linux), opts, dry_run, log, executor)
    }

    /// Build an install context for an explicit platform.
    ///
    /// Use this variant in tests that need to control platform-specific
    /// behaviour (copy-everything on Windows, filter branches) without
    /// depending on the host OS the test suite runs on.
    pub fn context_for_platform<'a>(
        &self,
        platform: Platform,
        opts: InstallOpts,
        dry_run: bool,
        log: &'a Logger,
        executor: &'a dyn Executor,
    ) -> Context<'a> {
        Context {
            skel_dir: self.skel_dir(),
            home: self.home_dir(),
            platform,
            dry_run,
            opts,
            log,
            executor,
        }
    }

    /// Read an installed file relative to the fake home directory.
    pub fn read_home(&self, rel: &str) -> String {
        std::fs::read_to_string(self.home_dir().join(rel)).expect("read installed file")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
///
/// Allows individual tests to customise the skel tree or pre-populate the
/// home directory before the context is finalised.
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context backed by the default skel tree.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `skel/<name>`, overwriting any file written by
    /// [`setup_default_skel`].
    pub fn with_skel_file(self, name: &str, content: &str) -> Self {
        let path = self.ctx.skel_dir().join(name);
        std::fs::write(path, content).expect("write skel file");
        self
    }

    /// Create a pre-existing file in the fake home directory, including any
    /// intermediate directories.
    pub fn with_home_file(self, name: &str, content: &str) -> Self {
        let path = self.ctx.home_dir().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home file parent");
        }
        std::fs::write(&path, content).expect("write home file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// Whether two paths refer to the same inode (i.e. are hard links).
#[cfg(unix)]
pub fn same_inode(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt as _;
    let meta_a = std::fs::metadata(a).expect("stat first path");
    let meta_b = std::fs::metadata(b).expect("stat second path");
    meta_a.ino() == meta_b.ino() && meta_a.dev() == meta_b.dev()
}

/// Recursively list every file under `dir`, in no particular order.
pub fn tree_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            files.extend(tree_files(&path));
        } else {
            files.push(path);
        }
    }
    files
}
