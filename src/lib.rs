//! Skeleton dotfiles installer.
//!
//! Reconciles a repository `skel/` tree against the user's home directory.
//! Every managed file is classified (missing, identical, equivalent under
//! filters, or diverging) and installed by hard link or filtered copy.
//! Existing files are never clobbered silently: divergence is shown as a
//! unified diff and resolved only on explicit confirmation or through an
//! external merge tool.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: the managed-file catalog and per-file install rules
//! - **[`filters`]**: line filters hiding expected per-machine differences
//! - **[`reconcile`]**: read, classify, and diff source/destination pairs
//! - **[`install`]**: act on classifications (link, copy, prompt, merge)
//! - **[`commands`]**: top-level subcommand orchestration (`apply`, `diff`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod filters;
pub mod install;
pub mod logging;
pub mod platform;
pub mod reconcile;
pub mod render;
