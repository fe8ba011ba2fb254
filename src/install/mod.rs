//! The installer: walk the managed-file list, reconcile each entry, and
//! act on the outcome.
//!
//! Files that are already settled are left alone (though link mode
//! refreshes the hard link), missing destinations are installed outright,
//! and divergent files are shown as a diff and only ever clobbered after
//! explicit confirmation or handed to a merge tool. A failure on one file
//! is recorded and the walk continues.

mod context;
mod merge;
mod prompt;
mod writer;

pub use context::{Context, InstallOpts};

use anyhow::Result;

use crate::config::FileSpec;
use crate::logging::FileStatus;
use crate::reconcile::{Comparison, Reconciler, Reconciliation};
use crate::render;

/// Reconcile and install every spec in order.
pub fn process_files(ctx: &Context<'_>, specs: &[FileSpec]) {
    let reconciler = Reconciler::new(ctx.skel_dir.clone(), ctx.home.clone());
    for spec in specs {
        if let Err(e) = process_single(ctx, &reconciler, spec) {
            ctx.log
                .error(&format!("failed to process {}: {e:#}", spec.dest_name()));
            ctx.log
                .record_file(spec.dest_name(), FileStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}

/// Reconcile every spec and report, without ever writing.
pub fn report_files(ctx: &Context<'_>, specs: &[FileSpec]) {
    let reconciler = Reconciler::new(ctx.skel_dir.clone(), ctx.home.clone());
    for spec in specs {
        if let Err(e) = report_single(ctx, &reconciler, spec) {
            ctx.log
                .error(&format!("failed to diff {}: {e:#}", spec.dest_name()));
            ctx.log
                .record_file(spec.dest_name(), FileStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}

fn process_single(ctx: &Context<'_>, reconciler: &Reconciler, spec: &FileSpec) -> Result<()> {
    ctx.log.info(&render::file_banner(
        &spec.source_path(&ctx.skel_dir),
        &spec.dest_path(&ctx.home),
    ));
    let rec = reconciler.reconcile(spec)?;
    match &rec.comparison {
        Comparison::Missing => {
            ctx.log.info("Destination doesn't exist");
            install_file(ctx, &rec)
        }
        Comparison::Identical => refresh_identical(ctx, &rec),
        Comparison::Equivalent => {
            ctx.log
                .info("Raw files differ, but are identical after applying filter");
            ctx.log.record_file(
                rec.spec().dest_name(),
                FileStatus::UpToDate,
                Some("identical after filtering"),
            );
            Ok(())
        }
        Comparison::Insignificant => resolve_divergence(ctx, &rec, None),
        Comparison::Differs { diff } => resolve_divergence(ctx, &rec, Some(diff.as_slice())),
    }
}

fn report_single(ctx: &Context<'_>, reconciler: &Reconciler, spec: &FileSpec) -> Result<()> {
    ctx.log.info(&render::file_banner(
        &spec.source_path(&ctx.skel_dir),
        &spec.dest_path(&ctx.home),
    ));
    let rec = reconciler.reconcile(spec)?;
    let name = rec.spec().dest_name();
    match &rec.comparison {
        Comparison::Missing => {
            ctx.log.info("Destination doesn't exist");
            ctx.log
                .record_file(name, FileStatus::Differs, Some("missing"));
        }
        Comparison::Identical => {
            ctx.log.info("Files are 100% identical");
            ctx.log
                .record_file(name, FileStatus::UpToDate, Some("identical"));
        }
        Comparison::Equivalent => {
            ctx.log
                .info("Raw files differ, but are identical after applying filter");
            ctx.log
                .record_file(name, FileStatus::UpToDate, Some("identical after filtering"));
        }
        Comparison::Insignificant => {
            report_divergence(ctx, &rec, None);
            ctx.log.record_file(name, FileStatus::Differs, None);
        }
        Comparison::Differs { diff } => {
            report_divergence(ctx, &rec, Some(diff.as_slice()));
            ctx.log.record_file(name, FileStatus::Differs, None);
        }
    }
    Ok(())
}

/// Whether `spec` is installed by copying rather than hard linking.
///
/// Copy filters force a copy (the installed content is not the raw
/// source), and Windows filesystems make hard-linked dotfiles more
/// trouble than they are worth.
fn copy_mode(ctx: &Context<'_>, spec: &FileSpec) -> bool {
    ctx.platform.is_windows() || ctx.opts.copy || spec.has_copy_filter()
}

/// Install the reconciled file by copy or hard link, honoring dry-run.
fn install_file(ctx: &Context<'_>, rec: &Reconciliation<'_>) -> Result<()> {
    let name = rec.spec().dest_name();
    let src = rec.source_path.display();
    let dst = rec.dest_path.display();
    if copy_mode(ctx, rec.spec()) {
        if ctx.dry_run {
            ctx.log.dry_run(&format!("would copy {src} => {dst}"));
            ctx.log
                .record_file(name, FileStatus::DryRun, Some("would copy"));
        } else {
            ctx.log.info(&format!("Copying {src} => {dst}"));
            writer::copy_into_place(&rec.dest_path, &rec.install_text())?;
            ctx.log
                .record_file(name, FileStatus::Installed, Some("copied"));
        }
    } else if ctx.dry_run {
        ctx.log.dry_run(&format!("would link {src} => {dst}"));
        ctx.log
            .record_file(name, FileStatus::DryRun, Some("would link"));
    } else {
        ctx.log.info(&format!("Linking {src} => {dst}"));
        writer::replace_with_link(&rec.source_path, &rec.dest_path)?;
        ctx.log
            .record_file(name, FileStatus::Installed, Some("linked"));
    }
    Ok(())
}

fn refresh_identical(ctx: &Context<'_>, rec: &Reconciliation<'_>) -> Result<()> {
    let name = rec.spec().dest_name();
    if copy_mode(ctx, rec.spec()) {
        ctx.log.info("Files are 100% identical, don't need to copy");
    } else if ctx.dry_run {
        ctx.log.info("Files are 100% identical");
        ctx.log.debug("would refresh the hard link");
    } else {
        // Re-link so the destination really is a hard link to the source,
        // not just an unrelated file with equal content.
        ctx.log.info(&format!(
            "Files are 100% identical, linking {} => {}",
            rec.source_path.display(),
            rec.dest_path.display()
        ));
        writer::replace_with_link(&rec.source_path, &rec.dest_path)?;
    }
    ctx.log
        .record_file(name, FileStatus::UpToDate, Some("identical"));
    Ok(())
}

/// Show what differs, then apply the user's chosen resolution.
fn resolve_divergence(
    ctx: &Context<'_>,
    rec: &Reconciliation<'_>,
    diff: Option<&[String]>,
) -> Result<()> {
    let name = rec.spec().dest_name();
    report_divergence(ctx, rec, diff);

    if ctx.opts.interactive {
        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would prompt whether to clobber {}",
                rec.dest_path.display()
            ));
            ctx.log
                .record_file(name, FileStatus::DryRun, Some("would prompt"));
        } else if prompt::confirm_clobber()? {
            install_file(ctx, rec)?;
        } else {
            ctx.log
                .record_file(name, FileStatus::Differs, Some("left unchanged"));
        }
    } else if ctx.opts.merge {
        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would run the merge tool on {}",
                rec.dest_path.display()
            ));
            ctx.log
                .record_file(name, FileStatus::DryRun, Some("would merge"));
        } else {
            merge::run_merge_tool(ctx, rec)?;
            ctx.log
                .record_file(name, FileStatus::Differs, Some("handed to merge tool"));
        }
    } else {
        ctx.log.record_file(name, FileStatus::Differs, None);
    }
    Ok(())
}

/// Print the filtered diff, or explain that only insignificant
/// differences remain (optionally with the unfiltered diff).
fn report_divergence(ctx: &Context<'_>, rec: &Reconciliation<'_>, diff: Option<&[String]>) {
    match diff {
        Some(lines) => {
            for line in lines {
                ctx.log.info(&render::colorize_diff_line(line));
            }
        }
        None if ctx.opts.unfiltered => {
            ctx.log
                .info("Files differ, but not significantly - diff without filters:");
            for line in rec.unfiltered_diff() {
                ctx.log.info(&render::colorize_diff_line(&line));
            }
        }
        None => ctx.log.info("Files differ, but not significantly"),
    }
}
