use anyhow::Result;

use crate::cli::{ApplyOpts, GlobalOpts};
use crate::config;
use crate::exec::SystemExecutor;
use crate::install::{self, Context, InstallOpts};
use crate::logging::Logger;
use crate::platform::Platform;

/// Run the apply command: reconcile and install the whole catalog.
///
/// # Errors
///
/// Returns an error if the repository root cannot be resolved, the home
/// directory is unknown, or any file failed to process.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Logger) -> Result<()> {
    let platform = Platform::detect();
    let root = super::resolve_root(global)?;

    let version = option_env!("DOTSKEL_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("dotskel {version}"));
    log.debug(&format!("root: {}", root.display()));

    let install_opts = InstallOpts {
        copy: opts.copy,
        interactive: opts.interactive,
        merge: opts.mergetool,
        // Interactive mode always falls back to the unfiltered diff, so the
        // user sees what a clobber would change before answering.
        unfiltered: opts.unfiltered || opts.interactive,
    };
    let executor = SystemExecutor;
    let ctx = Context::new(
        super::skel_dir(&root),
        platform,
        global.dry_run,
        install_opts,
        log,
        &executor,
    )?;

    let specs = config::managed_files(platform);
    log.stage(&format!("Processing {} managed files", specs.len()));
    install::process_files(&ctx, &specs);

    log.print_summary();

    if global.dry_run {
        log.info("\x1b[1m*** REMINDER: This was a dry-run! ***\x1b[0m");
    }

    if log.has_failures() {
        anyhow::bail!("{} file(s) failed", log.failure_count());
    }
    Ok(())
}
