use anyhow::Result;

use crate::cli::{DiffOpts, GlobalOpts};
use crate::config;
use crate::exec::SystemExecutor;
use crate::install::{self, Context, InstallOpts};
use crate::logging::Logger;
use crate::platform::Platform;

/// Run the diff command: classify and report every managed file without
/// touching anything.
///
/// # Errors
///
/// Returns an error if the repository root cannot be resolved, the home
/// directory is unknown, or any file failed to compare.
pub fn run(global: &GlobalOpts, opts: &DiffOpts, log: &Logger) -> Result<()> {
    let platform = Platform::detect();
    let root = super::resolve_root(global)?;

    let version = option_env!("DOTSKEL_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("dotskel {version}"));
    log.debug(&format!("root: {}", root.display()));

    let install_opts = InstallOpts {
        unfiltered: opts.unfiltered,
        ..InstallOpts::default()
    };
    let executor = SystemExecutor;
    let ctx = Context::new(
        super::skel_dir(&root),
        platform,
        false,
        install_opts,
        log,
        &executor,
    )?;

    let specs = config::managed_files(platform);
    log.stage(&format!("Comparing {} managed files", specs.len()));
    install::report_files(&ctx, &specs);

    log.print_summary();

    if log.has_failures() {
        anyhow::bail!("{} file(s) failed", log.failure_count());
    }
    Ok(())
}
