use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the skel installer.
#[derive(Parser, Debug)]
#[command(
    name = "dotskel",
    about = "Skeleton dotfiles installer with filtered diff previews",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Override the repository root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install the managed files into the home directory
    Apply(ApplyOpts),
    /// Show how installed files differ from the skel tree, changing nothing
    Diff(DiffOpts),
    /// Print version information
    Version,
    /// Generate shell completions
    Completions(CompletionsOpts),
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Copy instead of hard link
    #[arg(short, long)]
    pub copy: bool,

    /// Prompt whether to clobber changed files (implies -d)
    #[arg(short, long, conflicts_with = "mergetool")]
    pub interactive: bool,

    /// Run a merge tool (Meld or WinMerge) on changed files
    #[arg(short, long)]
    pub mergetool: bool,

    /// Show the diff without filters when files differ insignificantly
    #[arg(short = 'd', long)]
    pub unfiltered: bool,
}

/// Options for the `diff` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct DiffOpts {
    /// Show the diff without filters when files differ insignificantly
    #[arg(short = 'd', long)]
    pub unfiltered: bool,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply() {
        let cli = Cli::parse_from(["dotskel", "apply"]);
        assert!(matches!(cli.command, Command::Apply(_)));
        assert!(!cli.verbose);
        assert!(!cli.global.dry_run);
    }

    #[test]
    fn parse_apply_all_flags() {
        let cli = Cli::parse_from(["dotskel", "apply", "-c", "-i", "-d"]);
        let Command::Apply(opts) = cli.command else {
            panic!("expected apply");
        };
        assert!(opts.copy);
        assert!(opts.interactive);
        assert!(opts.unfiltered);
        assert!(!opts.mergetool);
    }

    #[test]
    fn parse_apply_mergetool() {
        let cli = Cli::parse_from(["dotskel", "apply", "--mergetool"]);
        let Command::Apply(opts) = cli.command else {
            panic!("expected apply");
        };
        assert!(opts.mergetool);
    }

    #[test]
    fn interactive_conflicts_with_mergetool() {
        let result = Cli::try_parse_from(["dotskel", "apply", "-i", "-m"]);
        assert!(result.is_err(), "-i and -m together should be rejected");
    }

    #[test]
    fn parse_dry_run() {
        let cli = Cli::parse_from(["dotskel", "-n", "apply"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_dry_run_long() {
        let cli = Cli::parse_from(["dotskel", "--dry-run", "apply"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["dotskel", "-v", "apply"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["dotskel", "--root", "/tmp/skelrepo", "diff"]);
        assert_eq!(
            cli.global.root,
            Some(std::path::PathBuf::from("/tmp/skelrepo"))
        );
    }

    #[test]
    fn parse_diff_unfiltered() {
        let cli = Cli::parse_from(["dotskel", "diff", "-d"]);
        let Command::Diff(opts) = cli.command else {
            panic!("expected diff");
        };
        assert!(opts.unfiltered);
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["dotskel", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["dotskel", "completions", "bash"]);
        assert!(matches!(cli.command, Command::Completions(_)));
    }

    #[test]
    fn diff_rejects_apply_only_flags() {
        let result = Cli::try_parse_from(["dotskel", "diff", "-m"]);
        assert!(result.is_err(), "diff has no merge tool flag");
    }
}
