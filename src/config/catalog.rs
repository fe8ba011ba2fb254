//! The built-in table of managed files for each platform.

use crate::filters::{GitConfigCopyFilter, GitConfigDiffFilter, ProfileDiffFilter};
use crate::platform::Platform;

use super::FileSpec;

/// Build the list of files managed on `platform`.
///
/// A handful of files are shared across platforms; the rest are
/// platform-specific, either because the file only makes sense there or
/// because the destination path differs.
#[must_use]
pub fn managed_files(platform: Platform) -> Vec<FileSpec> {
    let mut specs = vec![
        FileSpec::new(".bash_aliases"),
        FileSpec::new(".vimrc"),
        FileSpec::new("git_mysync.py").with_target("~/bin/git_mysync.py"),
    ];

    if platform.is_windows() {
        specs.extend([
            FileSpec::new("win_git_bash.profile")
                .with_target(".profile")
                .with_diff_filter(ProfileDiffFilter),
            FileSpec::new("win.bashrc").with_target(".bashrc"),
            FileSpec::new(".gitconfig")
                .with_target("~/AppData/Local/Programs/Git/etc/gitconfig")
                .with_copy_filter(GitConfigCopyFilter)
                .with_diff_filter(GitConfigDiffFilter::new(platform)),
        ]);
    } else {
        specs.extend([
            FileSpec::new(".gitconfig").with_diff_filter(GitConfigDiffFilter::new(platform)),
            FileSpec::new(".perlcriticrc"),
            FileSpec::new(".perltidyrc"),
            FileSpec::new(".screenrc"),
            FileSpec::new("config_git_ignore").with_target("~/.config/git/ignore"),
        ]);
    }

    specs
}
