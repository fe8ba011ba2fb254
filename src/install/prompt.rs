//! Interactive clobber confirmation.

use std::io::Write as _;

use anyhow::{Context as _, Result};

/// An answer counts as yes when it begins with `y` or `Y` after trailing
/// whitespace (the line terminator) is stripped. Leading whitespace is not
/// forgiven.
pub(super) fn is_affirmative(answer: &str) -> bool {
    answer.trim_end().to_lowercase().starts_with('y')
}

/// Ask whether to clobber the destination file, reading one line from
/// stdin. Defaults to no.
///
/// # Errors
///
/// Returns an error if stdin or stdout is unavailable.
#[allow(clippy::print_stdout)]
pub(super) fn confirm_clobber() -> Result<bool> {
    print!("Clobber destination file? [yN] ");
    std::io::stdout().flush().context("flush prompt")?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(is_affirmative(&answer))
}
