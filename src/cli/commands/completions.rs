//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish and
//! PowerShell.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::TendError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, TendError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "tend", &mut buf);
    String::from_utf8(buf)
        .map_err(|e| TendError::InvalidArgument(format!("Completion script is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = completions(Shell::Bash).unwrap();
        assert!(script.contains("tend"));
        assert!(script.contains("suggest"));
    }

    #[test]
    fn test_generate_zsh_completions() {
        let script = completions(Shell::Zsh).unwrap();
        assert!(script.contains("#compdef tend"));
    }
}
