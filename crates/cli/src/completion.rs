use clap::CommandFactory;
use clap_complete::{generate, Shell};

use flowenv_core::{Error, Result};

/// Write a completion script for `shell` to stdout.
pub fn generate_completion(shell: &str) -> Result<()> {
    let Ok(shell) = shell.parse::<Shell>() else {
        return Err(Error::argument(format!(
            "unsupported shell '{shell}': expected bash, zsh, fish, elvish, or powershell"
        )));
    };

    let mut command = crate::Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
