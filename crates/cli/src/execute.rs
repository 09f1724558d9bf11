use crate::commands::Commands;
use flowenv_core::Result;

impl Commands {
    pub async fn execute(self) -> Result<()> {
        match self {
            Commands::Keypair { name, dir } => crate::commands::keypair::execute(&name, &dir),
            Commands::Encrypt {
                public,
                file,
                string,
            } => crate::commands::encrypt::execute(&public, file.as_deref(), string.as_deref()),
            Commands::Run {
                workflow,
                args,
                private,
            } => crate::commands::run::execute(&workflow, &args, private.as_deref()).await,
            Commands::Completion { shell } => crate::completion::generate_completion(&shell),
        }
    }
}
