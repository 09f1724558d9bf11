use clap::Subcommand;
use std::path::PathBuf;

pub mod encrypt;
pub mod keypair;
pub mod run;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a key pair and write both key files into a directory
    Keypair {
        /// Base name for the generated key files
        #[arg(long)]
        name: String,

        /// Directory the key files are written into
        #[arg(long)]
        dir: PathBuf,
    },

    /// Encrypt a string or a file against a public key
    Encrypt {
        /// Path of the recipient public key file
        #[arg(long)]
        public: PathBuf,

        /// File to encrypt into a sibling ciphertext file
        #[arg(long, conflicts_with = "string")]
        file: Option<PathBuf>,

        /// Literal string to encrypt into an ENC(...) token
        #[arg(long = "str", value_name = "STRING")]
        string: Option<String>,
    },

    /// Run a workflow file, step by step
    #[command(visible_alias = "wf")]
    Run {
        /// Path of the workflow file
        workflow: PathBuf,

        /// KEY=VALUE pair overlaid onto the environment (repeatable)
        #[arg(long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,

        /// Private key file used to decrypt encrypted values
        #[arg(long)]
        private: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}
