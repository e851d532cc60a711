use std::path::PathBuf;
use clap::{
    Parser,
    Subcommand
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Create the config file if it does not exist.
    #[arg(long)]
    pub create_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the configured database and check it answers.
    Ping,
    /// Print a JSON snapshot of every schema and table.
    SyncSchema,
    /// Create the migration history storage if it is missing.
    Setup,
    /// Apply one migration file and record it in the history.
    Migrate {
        file: PathBuf,
        /// Overrides `migration.creator` from the configuration.
        #[arg(long)]
        creator: Option<String>,
    },
    /// List recorded migrations, oldest first.
    History {
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Show how a migration file name is interpreted; does not connect.
    Parse {
        filename: String,
    },
}
