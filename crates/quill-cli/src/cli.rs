use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "quill",
    about = "Quill — single-user blogging record engine",
    version,
)]
pub struct Cli {
    /// Directory for persisted snapshots (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Credential file with username:digest lines
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Run purely in memory; nothing is persisted
    #[arg(long)]
    pub ephemeral: bool,
}
