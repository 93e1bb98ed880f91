pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scipfs-bridge")]
#[command(about = "One-shot JSON bridge to a Kubo IPFS daemon")]
#[command(subcommand_required = true)]
#[command(disable_help_subcommand = true)]
pub struct Args {
    /// Daemon API multiaddress (defaults to /ip4/127.0.0.1/tcp/5001)
    #[arg(long)]
    pub api: Option<String>,

    /// Optional TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the daemon's `ipfs` command-line tool
    #[arg(long)]
    pub ipfs_bin: Option<PathBuf>,

    /// Log filter directive for stderr logging (overridden by RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
