//! CLI argument definitions using clap
//!
//! Commands:
//! - siterestore restore [--backup-root <path>] [--sites-root <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// siterestore - restore multi-tenant site backups
#[derive(Parser, Debug)]
#[command(name = "siterestore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Restore every site found under the backup root
    Restore {
        /// Backup root directory (default: ~/backups)
        #[arg(long)]
        backup_root: Option<PathBuf>,

        /// Sites root directory (default: ~/sites)
        #[arg(long)]
        sites_root: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
