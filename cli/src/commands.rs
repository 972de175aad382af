pub mod count;
pub mod list;
pub mod parse;
pub mod truncate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "capmap")]
#[command(about = "Harvests unique IPv4 destination hosts from packet captures.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a capture file and register its destination hosts
    #[command(alias = "p")]
    Parse {
        /// Path of the capture file to read
        capture: PathBuf,
        /// Keep destinations in private address ranges
        #[arg(long)]
        include_local: bool,
        /// Store file to use instead of the per-user default
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Print the stored host records
    #[command(alias = "l")]
    List {
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Count the stored host records
    #[command(alias = "c")]
    Count {
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Delete the store file
    #[command(alias = "t")]
    Truncate {
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
