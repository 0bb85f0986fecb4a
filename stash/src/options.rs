use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and verify saved session state.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Storage directory.
    #[arg(short, long, required_unless_present = "config")]
    pub dir: Option<PathBuf>,

    /// JSON store config, used in place of `--dir`.
    #[arg(short, long, conflicts_with = "dir")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List stored grids and plain values without opening grids.
    Inspect {
        /// Print the manifest as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Restore everything into an empty session.
    Verify {
        /// Memory map grids instead of reading them.
        #[arg(long)]
        mmap: bool,
    },
}
