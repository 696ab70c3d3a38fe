use std::path::PathBuf;
use clap::{Parser, Subcommand};
use crate::core::constants::DEFAULT_TARGET_EXTENSION;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Only print the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Repackage resources/app of a packaged application archive
    Convert {
        /// Path to the ZIP archive
        archive: PathBuf,
        /// Existing directory to write the new archive into
        output_dir: PathBuf,
        /// Extension of the written archive
        #[arg(short, long, default_value = DEFAULT_TARGET_EXTENSION)]
        extension: String,
        /// Fail instead of replacing an existing output archive
        #[arg(long)]
        no_clobber: bool,
        /// Store entries without compression
        #[arg(long)]
        store: bool,
    },
    /// List what a conversion would repackage
    Inspect {
        /// Path to the ZIP archive
        archive: PathBuf,
    },
}
