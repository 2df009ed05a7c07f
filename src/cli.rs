// dimsort/src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dimsort", version, about = "Sort images into folders by pixel dimensions")]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move or copy images into `{width}x{height}` folders
    Sort {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Root directory for the dimension folders
        #[arg(short, long)]
        destination: PathBuf,

        /// Descend into directories
        #[arg(short, long)]
        recursive: bool,

        /// Copy instead of move
        #[arg(short, long)]
        copy: bool,

        /// Print every move or copy
        #[arg(short, long)]
        verbose: bool,
    },

    /// Group images by dimensions without moving anything
    #[command(alias = "report")]
    DryRun {
        /// Directory to inspect
        directory: PathBuf,

        /// Include subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Show the dimensions and format of one image
    Info {
        /// Image file
        input: PathBuf,
    },
}
