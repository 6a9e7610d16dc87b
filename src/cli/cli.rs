use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Inspect and manipulate a file tree through typed handles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// Directory every NAME is resolved against
    #[clap(long, short, default_value = ".", global = true)]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the immediate children of a directory
    Ls {
        name: Option<PathBuf>,
        /// Only show directories
        #[clap(long, conflicts_with = "files")]
        dirs: bool,
        /// Only show files
        #[clap(long)]
        files: bool,
    },
    /// Recursively list a directory
    Tree { name: Option<PathBuf> },
    /// Create a directory and its missing ancestors
    Mkdir { name: PathBuf },
    /// Create an empty file and its missing parent directories
    Touch { name: PathBuf },
    /// Replace the content of a file
    Write { name: PathBuf, text: String },
    /// Append to an existing file
    Append { name: PathBuf, text: String },
    /// Print the content of a file
    Cat { name: PathBuf },
    /// Report whether a name resolves to a file or a directory
    Resolve { name: PathBuf },
}
