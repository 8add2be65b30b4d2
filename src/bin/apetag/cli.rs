use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Минимальный CLI для чтения APE тегов
#[derive(Parser, Debug)]
#[command(name = "apetag", version, about = "APE tag reader")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Validate the footer and print a tag summary
    ///
    /// Пример:
    ///   apetag check --path ./track.ape
    ///   apetag check --path ./track.ape --json
    Check {
        #[arg(long)]
        path: PathBuf,
        /// Read through a memory map instead of seek+read
        #[arg(long, default_value_t = false)]
        mmap: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Look up one item by exact key
    Get {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        key: String,
        #[arg(long, default_value_t = false)]
        mmap: bool,
        /// Optional file to write the raw value into
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List all items (key, kind, size, text)
    Dump {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        mmap: bool,
        /// JSON output (array of objects)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print standard metadata fields (Title, Artist, Album, ...)
    Meta {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        mmap: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
