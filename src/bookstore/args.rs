use bookstore::store::SnapshotFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookstore")]
#[command(about = "Keep track of a small book inventory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config and snapshots (overrides BOOKSTORE_HOME)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book
    #[command(alias = "a")]
    Add {
        title: String,
        author: String,
        /// Unit price, zero or more
        price: String,
        /// Copies in stock, zero or more
        quantity: String,
    },

    /// List all books
    #[command(alias = "ls")]
    List,

    /// Show one or more books
    #[command(alias = "v")]
    View {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Find books by title or author
    Search { term: String },

    /// Change some fields of a book
    #[command(alias = "u")]
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        quantity: Option<String>,
    },

    /// Delete one or more books
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Show inventory totals
    Stats,

    /// Write the catalog to a snapshot file
    Export {
        #[arg(short, long, value_parser = parse_format)]
        format: SnapshotFormat,

        /// Target file (defaults to <base-name>.<format> in the data dir)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Replace the catalog with the contents of a snapshot file
    Import {
        #[arg(short, long, value_parser = parse_format)]
        format: SnapshotFormat,

        /// Source file (defaults to <base-name>.<format> in the data dir)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., default-format)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<SnapshotFormat, String> {
    s.parse().map_err(|e: bookstore::error::BookstoreError| e.to_string())
}
