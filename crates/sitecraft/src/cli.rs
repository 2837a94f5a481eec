//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitecraft")]
#[command(version, about = "Static site builder for HTML templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print progress and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new site scaffold in the current directory
    New {
        /// Site name (becomes the directory name)
        name: String,

        /// Replace an existing directory of the same name
        #[arg(short, long)]
        force: bool,
    },

    /// Compile templates/ into live/
    Build {
        /// Project root (default: discovered from the current directory)
        #[arg(long, env = "SITECRAFT_PROJECT")]
        path: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the outcome of the last build
    Status {
        /// Project root (default: discovered from the current directory)
        #[arg(long, env = "SITECRAFT_PROJECT")]
        path: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Edit include directives in template sources
    #[command(subcommand)]
    Block(BlockCommands),
}

#[derive(Subcommand)]
pub enum BlockCommands {
    /// Remove the include at a token index (as shown in a page's provenance marker)
    Delete {
        /// Source file relative to the project root, e.g. templates/index.html
        file: String,

        /// Token index of the include directive
        index: usize,

        #[arg(long, env = "SITECRAFT_PROJECT")]
        path: Option<PathBuf>,
    },

    /// Insert an include of a partial into a page
    Insert {
        /// Page under templates/
        file: String,

        /// Partial path relative to the project root
        partial: String,

        #[arg(long, env = "SITECRAFT_PROJECT")]
        path: Option<PathBuf>,
    },
}
