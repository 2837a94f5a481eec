//! Block commands - add or remove include directives in sources

use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use sitecraft_core::project::{delete_include, insert_include};
use std::path::PathBuf;

/// Remove the include directive at `index` of `file`
pub fn delete(path: Option<PathBuf>, file: String, index: usize, verbose: bool) -> Result<()> {
    let ctx = Context::new(path, verbose)?;

    if ctx.verbose {
        println!("{} Removing include #{} from {}", "→".cyan(), index, file);
    }

    delete_include(&ctx.project.root, &file, index)?;

    println!(
        "{} Removed include #{} from {}",
        "✓".green().bold(),
        index,
        file
    );
    Ok(())
}

/// Insert an include of `partial` into the page `file`
pub fn insert(path: Option<PathBuf>, file: String, partial: String, verbose: bool) -> Result<()> {
    let ctx = Context::new(path, verbose)?;

    if ctx.verbose {
        println!("{} Inserting {} into {}", "→".cyan(), partial, file);
    }

    insert_include(&ctx.project.root, &file, &partial)?;

    println!("{} Inserted {} into {}", "✓".green().bold(), partial, file);
    Ok(())
}
