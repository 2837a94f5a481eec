//! New command - create a site scaffold

use anyhow::Result;
use colored::Colorize;
use sitecraft_core::project::create::{create_project, validate_name, SCAFFOLD_DIRS};
use std::env;

/// Create a new site in the current directory
///
/// # Arguments
///
/// * `name` - Site name (becomes the directory name)
/// * `force` - Remove an existing directory of that name first
/// * `verbose` - Enable verbose output if true
pub fn run(name: String, force: bool, verbose: bool) -> Result<()> {
    let current_dir = env::current_dir()?;

    if verbose {
        println!(
            "{} Creating site '{}' in {}",
            "→".cyan(),
            name,
            current_dir.display()
        );
    }

    validate_name(&name)?;
    let project_dir = create_project(&current_dir, &name, force)?;

    println!(
        "{} Created site '{}' at {}",
        "✓".green().bold(),
        name,
        project_dir.display()
    );

    if verbose {
        println!("\n{} Site structure:", "→".cyan());
        println!("  - sitecraft.toml (site configuration)");
        for dir in SCAFFOLD_DIRS {
            println!("  - {}/", dir);
        }
    }

    println!("\n{} Next steps:", "→".cyan());
    println!("  1. cd {}", name);
    println!("  2. sitecraft build");

    Ok(())
}
