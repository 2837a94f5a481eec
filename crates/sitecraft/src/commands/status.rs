//! Status command - show the last recorded build

use crate::context::Context;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use sitecraft_core::state::{LastBuild, State};
use std::path::PathBuf;

#[derive(Serialize)]
struct StatusOutput<'a> {
    schema_version: &'a str,
    site: String,
    root: String,
    built: bool,
    build: Option<&'a LastBuild>,
}

/// Show build status
///
/// Always exits 0 once the project is found; a failed last build is
/// reported in the output, not the exit code.
pub fn run(path: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(path, verbose)?;
    let state = State::load_or_empty(State::path_for(&ctx.project.root));

    if json {
        let out = StatusOutput {
            schema_version: &state.schema_version,
            site: ctx.site_name(),
            root: ctx.project.root.display().to_string(),
            built: state.build.is_some(),
            build: state.build.as_ref(),
        };
        output::print_json(&serde_json::to_string_pretty(&out)?)?;
        return Ok(());
    }

    println!("{} Site: {}", "→".cyan(), ctx.site_name());
    if ctx.verbose {
        println!("  root: {}", ctx.project.root.display());
    }

    match &state.build {
        None => output::print_text(&format!(
            "{} No builds recorded yet (run `sitecraft build`)",
            "→".cyan()
        ))?,
        Some(build) if build.success => output::print_text(&format!(
            "{} Last build succeeded at {} ({} page(s), {}ms)",
            "✓".green().bold(),
            build.finished_at.to_rfc3339(),
            build.files,
            build.duration_ms
        ))?,
        Some(build) => {
            output::print_text(&format!(
                "{} Last build failed at {}",
                "✗".red().bold(),
                build.finished_at.to_rfc3339()
            ))?;
            if let Some(error) = &build.error {
                output::print_text(&format!("  - {}", error))?;
            }
        }
    }

    Ok(())
}
