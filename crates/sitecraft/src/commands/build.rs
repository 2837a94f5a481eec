//! Build command - compile templates/ into live/

use crate::context::Context;
use crate::output;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde_json::json;
use sitecraft_core::project::build_locked;
use sitecraft_core::state::{LastBuild, State};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// How long to wait for another build of the same project to finish
const BUILD_LOCK_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the site
///
/// The outcome (success or failure) is recorded in `.sitecraft/state.json`
/// either way; a failed build leaves `live/` as it was. Failing to write
/// the state file is logged and does not change the build outcome.
pub fn run(path: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(path, verbose)?;
    let root = &ctx.project.root;

    if ctx.verbose && !json {
        println!(
            "{} Building '{}' in {}",
            "→".cyan(),
            ctx.site_name(),
            root.display()
        );
    }

    let started_at = Utc::now();
    let result = build_locked(root, BUILD_LOCK_TIMEOUT);
    let finished_at = Utc::now();

    let record = match &result {
        Ok(report) => LastBuild {
            success: true,
            started_at,
            finished_at,
            duration_ms: report.duration_ms,
            files: report.files.len(),
            error: None,
        },
        Err(e) => LastBuild {
            success: false,
            started_at,
            finished_at,
            duration_ms: u64::try_from((finished_at - started_at).num_milliseconds())
                .unwrap_or(0),
            files: 0,
            error: Some(e.to_string()),
        },
    };
    if let Err(e) = State::record_build(root, record) {
        warn!(error = %e, "failed to record build state");
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if !json {
                eprintln!("{} Build failed", "✗".red().bold());
            }
            return Err(e.into());
        }
    };

    if json {
        let out = json!({
            "success": true,
            "root": root.display().to_string(),
            "files": report.files,
            "duration_ms": report.duration_ms,
        });
        output::print_json(&serde_json::to_string_pretty(&out)?)?;
        return Ok(());
    }

    if ctx.verbose {
        for file in &report.files {
            println!("  - live/{}", file.display());
        }
    }

    output::print_text(&format!(
        "{} Built {} page(s) into {} ({}ms)",
        "✓".green().bold(),
        report.files.len(),
        ctx.project.live_dir().display(),
        report.duration_ms
    ))?;

    Ok(())
}
