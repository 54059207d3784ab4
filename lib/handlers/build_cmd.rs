//! Build command handler.

use crate::config::BuildConfig;
use crate::error::BuildResult;
use crate::pipeline::{self, BuildReport};
use colored::Colorize;
use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Run the full build pipeline and report the outcome.
pub async fn build_bundle(
    staging: Option<String>,
    output: Option<String>,
    dist: Option<String>,
    offline: bool,
    json_output: bool,
) -> BuildResult<()> {
    let mut config = BuildConfig::resolve()?.with_offline(offline);
    if let Some(dir) = staging {
        config = config.with_staging_dir(PathBuf::from(dir));
    }
    if let Some(dir) = dist {
        config = config.with_dist_dir(PathBuf::from(dir));
    }
    if let Some(name) = output {
        config = config.with_output_name(name);
    }

    let report = pipeline::run(&config);

    if json_output {
        output_json(&report)?;
    } else {
        output_full(&config, &report);
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Output the build report as JSON.
fn output_json(report: &BuildReport) -> BuildResult<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Output the build report in human-readable form.
fn output_full(config: &BuildConfig, report: &BuildReport) {
    println!(
        "  Building {} {}\n",
        config.name.bold(),
        config.version.dimmed()
    );

    for warning in &report.warnings {
        println!("  {}: {}", "warning".bright_yellow().bold(), warning);
    }
    if !report.warnings.is_empty() {
        println!();
    }

    if report.is_success() {
        let path = report
            .output_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!("  {} Created {}", "✓".bright_green(), path.bright_green());
    } else {
        for error in &report.errors {
            println!("  {}: {}", "error".bright_red().bold(), error);
        }
        println!(
            "\n  {} build failed in stage `{}`",
            "✗".bright_red(),
            report.stage
        );
    }
}
