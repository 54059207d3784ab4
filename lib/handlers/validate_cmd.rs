//! Validate command handler.

use crate::constants::DEFAULT_STAGING_DIR;
use crate::error::BuildResult;
use crate::validate::{ValidationResult, validate_bundle};
use colored::Colorize;
use std::path::{Path, PathBuf};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a staged bundle directory.
pub async fn validate_staging(
    path: Option<String>,
    json_output: bool,
    quiet: bool,
) -> BuildResult<()> {
    let dir = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STAGING_DIR));

    let result = validate_bundle(&dir);

    if json_output {
        output_json(&result, &dir)?;
    } else if quiet {
        output_quiet(&result);
    } else {
        output_full(&result, &dir);
    }

    if !result.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

/// Output validation result as JSON.
fn output_json(result: &ValidationResult, dir: &Path) -> BuildResult<()> {
    let output = serde_json::json!({
        "staging": dir.display().to_string(),
        "valid": result.is_valid(),
        "errors": result.errors,
        "warnings": result.warnings,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Output validation result in quiet mode.
fn output_quiet(result: &ValidationResult) {
    for error in &result.errors {
        println!(
            "  {}: {}: {}",
            format!("error[{}]", error.code).bright_red(),
            error.message,
            error.details
        );
    }
}

/// Output validation result in full format.
fn output_full(result: &ValidationResult, dir: &Path) {
    println!("  Validating {}\n", dir.display().to_string().bold());

    let all_issues: Vec<_> = result
        .errors
        .iter()
        .map(|e| ("error", e))
        .chain(result.warnings.iter().map(|w| ("warning", w)))
        .collect();

    for (severity, issue) in &all_issues {
        let label = if *severity == "error" {
            format!("error[{}]", issue.code).bright_red().bold()
        } else {
            format!("warning[{}]", issue.code).bright_yellow().bold()
        };
        println!("  {}: → {}", label, issue.location.bold());

        if let Some(help) = &issue.help {
            println!("      {} {}", "├─".dimmed(), issue.details.dimmed());
            println!(
                "      {} {}: {}",
                "└─".dimmed(),
                "help".bright_green().dimmed(),
                help.dimmed()
            );
        } else {
            println!("      {} {}", "└─".dimmed(), issue.details.dimmed());
        }

        println!();
    }

    let error_count = result.errors.len();
    let warning_count = result.warnings.len();

    if error_count > 0 {
        let summary = if warning_count > 0 {
            format!(
                "{} {}, {} {}",
                error_count,
                if error_count == 1 { "error" } else { "errors" },
                warning_count,
                if warning_count == 1 {
                    "warning"
                } else {
                    "warnings"
                }
            )
        } else if error_count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", error_count)
        };
        println!("  {} {}", "✗".bright_red(), summary);
    } else if warning_count > 0 {
        println!(
            "  {} valid ({} {})",
            "✓".bright_green(),
            warning_count,
            if warning_count == 1 {
                "warning"
            } else {
                "warnings"
            }
        );
    } else {
        println!("  {} valid", "✓".bright_green());
    }
}
