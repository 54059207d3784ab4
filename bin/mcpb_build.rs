//! `mcpb-build` is the bundle build CLI binary.

use clap::Parser;
use colored::Colorize;
use mcpb_build::handlers;
use mcpb_build::{BuildError, BuildResult, Cli, Command};
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    // Initialize tracing - only enable when RUST_LOG is set.
    init_tracing();

    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print an error with appropriate formatting based on error type.
fn print_error(e: &BuildError) {
    println!();
    match e {
        BuildError::ValidationFailed(result) => {
            println!("  {} Validation failed", "error".bright_red().bold());
            println!();
            for err in &result.errors {
                println!(
                    "    {} → {}",
                    format!("error[{}]", err.code).bright_red(),
                    err.location
                );
                println!("      {}", err.details);
            }
        }
        BuildError::ArtifactRead { path, source } => {
            println!(
                "  {} Cannot read artifact {}",
                "error".bright_red().bold(),
                path.display().to_string().bright_white()
            );
            println!();
            println!("    {}: {}", "cause".dimmed(), source);
        }
        BuildError::InstallFailed { command, reason } => {
            println!(
                "  {} Dependency install failed",
                "error".bright_red().bold()
            );
            println!();
            println!("    {}: {}", "command".dimmed(), command);
            println!("    {}: {}", "reason".dimmed(), reason);
            println!();
            println!(
                "    {}: retry with {} to skip the install step",
                "hint".bright_blue().bold(),
                "--offline".bright_white()
            );
        }
        BuildError::Workspace { path, source } => {
            println!(
                "  {} Cannot prepare workspace {}",
                "error".bright_red().bold(),
                path.display().to_string().bright_white()
            );
            println!();
            println!("    {}: {}", "cause".dimmed(), source);
        }
        _ => {
            println!("  {} {}", "error".bright_red().bold(), e);
        }
    }
    println!();
}

/// Initialize tracing. Only enables logging when RUST_LOG is set.
fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .init();
}

async fn run() -> BuildResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            staging,
            output,
            dist,
            offline,
            json,
        } => handlers::build_bundle(staging, output, dist, offline, json).await,

        Command::Validate { path, json, quiet } => {
            handlers::validate_staging(path, json, quiet).await
        }

        Command::Clean { path } => handlers::clean_workspace(path).await,
    }
}
