//! CLI command definitions.

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const BUILD_EXAMPLES: &str = "\
Examples:
  mcpb-build build                     Build into staging/ and publish to dist/
  mcpb-build build --offline           Skip dependency installation
  mcpb-build build --staging ./out     Use a custom staging directory
  mcpb-build build --output my.mcpb    Override the bundle file name
  mcpb-build build --json              Machine-readable build report
  RELEASE_TAG=1.4.2 mcpb-build build   Stamp a release version";

const VALIDATE_EXAMPLES: &str = "\
Examples:
  mcpb-build validate                  Validate the default staging directory
  mcpb-build validate ./out            Validate a specific directory
  mcpb-build validate --json           JSON output for parsing
  mcpb-build validate --quiet          Errors only, for scripts";

const CLEAN_EXAMPLES: &str = "\
Examples:
  mcpb-build clean                     Remove the default staging directory
  mcpb-build clean ./out               Remove a specific staging directory";

const CLI_EXAMPLES: &str = "\
Examples:
  mcpb-build build                     Build the bundle end to end
  mcpb-build validate                  Re-check a previously staged bundle
  mcpb-build clean                     Remove staged output";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// MCPB bundle build pipeline.
#[derive(Debug, Parser)]
#[command(name = "mcpb-build", author, version, styles=styles())]
#[command(about = "Build remote MCP server bundles", after_help = CLI_EXAMPLES)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full build pipeline: stage, install, validate, package.
    #[command(after_help = BUILD_EXAMPLES)]
    Build {
        /// Staging directory the artifacts are written into.
        #[arg(short, long)]
        staging: Option<String>,

        /// Bundle file name (defaults to `<name>-<version>.mcpb`).
        #[arg(short, long)]
        output: Option<String>,

        /// Publish directory the bundle is copied to.
        #[arg(short, long)]
        dist: Option<String>,

        /// Skip dependency installation (no network access).
        #[arg(long)]
        offline: bool,

        /// Emit the build report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate a staged bundle directory.
    #[command(after_help = VALIDATE_EXAMPLES)]
    Validate {
        /// Staging directory to validate (defaults to `staging`).
        path: Option<String>,

        /// Output validation result as JSON.
        #[arg(long)]
        json: bool,

        /// Errors only, no summary.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Remove the staging directory.
    #[command(after_help = CLEAN_EXAMPLES)]
    Clean {
        /// Staging directory to remove (defaults to `staging`).
        path: Option<String>,
    },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn styles() -> Styles {
    Styles::styled()
        .header(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .usage(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_flags_parse() {
        let cli = Cli::try_parse_from(["mcpb-build", "build", "--offline", "--json"]).unwrap();
        match cli.command {
            Command::Build { offline, json, .. } => {
                assert!(offline);
                assert!(json);
            }
            other => panic!("expected build command, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_takes_positional_path() {
        let cli = Cli::try_parse_from(["mcpb-build", "validate", "./out", "-q"]).unwrap();
        match cli.command {
            Command::Validate { path, quiet, .. } => {
                assert_eq!(path.as_deref(), Some("./out"));
                assert!(quiet);
            }
            other => panic!("expected validate command, got {:?}", other),
        }
    }
}
