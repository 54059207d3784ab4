//! Build pipeline orchestration.
//!
//! A fixed, strictly sequential state machine. Every step either advances
//! the stage or moves the build to `Failed`; warnings accumulated by earlier
//! steps survive a later failure and appear in the final report.

use crate::config::BuildConfig;
use crate::constants::PROXY_PACKAGE;
use crate::detect::{detect_node, detect_npm};
use crate::error::{BuildError, BuildResult};
use crate::manifest::generate_manifest;
use crate::pack::pack_bundle;
use crate::package::generate_package;
use crate::stub::generate_server_stub;
use crate::validate::validate_bundle;
use crate::workspace;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStage {
    /// Configuration resolved, nothing run yet.
    Init,
    /// Optional helper tool discovery.
    Prereqs,
    /// Staging workspace reset.
    Workspace,
    /// Artifact generation.
    Generate,
    /// Dependency installation in staging.
    Install,
    /// Staged-bundle validation.
    Validate,
    /// Archive creation and publication.
    Package,
    /// Terminal success state.
    Done,
    /// Terminal failure state.
    Failed,
}

/// Aggregated outcome of one pipeline run.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    /// Terminal stage (`Done` or `Failed`).
    pub stage: BuildStage,

    /// Advisory warnings, in the order they were raised.
    pub warnings: Vec<String>,

    /// Fatal errors, in the order they were raised. At most one in
    /// practice since the first fatal error aborts the run.
    pub errors: Vec<String>,

    /// Published bundle path; present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Stages that completed successfully, in order.
    pub completed: Vec<BuildStage>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl BuildReport {
    fn new() -> Self {
        Self {
            stage: BuildStage::Init,
            warnings: Vec::new(),
            errors: Vec::new(),
            output_path: None,
            completed: Vec::new(),
        }
    }

    /// Whether the pipeline reached `Done`.
    pub fn is_success(&self) -> bool {
        self.stage == BuildStage::Done
    }

    fn enter(&mut self, stage: BuildStage) {
        tracing::info!(stage = %stage, "entering stage");
        self.stage = stage;
    }

    fn complete(&mut self, stage: BuildStage) {
        self.completed.push(stage);
    }

    fn fail(&mut self, err: BuildError) {
        tracing::error!(stage = %self.stage, error = %err, "build failed");
        self.errors.push(format_error(&err));
        self.stage = BuildStage::Failed;
    }

    fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Run the full pipeline for a resolved configuration.
pub fn run(config: &BuildConfig) -> BuildReport {
    let mut report = BuildReport::new();
    let staging = config.staging_dir.clone();

    // Prereqs: helper discovery only warns, never fails.
    report.enter(BuildStage::Prereqs);
    for (tool, found) in [("node", detect_node()), ("npm", detect_npm())] {
        match found {
            Some(helper) if helper.version.is_none() => report.warn(format!(
                "{} found at {} but reported an unparseable version ({:?})",
                tool,
                helper.path.display(),
                helper.raw_version
            )),
            Some(_) => {}
            None => report.warn(format!("{} not found on PATH", tool)),
        }
    }
    report.complete(BuildStage::Prereqs);

    report.enter(BuildStage::Workspace);
    if let Err(e) = workspace::reset(&staging) {
        report.fail(e);
        return report;
    }
    report.complete(BuildStage::Workspace);

    report.enter(BuildStage::Generate);
    let generated = generate_manifest(config, &staging)
        .map(|_| ())
        .and_then(|_| generate_package(config, &staging).map(|_| ()))
        .and_then(|_| generate_server_stub(config, &staging).map(|_| ()));
    if let Err(e) = generated {
        report.fail(e);
        return report;
    }
    report.complete(BuildStage::Generate);

    report.enter(BuildStage::Install);
    match install_dependencies(config, &mut report) {
        Ok(()) => report.complete(BuildStage::Install),
        Err(e) => {
            report.fail(e);
            return report;
        }
    }

    report.enter(BuildStage::Validate);
    let validation = validate_bundle(&staging);
    for warning in &validation.warnings {
        report.warn(format!(
            "warning[{}] {}: {}",
            warning.code, warning.location, warning.details
        ));
    }
    if !validation.is_valid() {
        report.fail(BuildError::ValidationFailed(validation));
        return report;
    }
    report.complete(BuildStage::Validate);

    report.enter(BuildStage::Package);
    match pack_bundle(config, &staging) {
        Ok(result) => {
            tracing::info!(
                path = %result.published_path.display(),
                files = result.file_count,
                checksum = %result.checksum,
                "bundle published"
            );
            report.output_path = Some(result.published_path);
            report.complete(BuildStage::Package);
        }
        Err(e) => {
            report.fail(e);
            return report;
        }
    }

    report.enter(BuildStage::Done);
    report
}

/// Install the proxy dependency into the staging tree via npm.
///
/// Skipped with a warning when offline or when npm is unavailable; a spawn
/// or non-zero exit once the install is attempted is fatal.
fn install_dependencies(config: &BuildConfig, report: &mut BuildReport) -> BuildResult<()> {
    if config.offline {
        report.warn("dependency install skipped (offline build)");
        return Ok(());
    }

    let Some(npm) = detect_npm() else {
        report.warn(format!(
            "dependency install skipped: npm not found, `{}` will be fetched at first launch",
            PROXY_PACKAGE
        ));
        return Ok(());
    };

    let command = format!(
        "{} install --omit=dev --prefix {}",
        npm.path.display(),
        config.staging_dir.display()
    );

    let output = Command::new(&npm.path)
        .arg("install")
        .arg("--omit=dev")
        .arg("--prefix")
        .arg(&config.staging_dir)
        .output()
        .map_err(|e| BuildError::InstallFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(BuildError::InstallFailed {
            command,
            reason: format!(
                "exit status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(())
}

/// Render a fatal error for the report, expanding validation issues.
fn format_error(err: &BuildError) -> String {
    match err {
        BuildError::ValidationFailed(result) => {
            let details: Vec<String> = result
                .errors
                .iter()
                .map(|e| format!("error[{}] {}: {}", e.code, e.location, e.details))
                .collect();
            format!("Validation failed: {}", details.join("; "))
        }
        other => other.to_string(),
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Init => "init",
            BuildStage::Prereqs => "prereqs",
            BuildStage::Workspace => "workspace",
            BuildStage::Generate => "generate",
            BuildStage::Install => "install",
            BuildStage::Validate => "validate",
            BuildStage::Package => "package",
            BuildStage::Done => "done",
            BuildStage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
