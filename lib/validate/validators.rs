//! Bundle validation checks.
//!
//! Checks are deliberately shallow: required artifacts must exist and the
//! two descriptors must parse as JSON. Semantic content (non-empty tool
//! catalogs, version formats) is the generators' responsibility.

use crate::constants::{MANIFEST_FILE, PACKAGE_FILE, REQUIRED_ARTIFACTS, SERVER_ENTRY};
use std::path::Path;

use super::codes::{ErrorCode, WarningCode};
use super::result::{ValidationIssue, ValidationResult};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate a staged bundle directory.
pub fn validate_bundle(staging: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    // 1. Staging directory must exist
    if !staging.exists() {
        result.errors.push(ValidationIssue {
            code: ErrorCode::StagingNotFound.into(),
            message: "staging directory not found".into(),
            location: staging.display().to_string(),
            details: "directory does not exist".into(),
            help: Some("run `mcpb-build build` to populate it".into()),
        });
        return result;
    }

    // 2. Required artifacts, first absent path wins
    for artifact in REQUIRED_ARTIFACTS {
        if !staging.join(artifact).exists() {
            result.errors.push(ValidationIssue {
                code: ErrorCode::ArtifactMissing.into(),
                message: "required artifact missing".into(),
                location: (*artifact).into(),
                details: format!("`{}` does not exist in the staging tree", artifact),
                help: None,
            });
            return result;
        }
    }

    // 3. Descriptors must parse as JSON
    check_json(staging, MANIFEST_FILE, &mut result);
    check_json(staging, PACKAGE_FILE, &mut result);

    // 4. An empty stub is suspicious but not fatal
    if let Ok(metadata) = std::fs::metadata(staging.join(SERVER_ENTRY))
        && metadata.len() == 0
    {
        result.warnings.push(ValidationIssue {
            code: WarningCode::EmptyServerStub.into(),
            message: "server stub is empty".into(),
            location: SERVER_ENTRY.into(),
            details: "the generated stub contains no source".into(),
            help: None,
        });
    }

    result
}

/// Push an error when a staged file cannot be read or parsed as JSON.
fn check_json(staging: &Path, file: &str, result: &mut ValidationResult) {
    let content = match std::fs::read_to_string(staging.join(file)) {
        Ok(c) => c,
        Err(e) => {
            result.errors.push(ValidationIssue {
                code: ErrorCode::InvalidJson.into(),
                message: "cannot read artifact".into(),
                location: file.into(),
                details: format!("failed to read file: {}", e),
                help: None,
            });
            return;
        }
    };

    if let Err(e) = serde_json::from_str::<serde_json::Value>(&content) {
        result.errors.push(ValidationIssue {
            code: ErrorCode::InvalidJson.into(),
            message: "invalid JSON".into(),
            location: file.into(),
            details: format!("parse error: {}", e),
            help: Some("check JSON syntax".into()),
        });
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SERVER_DIR;
    use tempfile::TempDir;

    fn stage_all(dir: &Path) {
        std::fs::create_dir_all(dir.join(SERVER_DIR)).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), "{\"name\":\"t\"}").unwrap();
        std::fs::write(dir.join(PACKAGE_FILE), "{\"name\":\"t\"}").unwrap();
        std::fs::write(dir.join(SERVER_ENTRY), "// stub").unwrap();
    }

    #[test]
    fn test_valid_bundle_passes() {
        let tmp = TempDir::new().unwrap();
        stage_all(tmp.path());

        let result = validate_bundle(tmp.path());
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_staging_directory() {
        let tmp = TempDir::new().unwrap();
        let result = validate_bundle(&tmp.path().join("absent"));

        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].code,
            ErrorCode::StagingNotFound.into()
        );
    }

    #[test]
    fn test_missing_artifact_names_first_absent_path() {
        let tmp = TempDir::new().unwrap();
        stage_all(tmp.path());
        std::fs::remove_file(tmp.path().join(PACKAGE_FILE)).unwrap();
        std::fs::remove_file(tmp.path().join(SERVER_ENTRY)).unwrap();

        let result = validate_bundle(tmp.path());

        // package.json precedes server/index.js in the required list.
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::ArtifactMissing.into());
        assert_eq!(result.errors[0].location, PACKAGE_FILE);
    }

    #[test]
    fn test_malformed_manifest_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        stage_all(tmp.path());
        std::fs::write(tmp.path().join(MANIFEST_FILE), "{not json").unwrap();

        let result = validate_bundle(tmp.path());

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::InvalidJson.into());
        assert_eq!(result.errors[0].location, MANIFEST_FILE);
    }

    #[test]
    fn test_empty_stub_is_a_warning_only() {
        let tmp = TempDir::new().unwrap();
        stage_all(tmp.path());
        std::fs::write(tmp.path().join(SERVER_ENTRY), "").unwrap();

        let result = validate_bundle(tmp.path());

        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, WarningCode::EmptyServerStub.into());
    }
}
