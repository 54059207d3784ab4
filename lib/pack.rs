//! Bundle packaging.
//!
//! Combines the validated artifacts into a Deflate-compressed zip archive,
//! adds a provenance record, and publishes the result to the dist directory
//! where downstream automation expects it.

use crate::config::BuildConfig;
use crate::constants::{
    BUILD_INFO_FILE, MANIFEST_FILE, PACKAGE_FILE, REQUIRED_ARTIFACTS, SERVER_DIR, SERVER_ENTRY,
};
use crate::error::{BuildError, BuildResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Provenance record embedded in every bundle.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Build timestamp (RFC 3339).
    pub built_at: DateTime<Utc>,

    /// Resolved bundle version.
    pub version: String,

    /// Remote endpoint the bundle targets.
    pub endpoint: String,

    /// Builder identifier (tool name and version).
    pub builder: String,

    /// Unique id for this build invocation.
    pub build_id: Uuid,
}

/// Result of a packaging operation.
#[derive(Debug)]
pub struct PackResult {
    /// Bundle path within the staging tree.
    pub output_path: PathBuf,

    /// Published copy in the dist directory.
    pub published_path: PathBuf,

    /// Number of files included.
    pub file_count: usize,

    /// Total uncompressed size in bytes.
    pub total_size: u64,

    /// Compressed size in bytes.
    pub compressed_size: u64,

    /// SHA-256 checksum of the bundle.
    pub checksum: String,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Package the staged artifacts into a zip bundle and publish it.
///
/// Every required artifact is read up front so a missing or unreadable file
/// surfaces as an [`BuildError::ArtifactRead`] carrying the underlying io
/// error, before any output is created.
pub fn pack_bundle(config: &BuildConfig, staging: &Path) -> BuildResult<PackResult> {
    let manifest = read_artifact(staging, MANIFEST_FILE)?;
    let package = read_artifact(staging, PACKAGE_FILE)?;
    let stub = read_artifact(staging, SERVER_ENTRY)?;

    let build_info = BuildInfo {
        built_at: Utc::now(),
        version: config.version.clone(),
        endpoint: config.endpoint.to_string(),
        builder: format!("mcpb-build/{}", env!("CARGO_PKG_VERSION")),
        build_id: Uuid::new_v4(),
    };
    let build_info_json = serde_json::to_vec_pretty(&build_info)?;

    let output_path = staging.join(&config.output_name);

    let file = File::create(&output_path)?;
    let mut zip = ZipWriter::new(file);

    let zip_options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut file_count = 0;
    let mut total_size = 0u64;

    let mut add = |zip: &mut ZipWriter<File>,
                   name: &str,
                   contents: &[u8],
                   options: SimpleFileOptions|
     -> BuildResult<()> {
        zip.start_file(name, options)?;
        zip.write_all(contents)?;
        file_count += 1;
        total_size += contents.len() as u64;
        Ok(())
    };

    add(&mut zip, MANIFEST_FILE, &manifest, zip_options)?;
    add(&mut zip, PACKAGE_FILE, &package, zip_options)?;
    zip.add_directory(format!("{}/", SERVER_DIR), zip_options)?;
    add(&mut zip, SERVER_ENTRY, &stub, zip_options.unix_permissions(0o755))?;
    add(&mut zip, BUILD_INFO_FILE, &build_info_json, zip_options)?;

    // Any extra staged files (installed dependencies, docs) ride along.
    for entry in WalkDir::new(staging) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(staging)?;
        let path_str = relative.to_string_lossy().replace('\\', "/");

        if REQUIRED_ARTIFACTS.contains(&path_str.as_str()) || path_str == config.output_name {
            continue;
        }

        let contents = std::fs::read(entry.path())?;
        add(&mut zip, &path_str, &contents, zip_options)?;
    }

    zip.finish()?;

    let compressed_size = std::fs::metadata(&output_path)?.len();
    let bundle_bytes = std::fs::read(&output_path)?;
    let checksum = compute_sha256(&bundle_bytes);

    // Publish to the well-known dist location.
    std::fs::create_dir_all(&config.dist_dir)?;
    let published_path = config.dist_dir.join(&config.output_name);
    std::fs::copy(&output_path, &published_path)?;

    Ok(PackResult {
        output_path,
        published_path,
        file_count,
        total_size,
        compressed_size,
        checksum,
    })
}

/// Read a required artifact, attaching the relative path and io cause on
/// failure.
fn read_artifact(staging: &Path, relative: &str) -> BuildResult<Vec<u8>> {
    std::fs::read(staging.join(relative)).map_err(|source| BuildError::ArtifactRead {
        path: PathBuf::from(relative),
        source,
    })
}

/// Compute SHA-256 checksum of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn test_config(tmp: &TempDir) -> BuildConfig {
        BuildConfig::resolve()
            .unwrap()
            .with_staging_dir(tmp.path().join("staging"))
            .with_dist_dir(tmp.path().join("dist"))
            .with_output_name("bundle.mcpb")
    }

    fn stage_all(staging: &Path) {
        std::fs::create_dir_all(staging.join(SERVER_DIR)).unwrap();
        std::fs::write(staging.join(MANIFEST_FILE), "{\"name\":\"t\"}").unwrap();
        std::fs::write(staging.join(PACKAGE_FILE), "{\"name\":\"t\"}").unwrap();
        std::fs::write(staging.join(SERVER_ENTRY), "// stub").unwrap();
    }

    #[test]
    fn test_pack_produces_zip_with_all_artifacts() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        stage_all(&config.staging_dir);

        let result = pack_bundle(&config, &config.staging_dir).unwrap();

        assert_eq!(result.file_count, 4);
        assert!(result.output_path.exists());
        assert!(result.published_path.exists());
        assert_eq!(result.checksum.len(), 64);

        let mut archive = ZipArchive::new(File::open(&result.output_path).unwrap()).unwrap();
        for name in [MANIFEST_FILE, PACKAGE_FILE, SERVER_ENTRY, BUILD_INFO_FILE] {
            assert!(archive.by_name(name).is_ok(), "missing {}", name);
        }
    }

    #[test]
    fn test_build_info_carries_provenance() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        stage_all(&config.staging_dir);

        let result = pack_bundle(&config, &config.staging_dir).unwrap();

        let mut archive = ZipArchive::new(File::open(&result.output_path).unwrap()).unwrap();
        let mut entry = archive.by_name(BUILD_INFO_FILE).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();

        let info: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(info["version"], config.version);
        assert_eq!(info["endpoint"], config.endpoint.to_string());
        assert!(info["builder"].as_str().unwrap().starts_with("mcpb-build/"));
        assert!(info["built_at"].is_string());
    }

    #[test]
    fn test_pack_fails_with_read_error_when_artifact_absent() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        std::fs::create_dir_all(config.staging_dir.join(SERVER_DIR)).unwrap();
        std::fs::write(config.staging_dir.join(MANIFEST_FILE), "{}").unwrap();
        // package.json and the stub are missing

        let err = pack_bundle(&config, &config.staging_dir).unwrap_err();
        match err {
            BuildError::ArtifactRead { path, source } => {
                assert_eq!(path, PathBuf::from(PACKAGE_FILE));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected ArtifactRead, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_staged_files_are_included() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        stage_all(&config.staging_dir);
        std::fs::write(config.staging_dir.join("README.md"), "# demo").unwrap();

        let result = pack_bundle(&config, &config.staging_dir).unwrap();
        assert_eq!(result.file_count, 5);

        let mut archive = ZipArchive::new(File::open(&result.output_path).unwrap()).unwrap();
        assert!(archive.by_name("README.md").is_ok());
    }

    #[test]
    fn test_compute_sha256() {
        assert_eq!(
            compute_sha256(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }
}
