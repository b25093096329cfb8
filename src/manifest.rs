//! Package manifest access.
//!
//! The published artifact is an npm-style package, so the manifest is a
//! `package.json`. The version is read before classification (it supplies the
//! stability flag and the initial-release base) and written back afterwards.

use crate::domain::Version;
use crate::error::{CiReleaseError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// The pieces of the manifest this tool cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    pub name: Option<String>,
    pub version: Version,
}

/// Read the package name and current version from a manifest file.
///
/// A missing or malformed version fails fast; the classifier never sees a
/// manifest it cannot trust.
pub fn read_manifest(path: &Path) -> Result<ManifestInfo> {
    let raw = fs::read_to_string(path)?;
    let doc: Value = serde_json::from_str(&raw).map_err(|e| {
        CiReleaseError::manifest(format!("Cannot parse '{}': {}", path.display(), e))
    })?;

    let version_str = doc
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            CiReleaseError::manifest(format!("No 'version' field in '{}'", path.display()))
        })?;
    let version = Version::parse(version_str)?;

    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .map(|s| s.to_string());

    Ok(ManifestInfo { name, version })
}

/// Persist a new version into the manifest, keeping all other fields intact.
pub fn write_version(path: &Path, version: &Version) -> Result<()> {
    let raw = fs::read_to_string(path)?;
    let mut doc: Value = serde_json::from_str(&raw).map_err(|e| {
        CiReleaseError::manifest(format!("Cannot parse '{}': {}", path.display(), e))
    })?;

    match doc.as_object_mut() {
        Some(obj) => {
            obj.insert("version".to_string(), Value::String(version.to_string()));
        }
        None => {
            return Err(CiReleaseError::manifest(format!(
                "'{}' is not a JSON object",
                path.display()
            )))
        }
    }

    let mut serialized = serde_json::to_string_pretty(&doc).map_err(|e| {
        CiReleaseError::manifest(format!("Cannot serialize '{}': {}", path.display(), e))
    })?;
    serialized.push('\n');
    fs::write(path, serialized)?;

    Ok(())
}
