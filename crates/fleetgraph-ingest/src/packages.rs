//! Service-package records from a sibling process.
//!
//! A separate generator reads the inventory and UI references and writes
//! `{ "packages": [...] }` to a shared JSON artifact; this side consumes it
//! read-only. The [`ServicePackageSource`] trait is the seam: graph
//! construction only depends on `list_packages`, so the file exchange can be
//! swapped for a direct call, a queue, or a database without touching it.

use crate::IngestError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One externally generated service package.
///
/// The artifact comes from a JS-side generator, hence the camelCase wire
/// names. Every field tolerates absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePackage {
    pub id: String,
    /// Loosely-typed reference into the inventory; may not resolve.
    pub vehicle_id: String,
    /// Tier name, e.g. `"premium"`.
    pub package: String,
    pub price: i64,
    pub cadence: String,
    pub workshop: String,
    pub dependencies: BTreeMap<String, Value>,
    /// Record-level provenance written by the generator.
    pub source: String,
}

/// Gateway to whatever produces service packages.
pub trait ServicePackageSource {
    /// Identifier of the artifact behind this gateway (path, URL, logical
    /// tag), used as fallback provenance for records that carry none.
    fn locator(&self) -> String;

    fn list_packages(&self) -> Vec<ServicePackage>;
}

/// The shared-file implementation of the gateway.
///
/// Missing or malformed artifacts mean zero packages, never an error;
/// individually malformed array entries are skipped so the rest survive.
#[derive(Debug, Clone)]
pub struct JsonPackageArtifact {
    path: PathBuf,
}

impl JsonPackageArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ServicePackageSource for JsonPackageArtifact {
    fn locator(&self) -> String {
        self.path.display().to_string()
    }

    fn list_packages(&self) -> Vec<ServicePackage> {
        match read_artifact(&self.path) {
            Ok(packages) => packages,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "service package artifact unavailable, treating as empty"
                );
                Vec::new()
            }
        }
    }
}

fn read_artifact(path: &Path) -> Result<Vec<ServicePackage>, IngestError> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|e| IngestError::json(path, e))?;

    let Some(entries) = value.get("packages").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut packages = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<ServicePackage>(entry.clone()) {
            Ok(package) => packages.push(package),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    index,
                    error = %err,
                    "skipping malformed service package entry"
                );
            }
        }
    }
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_a_well_formed_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("service_packages.json");
        fs::write(
            &path,
            r#"{
                "packages": [{
                    "id": "pkg-1",
                    "vehicleId": "v1",
                    "package": "premium",
                    "price": 1200,
                    "cadence": "yearly",
                    "workshop": "Fleet Works",
                    "dependencies": {"parts": ["filter"]},
                    "source": "generator"
                }]
            }"#,
        )
        .unwrap();

        let packages = JsonPackageArtifact::new(&path).list_packages();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].vehicle_id, "v1");
        assert_eq!(packages[0].price, 1200);
        assert!(packages[0].dependencies.contains_key("parts"));
    }

    #[test]
    fn missing_file_means_zero_packages() {
        let dir = tempdir().unwrap();
        let packages = JsonPackageArtifact::new(dir.path().join("nope.json")).list_packages();
        assert!(packages.is_empty());
    }

    #[test]
    fn malformed_json_means_zero_packages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let packages = JsonPackageArtifact::new(&path).list_packages();
        assert!(packages.is_empty());
    }

    #[test]
    fn wrong_shape_means_zero_packages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("odd.json");
        fs::write(&path, r#"{"packages": "all of them"}"#).unwrap();

        let packages = JsonPackageArtifact::new(&path).list_packages();
        assert!(packages.is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped_individually() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.json");
        fs::write(
            &path,
            r#"{"packages": [
                {"id": "pkg-1", "vehicleId": "v1"},
                "not an object",
                {"id": "pkg-2", "price": "expensive"}
            ]}"#,
        )
        .unwrap();

        let packages = JsonPackageArtifact::new(&path).list_packages();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].id, "pkg-1");
        assert_eq!(packages[0].package, "");
    }
}
