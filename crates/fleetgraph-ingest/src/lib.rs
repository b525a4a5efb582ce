//! Upstream source ingestion for the fleet knowledge graph
//!
//! One module per feed:
//!
//! - [`inventory`]: primary vehicle inventory JSON, with deterministic
//!   synthetic generation from asset filenames when the primary is empty
//! - [`persona`]: persona literal extraction from a loosely-structured
//!   source text
//! - [`ui_refs`]: referenced UI component names from a page source
//! - [`packages`]: service-package records produced by a sibling process,
//!   behind the [`ServicePackageSource`] gateway trait
//!
//! Every public loader **degrades instead of failing**: a missing,
//! unreadable, or malformed upstream artifact contributes an empty snapshot
//! plus a warning, never an error. The typed [`IngestError`] exists so the
//! fallible inner steps compose with `?` before being degraded at the
//! module boundary.

pub mod inventory;
pub mod packages;
pub mod persona;
pub mod ui_refs;

pub use inventory::{load_inventory, synthesize_vehicle, InventorySnapshot, VehicleRecord};
pub use packages::{JsonPackageArtifact, ServicePackage, ServicePackageSource};
pub use persona::{extract_persona_literal, load_persona_metadata, PersonaSnapshot};
pub use ui_refs::{list_referenced_components, scan_component_references, ComponentScan};

use thiserror::Error;

/// Errors from individual ingestion steps.
///
/// Never escapes the public loaders; callers of this crate only ever see
/// empty snapshots for degraded sources.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl IngestError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        IngestError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        IngestError::Json {
            path: path.display().to_string(),
            source,
        }
    }
}

pub(crate) mod value_util {
    //! Tolerant field accessors for loosely-typed upstream JSON.

    use serde_json::Value;

    /// A string field, accepting numbers by rendering them (upstream ids are
    /// loosely typed; `"v1"` and `1` must join the same way).
    pub fn loose_string(value: Option<&Value>) -> Option<String> {
        match value? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// An integer field, accepting floats by rounding.
    pub fn loose_int(value: Option<&Value>) -> Option<i64> {
        let value = value?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f.round() as i64))
    }

    /// A float field, accepting integers.
    pub fn loose_float(value: Option<&Value>) -> Option<f64> {
        value?.as_f64()
    }
}
