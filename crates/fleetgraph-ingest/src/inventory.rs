//! Vehicle inventory loading.
//!
//! The primary source is a JSON artifact: either a bare array of vehicle
//! records or an object wrapping the array under `cars` (or `vehicles`).
//! When the primary yields nothing (missing file, malformed JSON, wrong
//! shape, or simply an empty list), a synthetic inventory is derived from
//! the asset image filenames so the rest of the pipeline always has data to
//! work with.
//!
//! Synthesis is a pure function of each filename: numeric fields come from
//! character codes, not randomness, so the same file always produces the
//! same vehicle. Test fixtures depend on this.

use crate::value_util::{loose_float, loose_int, loose_string};
use crate::IngestError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use walkdir::WalkDir;

/// Image extensions recognized during the asset scan.
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "avif", "webp"];

/// A normalized vehicle record.
///
/// Upstream records are loosely shaped; an absent or malformed field
/// degrades to `None` (or an empty id) instead of discarding the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// May be empty: id-less vehicles still get nodes, but cannot be
    /// referenced by service packages.
    #[serde(default)]
    pub id: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub range: Option<i64>,
    pub price: Option<i64>,
    pub battery: Option<f64>,
    pub image: Option<String>,
}

impl VehicleRecord {
    /// Pull a record out of a loosely-typed JSON value.
    ///
    /// Non-object values yield a record with every field absent; the
    /// builder will still represent it, just without payload fields.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return VehicleRecord::default();
        };

        VehicleRecord {
            id: loose_string(obj.get("id")).unwrap_or_default(),
            make: loose_string(obj.get("make")),
            model: loose_string(obj.get("model")),
            trim: loose_string(obj.get("trim")),
            range: loose_int(obj.get("range")),
            price: loose_int(obj.get("price")),
            battery: loose_float(obj.get("battery")),
            image: loose_string(obj.get("image")),
        }
    }
}

/// Result of one inventory load: the records plus the path that actually
/// produced them (primary artifact or asset directory), for provenance.
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    pub vehicles: Vec<VehicleRecord>,
    pub source: String,
}

/// Load the inventory, falling back to synthetic generation.
///
/// `source` is whichever path produced the data, so downstream consumers
/// attribute provenance correctly.
pub fn load_inventory(inventory_path: &Path, assets_dir: &Path) -> InventorySnapshot {
    match read_primary(inventory_path) {
        Ok(vehicles) if !vehicles.is_empty() => {
            return InventorySnapshot {
                vehicles,
                source: inventory_path.display().to_string(),
            };
        }
        // An empty (but well-formed) primary is not an error; fall through.
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(
                path = %inventory_path.display(),
                error = %err,
                "inventory artifact unavailable, falling back to asset scan"
            );
        }
    }

    InventorySnapshot {
        vehicles: synthesize_from_assets(assets_dir),
        source: assets_dir.display().to_string(),
    }
}

/// Read and normalize the primary artifact.
fn read_primary(path: &Path) -> Result<Vec<VehicleRecord>, IngestError> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|e| IngestError::json(path, e))?;

    Ok(vehicle_array(&value)
        .map(|arr| arr.iter().map(VehicleRecord::from_value).collect())
        .unwrap_or_default())
}

/// Accept a bare array or an object wrapping it under `cars`/`vehicles`;
/// any other shape normalizes to nothing.
fn vehicle_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(arr) => Some(arr),
        Value::Object(obj) => obj
            .get("cars")
            .or_else(|| obj.get("vehicles"))
            .and_then(Value::as_array),
        _ => None,
    }
}

// ============================================================================
// Synthetic inventory
// ============================================================================

/// Derive one synthetic vehicle per recognized image file in `dir`.
///
/// Files are taken one level deep and sorted by name, so discovery order
/// (and with it node order) is reproducible across platforms.
pub fn synthesize_from_assets(dir: &Path) -> Vec<VehicleRecord> {
    if !dir.is_dir() {
        tracing::warn!(path = %dir.display(), "asset directory unavailable, inventory stays empty");
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| has_image_extension(name))
        .map(|name| synthesize_vehicle(&name))
        .collect()
}

fn has_image_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Derive a synthetic vehicle from a `make-model-variant...ext` filename.
///
/// Deterministic: numeric fields are functions of the leading characters of
/// make and model, battery capacity is bucketed on the variant name.
pub fn synthesize_vehicle(filename: &str) -> VehicleRecord {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename);

    let mut segments = stem.split('-').filter(|s| !s.is_empty());
    let make = segment_or(segments.next(), "vehicle");
    let model = segment_or(segments.next(), "vehicle");
    let rest: Vec<String> = segments.map(|s| s.to_ascii_lowercase()).collect();
    let variant = if rest.is_empty() {
        "base".to_string()
    } else {
        rest.join(" ")
    };

    let make_code = char_code(&make);
    let model_code = char_code(&model);

    let range = 250 + (make_code + model_code) % 100;
    let price = round_to_hundred(30_000 + make_code * 500);
    let battery = if variant.contains("sport") || variant.contains("performance") {
        100.0
    } else if variant.contains("sedan") {
        60.0
    } else {
        80.0
    };

    VehicleRecord {
        id: format!("{}-{}-{}", make, model, variant.replace(' ', "-")),
        make: Some(title_case(&make)),
        model: Some(title_case(&model)),
        trim: Some(title_case(&variant)),
        range: Some(range),
        price: Some(price),
        battery: Some(battery),
        image: Some(filename.to_string()),
    }
}

fn segment_or(segment: Option<&str>, default: &str) -> String {
    segment
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_ascii_lowercase()
}

fn char_code(s: &str) -> i64 {
    s.chars().next().map(|c| c as i64).unwrap_or(0)
}

fn round_to_hundred(n: i64) -> i64 {
    (n + 50) / 100 * 100
}

/// Capitalize the first letter of each space-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
