//! Fleet graph construction
//!
//! Orchestrates the four upstream feeds (inventory, persona, UI component
//! references, service packages) into one typed graph:
//!
//! 1. load inventory, create the `FleetInventory` root carrying aggregate
//!    stats,
//! 2. one `Vehicle` node per record (allow-listed payload projection) plus a
//!    `PART_OF` edge to the root,
//! 3. optional `Persona` node (`TARGETS` → root),
//! 4. optional `UIComponentSet` node (`VISUALIZES` → root),
//! 5. one `ServicePackage` node per record, with `SERVICES` to its vehicle
//!    when the reference resolves, `SURFACES_IN` to the UI set when one
//!    exists, and always `ALIGN_WITH` to the root.
//!
//! Any single source failing degrades to "absent" and the build continues;
//! [`FleetGraphBuilder::build`] never fails and always returns a
//! structurally valid (possibly sparse) graph.

pub mod summary;

pub use summary::{summarize_vehicles, VehicleSummary, DEFAULT_TRIM};

use chrono::Utc;
use fleetgraph_ingest::{
    list_referenced_components, load_inventory, load_persona_metadata, JsonPackageArtifact,
    ServicePackageSource, VehicleRecord,
};
use fleetgraph_model::{ident, FleetGraph, GraphMetadata, Node, NodeType, Relation};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Namespace used when none (or a blank one) is configured.
pub const DEFAULT_NAMESPACE: &str = "fleet";

// ============================================================================
// Configuration
// ============================================================================

/// Build-time configuration: namespace plus the upstream artifact locations.
///
/// Read once per build and immutable afterwards; no ambient process state.
/// Every path is optional at runtime in the sense that a missing artifact
/// degrades that feed to empty.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub namespace: String,
    /// Project root recorded as the graph's `root_source`.
    pub root_dir: PathBuf,
    /// Primary inventory JSON (`{ "cars": [...] }` or a bare array).
    pub inventory_path: PathBuf,
    /// Directory of vehicle images for synthetic inventory generation.
    pub assets_dir: PathBuf,
    /// Source file holding the persona literal.
    pub persona_source: PathBuf,
    /// Page source scanned for `<Component` references.
    pub ui_source: PathBuf,
    /// Shared service-package artifact written by the sibling generator.
    pub packages_path: PathBuf,
}

impl GraphConfig {
    /// Conventional artifact layout under a project root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            inventory_path: root.join("data/cars.json"),
            assets_dir: root.join("public/cars"),
            persona_source: root.join("src/data/personas.js"),
            ui_source: root.join("src/pages/Inventory.jsx"),
            packages_path: root.join("data/service_packages.json"),
            root_dir: root,
        }
    }

    /// Override the namespace; a blank value keeps the default.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !namespace.trim().is_empty() {
            self.namespace = namespace;
        }
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::with_root(".")
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds one fleet graph per [`FleetGraphBuilder::build`] call.
pub struct FleetGraphBuilder {
    config: GraphConfig,
    packages: Box<dyn ServicePackageSource>,
}

impl FleetGraphBuilder {
    /// Builder over the configured file artifacts.
    pub fn new(config: GraphConfig) -> Self {
        let packages = Box::new(JsonPackageArtifact::new(config.packages_path.clone()));
        Self { config, packages }
    }

    /// Builder with a swapped-in package gateway (tests, other transports).
    pub fn with_package_source(config: GraphConfig, packages: Box<dyn ServicePackageSource>) -> Self {
        Self { config, packages }
    }

    /// Assemble the graph from the current contents of the upstream files.
    ///
    /// Never fails: degraded sources contribute nothing, and the result is
    /// always structurally valid.
    pub fn build(&self) -> FleetGraph {
        let namespace = &self.config.namespace;

        let mut graph = FleetGraph::new(GraphMetadata {
            namespace: namespace.clone(),
            root_source: self.config.root_dir.display().to_string(),
            generated_at: Utc::now(),
        });

        // Inventory and the fleet root.
        let inventory = load_inventory(&self.config.inventory_path, &self.config.assets_dir);
        let stats = summarize_vehicles(&inventory.vehicles);

        let root_id =
            ident::node_id_from_source(namespace, NodeType::FleetInventory, &inventory.source);
        graph.add_node(Node {
            id: root_id.clone(),
            node_type: NodeType::FleetInventory,
            label: format!("Fleet inventory ({} vehicles)", stats.total),
            payload: BTreeMap::from([
                ("total".to_string(), json!(stats.total)),
                ("avgRange".to_string(), json!(stats.avg_range)),
                ("trims".to_string(), json!(stats.trims)),
            ]),
            source: inventory.source.clone(),
        });

        // Vehicles. The id→node map only registers vehicles with a non-empty
        // upstream id; the rest stay un-referenceable by service packages.
        let mut vehicle_nodes: HashMap<String, String> = HashMap::new();
        for (index, vehicle) in inventory.vehicles.iter().enumerate() {
            let node_id = if vehicle.id.is_empty() {
                let key = format!("{}#{}", inventory.source, index);
                ident::node_id_from_source(namespace, NodeType::Vehicle, &key)
            } else {
                ident::node_id(namespace, NodeType::Vehicle, &vehicle.id)
            };

            if !graph.add_node(Node {
                id: node_id.clone(),
                node_type: NodeType::Vehicle,
                label: vehicle_label(vehicle),
                payload: vehicle_payload(vehicle),
                source: inventory.source.clone(),
            }) {
                tracing::warn!(
                    vehicle_id = %vehicle.id,
                    index,
                    "duplicate vehicle id in inventory, keeping the first record"
                );
                continue;
            }

            if !vehicle.id.is_empty() {
                vehicle_nodes
                    .entry(vehicle.id.clone())
                    .or_insert_with(|| node_id.clone());
            }
            graph.link(&node_id, &root_id, Relation::PartOf);
        }

        // Persona, if one can be extracted.
        let persona = load_persona_metadata(&self.config.persona_source);
        if let Some(snippet) = persona.persona {
            let persona_id =
                ident::node_id_from_source(namespace, NodeType::Persona, &persona.source);
            graph.add_node(Node {
                id: persona_id.clone(),
                node_type: NodeType::Persona,
                label: "User persona".to_string(),
                payload: BTreeMap::from([("persona".to_string(), json!(snippet))]),
                source: persona.source,
            });
            graph.link(&persona_id, &root_id, Relation::Targets);
        }

        // Referenced UI components, if any.
        let scan = list_referenced_components(&self.config.ui_source);
        let ui_id = if scan.components.is_empty() {
            None
        } else {
            let ui_id =
                ident::node_id_from_source(namespace, NodeType::UIComponentSet, &scan.source);
            graph.add_node(Node {
                id: ui_id.clone(),
                node_type: NodeType::UIComponentSet,
                label: format!("UI components ({})", scan.components.len()),
                payload: BTreeMap::from([
                    ("components".to_string(), json!(scan.components)),
                    ("count".to_string(), json!(scan.components.len())),
                ]),
                source: scan.source,
            });
            graph.link(&ui_id, &root_id, Relation::Visualizes);
            Some(ui_id)
        };

        // Service packages: join against known vehicles, surface in the UI
        // set when one exists, and always align with the root.
        let locator = self.packages.locator();
        for (index, package) in self.packages.list_packages().iter().enumerate() {
            let node_id = if package.id.is_empty() {
                let key = format!("{}#{}", locator, index);
                ident::node_id_from_source(namespace, NodeType::ServicePackage, &key)
            } else {
                ident::node_id(namespace, NodeType::ServicePackage, &package.id)
            };

            let source = if package.source.is_empty() {
                locator.clone()
            } else {
                package.source.clone()
            };

            if !graph.add_node(Node {
                id: node_id.clone(),
                node_type: NodeType::ServicePackage,
                label: package_label(package),
                payload: BTreeMap::from([
                    ("id".to_string(), json!(package.id)),
                    ("vehicleId".to_string(), json!(package.vehicle_id)),
                    ("package".to_string(), json!(package.package)),
                    ("price".to_string(), json!(package.price)),
                    ("cadence".to_string(), json!(package.cadence)),
                    ("workshop".to_string(), json!(package.workshop)),
                    ("dependencies".to_string(), json!(package.dependencies)),
                ]),
                source,
            }) {
                tracing::warn!(
                    package_id = %package.id,
                    index,
                    "duplicate service package id, keeping the first record"
                );
                continue;
            }

            // Referential miss is expected, not a fault: no edge, no log.
            if let Some(vehicle_node) = vehicle_nodes.get(&package.vehicle_id) {
                graph.link(&node_id, vehicle_node, Relation::Services);
            }
            if let Some(ui_id) = &ui_id {
                graph.link(&node_id, ui_id, Relation::SurfacesIn);
            }
            graph.link(&node_id, &root_id, Relation::AlignWith);
        }

        graph
    }
}

/// Build a graph straight from a configuration, using the file artifacts.
pub fn build_fleet_graph(config: &GraphConfig) -> FleetGraph {
    FleetGraphBuilder::new(config.clone()).build()
}

/// Display label for a vehicle: make/model/trim where present.
fn vehicle_label(vehicle: &VehicleRecord) -> String {
    let parts: Vec<&str> = [
        vehicle.make.as_deref(),
        vehicle.model.as_deref(),
        vehicle.trim.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        if vehicle.id.is_empty() {
            "Vehicle".to_string()
        } else {
            format!("Vehicle {}", vehicle.id)
        }
    } else {
        parts.join(" ")
    }
}

/// Allow-listed payload projection: only the uniform vehicle fields are
/// copied, whatever else the upstream carried.
fn vehicle_payload(vehicle: &VehicleRecord) -> BTreeMap<String, Value> {
    let mut payload = BTreeMap::new();
    if !vehicle.id.is_empty() {
        payload.insert("id".to_string(), json!(vehicle.id));
    }
    if let Some(make) = &vehicle.make {
        payload.insert("make".to_string(), json!(make));
    }
    if let Some(model) = &vehicle.model {
        payload.insert("model".to_string(), json!(model));
    }
    if let Some(trim) = &vehicle.trim {
        payload.insert("trim".to_string(), json!(trim));
    }
    if let Some(range) = vehicle.range {
        payload.insert("range".to_string(), json!(range));
    }
    if let Some(price) = vehicle.price {
        payload.insert("price".to_string(), json!(price));
    }
    if let Some(battery) = vehicle.battery {
        payload.insert("battery".to_string(), json!(battery));
    }
    if let Some(image) = &vehicle.image {
        payload.insert("image".to_string(), json!(image));
    }
    payload
}

fn package_label(package: &fleetgraph_ingest::ServicePackage) -> String {
    if package.package.is_empty() {
        "Service package".to_string()
    } else {
        format!("{} service package", package.package)
    }
}
