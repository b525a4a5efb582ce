//! Fleet knowledge-graph model
//!
//! Typed node/edge graph produced by the aggregator:
//!
//! - one `FleetInventory` root node per build,
//! - `Vehicle`, `Persona`, `UIComponentSet` and `ServicePackage` nodes,
//! - edges with fixed relation semantics (`PART_OF`, `SERVICES`, ...),
//! - build metadata carrying namespace, root source and timestamp.
//!
//! Identifiers are content-derived and deterministic (see [`ident`]);
//! unchanged inputs rebuild to an identical graph, ids included. An edge is
//! never emitted to a node that does not exist in the same build:
//! [`FleetGraph::link`] refuses dangling endpoints.

pub mod ident;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ============================================================================
// Node / edge vocabulary
// ============================================================================

/// Node types in the fleet graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    FleetInventory,
    Vehicle,
    Persona,
    UIComponentSet,
    ServicePackage,
}

impl NodeType {
    /// Short lowercase tag used inside node ids.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeType::FleetInventory => "fleet",
            NodeType::Vehicle => "vehicle",
            NodeType::Persona => "persona",
            NodeType::UIComponentSet => "ui",
            NodeType::ServicePackage => "package",
        }
    }

    /// All node types, in root-first order.
    pub fn all() -> [NodeType; 5] {
        [
            NodeType::FleetInventory,
            NodeType::Vehicle,
            NodeType::Persona,
            NodeType::UIComponentSet,
            NodeType::ServicePackage,
        ]
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::FleetInventory => "FleetInventory",
            NodeType::Vehicle => "Vehicle",
            NodeType::Persona => "Persona",
            NodeType::UIComponentSet => "UIComponentSet",
            NodeType::ServicePackage => "ServicePackage",
        };
        f.write_str(name)
    }
}

/// Relation semantics between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    /// Vehicle → fleet root.
    PartOf,
    /// Persona → fleet root.
    Targets,
    /// UI component set → fleet root.
    Visualizes,
    /// Service package → the vehicle it services.
    Services,
    /// Service package → the UI component set it surfaces in.
    SurfacesIn,
    /// Service package → fleet root.
    AlignWith,
}

impl Relation {
    /// All relations, in the order edges are discovered during a build.
    pub fn all() -> [Relation; 6] {
        [
            Relation::PartOf,
            Relation::Targets,
            Relation::Visualizes,
            Relation::Services,
            Relation::SurfacesIn,
            Relation::AlignWith,
        ]
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Relation::PartOf => "PART_OF",
            Relation::Targets => "TARGETS",
            Relation::Visualizes => "VISUALIZES",
            Relation::Services => "SERVICES",
            Relation::SurfacesIn => "SURFACES_IN",
            Relation::AlignWith => "ALIGN_WITH",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Graph entities
// ============================================================================

/// A typed graph node with a field→value payload and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Globally unique within one build, `{namespace}:{tag}:{discriminator}`.
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Human-readable display string.
    pub label: String,
    /// Type-specific fields only; unrelated upstream fields are never copied.
    pub payload: BTreeMap<String, Value>,
    /// Upstream artifact the node was derived from (path or logical tag).
    pub source: String,
}

/// A directed, typed edge between two nodes of the same build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Deterministic from the endpoints, `{from}->{to}`.
    pub id: String,
    pub from: String,
    pub to: String,
    pub relation: Relation,
}

/// Build-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    pub namespace: String,
    /// Root directory or logical source the build was configured with.
    pub root_source: String,
    pub generated_at: DateTime<Utc>,
}

/// The assembled knowledge graph.
///
/// `nodes` keeps insertion order (= discovery order); a private index maps
/// ids to positions for lookups and for the dangling-edge check.
#[derive(Debug, Clone, Serialize)]
pub struct FleetGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub metadata: GraphMetadata,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
}

impl FleetGraph {
    pub fn new(metadata: GraphMetadata) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            metadata,
            node_index: HashMap::new(),
        }
    }

    /// Add a node. Returns `false` (and drops the node) when a node with the
    /// same id is already present: ids are unique per build.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.node_index.contains_key(&node.id) {
            return false;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Add an edge between two existing nodes. Returns `false` (and emits
    /// nothing) when either endpoint is absent from this build.
    pub fn link(&mut self, from: &str, to: &str, relation: Relation) -> bool {
        if !self.node_index.contains_key(from) || !self.node_index.contains_key(to) {
            return false;
        }
        self.edges.push(Edge {
            id: ident::edge_id(from, to),
            from: from.to_string(),
            to: to.to_string(),
            relation,
        });
        true
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// All nodes of a given type, in discovery order.
    pub fn nodes_of_type(&self, node_type: NodeType) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.node_type == node_type)
            .collect()
    }

    /// Nodes directly connected to `id`, in either direction, optionally
    /// filtered by relation.
    pub fn neighbors(&self, id: &str, relation: Option<Relation>) -> Vec<&Node> {
        self.edges
            .iter()
            .filter(|e| relation.map_or(true, |r| e.relation == r))
            .filter_map(|e| {
                if e.from == id {
                    self.node(&e.to)
                } else if e.to == id {
                    self.node(&e.from)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Outgoing edges of a node, in discovery order.
    pub fn edges_from(&self, id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.from == id).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
