//! Property tests over graph construction.
//!
//! The builder must uphold its structural invariants for *any* inventory
//! shape, not just the fixtures: one root, one `PART_OF` per vehicle node,
//! unique node ids, and no dangling edge endpoints.

use fleetgraph_build::{build_fleet_graph, GraphConfig};
use fleetgraph_model::{NodeType, Relation};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;

/// Loosely-shaped vehicle objects: every field optional, ids may repeat.
fn vehicle_strategy() -> impl Strategy<Value = Value> {
    (
        proptest::option::of("[a-z][a-z0-9]{0,5}"),
        proptest::option::of(0i64..1500),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of(10_000i64..120_000),
    )
        .prop_map(|(id, range, trim, price)| {
            let mut obj = serde_json::Map::new();
            if let Some(id) = id {
                obj.insert("id".to_string(), id.into());
            }
            if let Some(range) = range {
                obj.insert("range".to_string(), range.into());
            }
            if let Some(trim) = trim {
                obj.insert("trim".to_string(), trim.into());
            }
            if let Some(price) = price {
                obj.insert("price".to_string(), price.into());
            }
            Value::Object(obj)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn structural_invariants_hold_for_any_inventory(
        vehicles in proptest::collection::vec(vehicle_strategy(), 0..12)
    ) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/cars.json"),
            serde_json::to_string(&Value::Array(vehicles)).unwrap(),
        )
        .unwrap();

        let graph = build_fleet_graph(&GraphConfig::with_root(dir.path()));

        // Exactly one root, whatever the input.
        let roots = graph.nodes_of_type(NodeType::FleetInventory);
        prop_assert_eq!(roots.len(), 1);
        let root_id = roots[0].id.clone();

        // Node ids are unique per build.
        let mut ids = HashSet::new();
        for node in &graph.nodes {
            prop_assert!(ids.insert(node.id.clone()), "duplicate node id {}", node.id);
        }

        // Every vehicle node has exactly one outgoing edge: PART_OF → root.
        for vehicle in graph.nodes_of_type(NodeType::Vehicle) {
            let out: Vec<_> = graph.edges.iter().filter(|e| e.from == vehicle.id).collect();
            prop_assert_eq!(out.len(), 1);
            prop_assert_eq!(out[0].relation, Relation::PartOf);
            prop_assert_eq!(&out[0].to, &root_id);
        }

        // No edge points at a node outside this build.
        for edge in &graph.edges {
            prop_assert!(graph.contains(&edge.from));
            prop_assert!(graph.contains(&edge.to));
        }
    }

    #[test]
    fn rebuilds_have_identical_topology(
        vehicles in proptest::collection::vec(vehicle_strategy(), 0..8)
    ) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/cars.json"),
            serde_json::to_string(&Value::Array(vehicles)).unwrap(),
        )
        .unwrap();

        let config = GraphConfig::with_root(dir.path());
        let first = build_fleet_graph(&config);
        let second = build_fleet_graph(&config);

        prop_assert_eq!(&first.nodes, &second.nodes);
        prop_assert_eq!(&first.edges, &second.edges);
    }
}
