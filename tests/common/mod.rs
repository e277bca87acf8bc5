//! Shared fixtures for hypergraph construction tests
//!
//! One six-edge, seven-node system expressed in all four accepted input
//! shapes, a system with a duplicate edge pair, and a scenes/characters
//! records table with a cell property column.

#![allow(dead_code)]

use hyperplex::{Hypergraph, Label, Properties, SetSystem, Table};
use std::collections::BTreeSet;

/// Edge memberships of the six-edge system, in canonical order.
pub const SIX_EDGES: [(&str, &[&str]); 6] = [
    ("P", &["A", "C", "K"]),
    ("R", &["A", "E"]),
    ("S", &["A", "K", "T2", "V"]),
    ("L", &["C", "E"]),
    ("O", &["T1", "T2"]),
    ("I", &["K", "T2"]),
];

/// Shape 1: edge label -> node labels.
pub fn six_edge_sets() -> SetSystem {
    SetSystem::from_edge_sets(
        SIX_EDGES
            .iter()
            .map(|(edge, nodes)| (*edge, nodes.to_vec())),
    )
}

/// Shape 2: edge label -> (node label -> empty cell properties).
pub fn six_edge_cell_mappings() -> SetSystem {
    SetSystem::from_cell_mappings(SIX_EDGES.iter().map(|(edge, nodes)| {
        (
            *edge,
            nodes
                .iter()
                .map(|node| (*node, Properties::new()))
                .collect::<Vec<_>>(),
        )
    }))
}

/// Shape 3: coordinate pairs against positional label lists.
pub fn six_edge_coordinates() -> SetSystem {
    let edge_labels = vec!["P", "R", "S", "L", "O", "I"];
    let node_labels = vec!["A", "C", "E", "K", "T1", "T2", "V"];
    let pairs = vec![
        (0, 0),
        (0, 1),
        (0, 3),
        (1, 0),
        (1, 2),
        (2, 0),
        (2, 3),
        (2, 5),
        (2, 6),
        (3, 1),
        (3, 2),
        (4, 4),
        (4, 5),
        (5, 3),
        (5, 5),
    ];
    SetSystem::from_coordinates(pairs, edge_labels, node_labels)
}

/// Shape 4: one record per incidence, default column names.
pub fn six_edge_records() -> SetSystem {
    let mut table = Table::new(["edges", "nodes"]);
    for (edge, nodes) in SIX_EDGES {
        for node in nodes {
            table.push_values(vec![edge.into(), (*node).into()]);
        }
    }
    SetSystem::Records(table)
}

/// A system where edges L and M cover the same node set.
pub fn dupes_sets() -> SetSystem {
    SetSystem::from_edge_sets(vec![
        ("I", vec!["K", "T2"]),
        ("L", vec!["C", "E", "F"]),
        ("M", vec!["C", "E", "F"]),
        ("O", vec!["T1", "T2"]),
        ("P", vec!["A", "C", "K"]),
        ("R", vec!["A", "E", "F"]),
        ("S", vec!["A", "K", "T2", "V"]),
    ])
}

/// Scene memberships for the records fixture.
pub const SCENES: [(&str, &[&str]); 8] = [
    ("0", &["FN", "TH"]),
    ("1", &["TH", "JV"]),
    ("2", &["BM", "FN", "JA"]),
    ("3", &["JV", "JU", "CH", "BM"]),
    ("4", &["JU", "CH", "BR", "CN", "CC", "JV", "BM"]),
    ("5", &["TH", "GP"]),
    ("6", &["GP", "MP"]),
    ("7", &["MA", "GP"]),
];

/// A (Scenes, Characters, color) records table; colors alternate so each
/// cell's expected value is deterministic.
pub fn scenes_table() -> Table {
    let mut table = Table::new(["Scenes", "Characters", "color"]);
    let mut row = 0usize;
    for (scene, characters) in SCENES {
        for character in characters {
            let color = if row % 2 == 0 { "red" } else { "green" };
            table.push_values(vec![scene.into(), (*character).into(), color.into()]);
            row += 1;
        }
    }
    table
}

/// The incidence set as (edge, node) label pairs, for cross-shape equality.
pub fn incidence_pairs(graph: &Hypergraph) -> BTreeSet<(Label, Label)> {
    let mut pairs = BTreeSet::new();
    for edge in graph.edges() {
        for node in graph.edge_nodes(edge).unwrap() {
            pairs.insert((edge.clone(), node.clone()));
        }
    }
    pairs
}
