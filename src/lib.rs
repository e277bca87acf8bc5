//! Hyperplex: an incidence-based hypergraph engine
//!
//! Models a hypergraph (named edges over arbitrary-size node subsets)
//! with attributes at three granularities: per node, per edge, and per
//! incidence ("cell"). Four raw input shapes (edge sets, per-cell
//! mappings, coordinate arrays, tabular records) normalize into one
//! canonical incidence representation backed by stable integer handles.
//!
//! # Core Concepts
//!
//! - **Edges**: named subsets of nodes, any size
//! - **Cells**: single (edge, node) memberships, the finest property grain
//! - **Duplicate detection**: equivalence classes of edges with identical
//!   node sets, recomputed on demand
//! - **Derived views**: bipartite expansion and the dual, memoized until
//!   the next structural mutation
//!
//! # Example
//!
//! ```
//! use hyperplex::Hypergraph;
//!
//! let graph = Hypergraph::from_edge_sets(vec![
//!     ("P", vec!["A", "C", "K"]),
//!     ("R", vec!["A", "E"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_weight(&"P".into()), Some(1.0));
//! ```

mod adapter;
mod graph;

pub use adapter::{
    BuildError, BuildResult, CellData, CellProperties, HypergraphConfig, IncidenceTriple,
    MergePolicy, SetSystem, Table,
};
pub use graph::{
    BipartiteView, EdgeHandle, GraphError, GraphResult, Hypergraph, IncidenceStore, Label,
    LabelArena, NodeHandle, Properties, PropertyRow, PropertyTable, PropertyValue,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
