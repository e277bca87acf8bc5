//! Construction options
//!
//! One explicit record enumerating every recognized option, built once and
//! passed by reference into the adapter and the property tables.

use crate::graph::{Label, Properties};
use indexmap::IndexMap;

/// How duplicate raw records for the same (edge, node) pair are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Key-wise overwrite; the later occurrence wins.
    #[default]
    LastWins,
    /// A duplicate whose values differ from the stored cell aborts the build.
    /// Identical duplicates still collapse silently.
    Reject,
}

/// Where cell properties come from.
#[derive(Debug, Clone)]
pub enum CellProperties {
    /// Named columns of a records input. Ignored for non-tabular shapes.
    Columns(Vec<String>),
    /// Precomputed per-pair mapping: edge label -> node label -> properties.
    /// Applied to every shape; inline values from the input win key-wise.
    Mapping(IndexMap<Label, IndexMap<Label, Properties>>),
}

/// Construction options for [`Hypergraph::new`](crate::Hypergraph::new).
///
/// Column options only matter for the shapes that read them; inapplicable
/// options are ignored rather than rejected.
#[derive(Debug, Clone)]
pub struct HypergraphConfig {
    /// Column holding edge labels in a records input.
    pub edge_col: String,
    /// Column holding node labels in a records input.
    pub node_col: String,
    /// Column (records) or inner-map key (cell mappings) holding the cell weight.
    pub cell_weight_col: Option<String>,
    /// Source of per-incidence properties.
    pub cell_properties: Option<CellProperties>,
    /// Node label -> property mapping, attached after construction of the
    /// incidence structure. A `weight` key becomes the node weight. Labels
    /// not seen in any incidence are created as isolated nodes.
    pub node_properties: IndexMap<Label, Properties>,
    /// Edge label -> property mapping; mirror of `node_properties`.
    pub edge_properties: IndexMap<Label, Properties>,
    pub default_edge_weight: f64,
    pub default_node_weight: f64,
    pub default_cell_weight: f64,
    pub merge_policy: MergePolicy,
}

impl Default for HypergraphConfig {
    fn default() -> Self {
        Self {
            edge_col: "edges".to_string(),
            node_col: "nodes".to_string(),
            cell_weight_col: None,
            cell_properties: None,
            node_properties: IndexMap::new(),
            edge_properties: IndexMap::new(),
            default_edge_weight: 1.0,
            default_node_weight: 1.0,
            default_cell_weight: 1.0,
            merge_policy: MergePolicy::default(),
        }
    }
}

impl HypergraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edge_col(mut self, name: impl Into<String>) -> Self {
        self.edge_col = name.into();
        self
    }

    pub fn with_node_col(mut self, name: impl Into<String>) -> Self {
        self.node_col = name.into();
        self
    }

    pub fn with_cell_weight_col(mut self, name: impl Into<String>) -> Self {
        self.cell_weight_col = Some(name.into());
        self
    }

    pub fn with_cell_properties(mut self, cell_properties: CellProperties) -> Self {
        self.cell_properties = Some(cell_properties);
        self
    }

    pub fn with_node_properties<L, I>(mut self, properties: I) -> Self
    where
        L: Into<Label>,
        I: IntoIterator<Item = (L, Properties)>,
    {
        self.node_properties = properties
            .into_iter()
            .map(|(label, props)| (label.into(), props))
            .collect();
        self
    }

    pub fn with_edge_properties<L, I>(mut self, properties: I) -> Self
    where
        L: Into<Label>,
        I: IntoIterator<Item = (L, Properties)>,
    {
        self.edge_properties = properties
            .into_iter()
            .map(|(label, props)| (label.into(), props))
            .collect();
        self
    }

    pub fn with_default_edge_weight(mut self, weight: f64) -> Self {
        self.default_edge_weight = weight;
        self
    }

    pub fn with_default_node_weight(mut self, weight: f64) -> Self {
        self.default_node_weight = weight;
        self
    }

    pub fn with_default_cell_weight(mut self, weight: f64) -> Self {
        self.default_cell_weight = weight;
        self
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// The inner-map key treated as the cell weight in mapping shapes.
    pub fn cell_weight_key(&self) -> &str {
        self.cell_weight_col.as_deref().unwrap_or("cell_weight")
    }
}
