//! The queryable hypergraph
//!
//! Composes the incidence store with the three property tables and owns
//! the memoized derived views. Readers share `&self`; structural mutation
//! takes `&mut self`, which is the whole concurrency contract: concurrent
//! readers of an unmutated model are safe, writers serialize at the
//! borrow checker.

use super::label::{Label, Properties, PropertyValue};
use super::properties::PropertyTable;
use super::store::{EdgeHandle, IncidenceStore, NodeHandle};
use super::views::BipartiteView;
use crate::adapter::{
    BuildError, BuildResult, CellData, HypergraphConfig, MergePolicy, SetSystem, Table,
};
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Errors from structural mutation and required-property lookup.
///
/// A failed mutation leaves the model exactly as it was.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge already exists: {0}")]
    DuplicateEdge(Label),

    #[error("node already exists: {0}")]
    DuplicateNode(Label),

    #[error("incidence already exists: ({edge}, {node})")]
    DuplicateCell { edge: Label, node: Label },

    #[error("edge not found: {0}")]
    EdgeNotFound(Label),

    #[error("node not found: {0}")]
    NodeNotFound(Label),

    #[error("incidence not found: ({edge}, {node})")]
    CellNotFound { edge: Label, node: Label },

    #[error("property '{key}' not set for {owner}")]
    PropertyNotFound { owner: String, key: String },
}

/// Result type for model operations
pub type GraphResult<T> = Result<T, GraphError>;

/// An incidence-based hypergraph with node, edge, and cell properties.
///
/// Built once from a raw input snapshot; property values may be upserted
/// afterwards, and structural mutation goes through the explicit
/// `add_*`/`remove_*` operations, each atomic per call.
#[derive(Debug, Clone)]
pub struct Hypergraph {
    store: IncidenceStore,
    edge_props: PropertyTable<EdgeHandle>,
    node_props: PropertyTable<NodeHandle>,
    cell_props: PropertyTable<(EdgeHandle, NodeHandle)>,
    config: HypergraphConfig,
    bipartite: OnceLock<BipartiteView>,
    dual: OnceLock<Box<Hypergraph>>,
}

impl Default for Hypergraph {
    fn default() -> Self {
        Self::empty()
    }
}

impl Hypergraph {
    /// An empty hypergraph with default configuration.
    pub fn empty() -> Self {
        Self::with_config(HypergraphConfig::default())
    }

    /// An empty hypergraph carrying the given configuration.
    pub fn with_config(config: HypergraphConfig) -> Self {
        Self {
            store: IncidenceStore::new(),
            edge_props: PropertyTable::new(config.default_edge_weight),
            node_props: PropertyTable::new(config.default_node_weight),
            cell_props: PropertyTable::new(config.default_cell_weight),
            config,
            bipartite: OnceLock::new(),
            dual: OnceLock::new(),
        }
    }

    /// Build from any accepted input shape.
    ///
    /// Normalizes the shape into incidence triples, interns labels in
    /// first-seen order, merges duplicate pairs under the configured
    /// policy, then attaches the configured node/edge property sources.
    /// Any failure aborts the whole build.
    pub fn new(setsystem: SetSystem, config: HypergraphConfig) -> BuildResult<Self> {
        let triples = setsystem.normalize(&config)?;
        let mut graph = Self::with_config(config);

        for triple in triples {
            let edge = graph.store.ensure_edge(triple.edge);
            let node = graph.store.ensure_node(triple.node);
            let fresh = graph.store.insert_pair(edge, node);
            if let Some(cell) = triple.cell {
                graph.merge_cell(edge, node, fresh, cell)?;
            }
        }
        graph.attach_configured_properties();

        debug!(
            edges = graph.edge_count(),
            nodes = graph.node_count(),
            incidences = graph.incidence_count(),
            "built hypergraph"
        );
        Ok(graph)
    }

    /// Shorthand: build from an edge -> node-set mapping with defaults.
    pub fn from_edge_sets<E, S, N>(sets: impl IntoIterator<Item = (E, S)>) -> BuildResult<Self>
    where
        E: Into<Label>,
        S: IntoIterator<Item = N>,
        N: Into<Label>,
    {
        Self::new(SetSystem::from_edge_sets(sets), HypergraphConfig::default())
    }

    fn merge_cell(
        &mut self,
        edge: EdgeHandle,
        node: NodeHandle,
        fresh: bool,
        cell: CellData,
    ) -> BuildResult<()> {
        if !fresh && self.config.merge_policy == MergePolicy::Reject {
            let key = (edge, node);
            let property_conflict = cell.properties.iter().any(|(name, value)| {
                self.cell_props
                    .get(&key, name)
                    .map_or(false, |stored| stored != value)
            });
            let weight_conflict = match (cell.weight, self.cell_props.stored_weight(&key)) {
                (Some(new), Some(stored)) => new != stored,
                _ => false,
            };
            if property_conflict || weight_conflict {
                return Err(BuildError::ConflictingCell {
                    edge: self.store.edge_label(edge).clone(),
                    node: self.store.node_label(node).clone(),
                });
            }
        }
        self.cell_props
            .set((edge, node), Some(cell.properties), cell.weight);
        Ok(())
    }

    /// Attach the node/edge property sources named in the config. Labels
    /// not seen in any incidence become isolated nodes or empty edges.
    /// A `weight` entry becomes the stored weight, not a plain property.
    fn attach_configured_properties(&mut self) {
        let edge_properties = self.config.edge_properties.clone();
        for (label, mut properties) in edge_properties {
            let handle = self.store.ensure_edge(label);
            let weight = properties.remove("weight").and_then(|v| v.as_f64());
            self.edge_props.set(handle, Some(properties), weight);
        }
        let node_properties = self.config.node_properties.clone();
        for (label, mut properties) in node_properties {
            let handle = self.store.ensure_node(label);
            let weight = properties.remove("weight").and_then(|v| v.as_f64());
            self.node_props.set(handle, Some(properties), weight);
        }
    }

    pub fn config(&self) -> &HypergraphConfig {
        &self.config
    }

    // --- Read access ---

    /// Edge labels in first-seen order.
    pub fn edges(&self) -> impl Iterator<Item = &Label> + '_ {
        self.store.edge_handles().map(|h| self.store.edge_label(h))
    }

    /// Node labels in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Label> + '_ {
        self.store.node_handles().map(|h| self.store.node_label(h))
    }

    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    pub fn incidence_count(&self) -> usize {
        self.store.incidence_count()
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.store.node_count()
    }

    pub fn contains_edge(&self, edge: &Label) -> bool {
        self.store.contains_edge(edge)
    }

    pub fn contains_node(&self, node: &Label) -> bool {
        self.store.contains_node(node)
    }

    pub fn contains_cell(&self, edge: &Label, node: &Label) -> bool {
        match (self.store.edge_handle(edge), self.store.node_handle(node)) {
            (Some(e), Some(n)) => self.store.contains_pair(e, n),
            _ => false,
        }
    }

    /// Member nodes of an edge, in first-seen order.
    pub fn edge_nodes(&self, edge: &Label) -> Option<Vec<&Label>> {
        let handle = self.store.edge_handle(edge)?;
        let members = self.store.members(handle)?;
        Some(members.iter().map(|n| self.store.node_label(*n)).collect())
    }

    /// Edges a node belongs to, in first-seen order.
    pub fn node_edges(&self, node: &Label) -> Option<Vec<&Label>> {
        let handle = self.store.node_handle(node)?;
        let memberships = self.store.memberships(handle)?;
        Some(
            memberships
                .iter()
                .map(|e| self.store.edge_label(*e))
                .collect(),
        )
    }

    /// Number of nodes in an edge.
    pub fn size(&self, edge: &Label) -> Option<usize> {
        let handle = self.store.edge_handle(edge)?;
        Some(self.store.members(handle)?.len())
    }

    /// Number of edges containing a node.
    pub fn degree(&self, node: &Label) -> Option<usize> {
        let handle = self.store.node_handle(node)?;
        Some(self.store.memberships(handle)?.len())
    }

    /// Nodes sharing at least one edge with the given node.
    pub fn neighbors(&self, node: &Label) -> Option<Vec<&Label>> {
        let handle = self.store.node_handle(node)?;
        let mut seen: IndexSet<NodeHandle> = IndexSet::new();
        for edge in self.store.memberships(handle)? {
            for member in self.store.members(*edge).into_iter().flatten() {
                if *member != handle {
                    seen.insert(*member);
                }
            }
        }
        Some(seen.iter().map(|n| self.store.node_label(*n)).collect())
    }

    // --- Weights and properties ---

    /// Edge weight, falling back to the configured default. `None` only
    /// when the edge does not exist.
    pub fn edge_weight(&self, edge: &Label) -> Option<f64> {
        Some(self.edge_props.weight(&self.store.edge_handle(edge)?))
    }

    pub fn node_weight(&self, node: &Label) -> Option<f64> {
        Some(self.node_props.weight(&self.store.node_handle(node)?))
    }

    pub fn cell_weight(&self, edge: &Label, node: &Label) -> Option<f64> {
        let edge = self.store.edge_handle(edge)?;
        let node = self.store.node_handle(node)?;
        self.store
            .contains_pair(edge, node)
            .then(|| self.cell_props.weight(&(edge, node)))
    }

    /// Edge property mapping; empty if none was ever set, `None` only when
    /// the edge does not exist.
    pub fn edge_properties(&self, edge: &Label) -> Option<Properties> {
        Some(self.edge_props.properties(&self.store.edge_handle(edge)?))
    }

    pub fn node_properties(&self, node: &Label) -> Option<Properties> {
        Some(self.node_props.properties(&self.store.node_handle(node)?))
    }

    pub fn cell_properties(&self, edge: &Label, node: &Label) -> Option<Properties> {
        let edge = self.store.edge_handle(edge)?;
        let node = self.store.node_handle(node)?;
        self.store
            .contains_pair(edge, node)
            .then(|| self.cell_props.properties(&(edge, node)))
    }

    pub fn edge_property(&self, edge: &Label, key: &str) -> Option<&PropertyValue> {
        self.edge_props.get(&self.store.edge_handle(edge)?, key)
    }

    pub fn node_property(&self, node: &Label, key: &str) -> Option<&PropertyValue> {
        self.node_props.get(&self.store.node_handle(node)?, key)
    }

    pub fn cell_property(&self, edge: &Label, node: &Label, key: &str) -> Option<&PropertyValue> {
        let edge = self.store.edge_handle(edge)?;
        let node = self.store.node_handle(node)?;
        self.cell_props.get(&(edge, node), key)
    }

    /// Demand a property key. Unlike the plain accessors this errors when
    /// the key was never set and no per-key default exists.
    pub fn require_edge_property(&self, edge: &Label, key: &str) -> GraphResult<&PropertyValue> {
        let handle = self
            .store
            .edge_handle(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.clone()))?;
        self.edge_props
            .get(&handle, key)
            .ok_or_else(|| GraphError::PropertyNotFound {
                owner: format!("edge {}", edge),
                key: key.to_string(),
            })
    }

    pub fn require_node_property(&self, node: &Label, key: &str) -> GraphResult<&PropertyValue> {
        let handle = self
            .store
            .node_handle(node)
            .ok_or_else(|| GraphError::NodeNotFound(node.clone()))?;
        self.node_props
            .get(&handle, key)
            .ok_or_else(|| GraphError::PropertyNotFound {
                owner: format!("node {}", node),
                key: key.to_string(),
            })
    }

    pub fn require_cell_property(
        &self,
        edge: &Label,
        node: &Label,
        key: &str,
    ) -> GraphResult<&PropertyValue> {
        let e = self
            .store
            .edge_handle(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.clone()))?;
        let n = self
            .store
            .node_handle(node)
            .ok_or_else(|| GraphError::NodeNotFound(node.clone()))?;
        self.cell_props
            .get(&(e, n), key)
            .ok_or_else(|| GraphError::PropertyNotFound {
                owner: format!("cell ({}, {})", edge, node),
                key: key.to_string(),
            })
    }

    // --- Duplicate-edge detection ---

    /// Equivalence classes of edges with identical node sets, singletons
    /// included. Recomputed from current incidence state on every call.
    pub fn duplicate_edges(&self) -> Vec<Vec<&Label>> {
        self.store
            .equivalence_classes()
            .into_iter()
            .map(|class| {
                class
                    .into_iter()
                    .map(|handle| self.store.edge_label(handle))
                    .collect()
            })
            .collect()
    }

    /// Whether two edges cover exactly the same node set.
    pub fn edges_equivalent(&self, a: &Label, b: &Label) -> bool {
        match (self.store.edge_handle(a), self.store.edge_handle(b)) {
            (Some(a), Some(b)) => self.store.members(a) == self.store.members(b),
            _ => false,
        }
    }

    // --- Exports ---

    /// Edge label -> member node labels, in first-seen order.
    pub fn incidence_dict(&self) -> IndexMap<Label, Vec<Label>> {
        self.store
            .edge_handles()
            .map(|edge| {
                let members = self
                    .store
                    .members(edge)
                    .into_iter()
                    .flatten()
                    .map(|n| self.store.node_label(*n).clone())
                    .collect();
                (self.store.edge_label(edge).clone(), members)
            })
            .collect()
    }

    /// The incidence table: edge column, node column, weight column, plus
    /// one column per cell property key in use. Reconstructing from this
    /// table (records shape) round-trips the incidence set and cell values.
    pub fn incidence_table(&self) -> Table {
        let mut property_columns: BTreeSet<String> = BTreeSet::new();
        for (edge, node) in self.store.pairs() {
            if let Some(row) = self.cell_props.row(&(edge, node)) {
                property_columns.extend(row.properties().keys().cloned());
            }
        }

        let mut columns = vec![
            self.config.edge_col.clone(),
            self.config.node_col.clone(),
            "weight".to_string(),
        ];
        columns.extend(property_columns.iter().cloned());
        let mut table = Table::new(columns);

        for (edge, node) in self.store.pairs() {
            let key = (edge, node);
            let mut row: Vec<Option<PropertyValue>> =
                Vec::with_capacity(3 + property_columns.len());
            row.push(Some(self.store.edge_label(edge).into()));
            row.push(Some(self.store.node_label(node).into()));
            row.push(Some(PropertyValue::Float(self.cell_props.weight(&key))));
            let stored = self.cell_props.row(&key);
            for column in &property_columns {
                row.push(
                    stored
                        .and_then(|r| r.properties().get(column))
                        .cloned(),
                );
            }
            table.push_row(row);
        }
        table
    }

    // --- Restriction ---

    /// A new hypergraph over only the named edges, their incident nodes,
    /// and the property rows that survive.
    pub fn restrict_to_edges(&self, keep: &[Label]) -> Hypergraph {
        let mut restricted = Hypergraph::with_config(self.config.clone());
        for edge in self.store.edge_handles() {
            if !keep.contains(self.store.edge_label(edge)) {
                continue;
            }
            let new_edge = restricted
                .store
                .ensure_edge(self.store.edge_label(edge).clone());
            if let Some(row) = self.edge_props.row(&edge) {
                restricted
                    .edge_props
                    .set(new_edge, Some(row.properties().clone()), row.weight());
            }
            for node in self.store.members(edge).into_iter().flatten() {
                let new_node = restricted
                    .store
                    .ensure_node(self.store.node_label(*node).clone());
                restricted.store.insert_pair(new_edge, new_node);
                if let Some(row) = self.cell_props.row(&(edge, *node)) {
                    restricted.cell_props.set(
                        (new_edge, new_node),
                        Some(row.properties().clone()),
                        row.weight(),
                    );
                }
                if let Some(row) = self.node_props.row(node) {
                    restricted
                        .node_props
                        .set(new_node, Some(row.properties().clone()), row.weight());
                }
            }
        }
        restricted
    }

    /// A new hypergraph over only the named nodes; edges keep the members
    /// that survive, and edges left with no member are dropped.
    pub fn restrict_to_nodes(&self, keep: &[Label]) -> Hypergraph {
        let mut restricted = Hypergraph::with_config(self.config.clone());
        for edge in self.store.edge_handles() {
            let kept: Vec<NodeHandle> = self
                .store
                .members(edge)
                .into_iter()
                .flatten()
                .filter(|node| keep.contains(self.store.node_label(**node)))
                .copied()
                .collect();
            if kept.is_empty() {
                continue;
            }
            let new_edge = restricted
                .store
                .ensure_edge(self.store.edge_label(edge).clone());
            if let Some(row) = self.edge_props.row(&edge) {
                restricted
                    .edge_props
                    .set(new_edge, Some(row.properties().clone()), row.weight());
            }
            for node in kept {
                let new_node = restricted
                    .store
                    .ensure_node(self.store.node_label(node).clone());
                restricted.store.insert_pair(new_edge, new_node);
                if let Some(row) = self.cell_props.row(&(edge, node)) {
                    restricted.cell_props.set(
                        (new_edge, new_node),
                        Some(row.properties().clone()),
                        row.weight(),
                    );
                }
                if let Some(row) = self.node_props.row(&node) {
                    restricted
                        .node_props
                        .set(new_node, Some(row.properties().clone()), row.weight());
                }
            }
        }
        restricted
    }

    // --- Derived views ---

    /// The bipartite expansion, computed on first request and memoized
    /// until the next structural mutation.
    pub fn bipartite(&self) -> &BipartiteView {
        self.bipartite.get_or_init(|| self.build_bipartite())
    }

    fn build_bipartite(&self) -> BipartiteView {
        let edge_vertices = self.edges().cloned().collect();
        let node_vertices = self.nodes().cloned().collect();
        let links = self
            .store
            .pairs()
            .map(|(edge, node)| {
                (
                    self.store.edge_label(edge).clone(),
                    self.store.node_label(node).clone(),
                )
            })
            .collect();
        BipartiteView::new(edge_vertices, node_vertices, links)
    }

    /// The dual hypergraph (edges and nodes swapped, property tables
    /// swapped along with them), memoized until the next mutation.
    pub fn dual(&self) -> &Hypergraph {
        self.dual
            .get_or_init(|| Box::new(self.build_dual()))
            .as_ref()
    }

    fn build_dual(&self) -> Hypergraph {
        let config = HypergraphConfig {
            edge_col: self.config.node_col.clone(),
            node_col: self.config.edge_col.clone(),
            default_edge_weight: self.config.default_node_weight,
            default_node_weight: self.config.default_edge_weight,
            ..self.config.clone()
        };
        let mut dual = Hypergraph::with_config(config);

        // old nodes become edges, old edges become nodes, order preserved
        for node in self.store.node_handles() {
            dual.store.ensure_edge(self.store.node_label(node).clone());
        }
        for edge in self.store.edge_handles() {
            dual.store.ensure_node(self.store.edge_label(edge).clone());
        }
        for (edge, node) in self.store.pairs() {
            let dual_edge = dual.store.ensure_edge(self.store.node_label(node).clone());
            let dual_node = dual.store.ensure_node(self.store.edge_label(edge).clone());
            dual.store.insert_pair(dual_edge, dual_node);
            if let Some(row) = self.cell_props.row(&(edge, node)) {
                dual.cell_props.set(
                    (dual_edge, dual_node),
                    Some(row.properties().clone()),
                    row.weight(),
                );
            }
        }

        for (node, row) in self.node_props.rows() {
            if let Some(handle) = dual.store.edge_handle(self.store.node_label(*node)) {
                dual.edge_props
                    .set(handle, Some(row.properties().clone()), row.weight());
            }
        }
        for (edge, row) in self.edge_props.rows() {
            if let Some(handle) = dual.store.node_handle(self.store.edge_label(*edge)) {
                dual.node_props
                    .set(handle, Some(row.properties().clone()), row.weight());
            }
        }
        for (key, value) in self.node_props.key_defaults() {
            dual.edge_props.set_default(key.clone(), value.clone());
        }
        for (key, value) in self.edge_props.key_defaults() {
            dual.node_props.set_default(key.clone(), value.clone());
        }
        dual
    }

    fn invalidate(&mut self) {
        self.bipartite.take();
        self.dual.take();
    }

    /// The dual memoizes swapped copies of the property tables, so
    /// property upserts drop it; the bipartite view is structure-only.
    fn invalidate_dual(&mut self) {
        self.dual.take();
    }

    // --- Structural mutation ---

    /// Add an empty edge.
    pub fn add_edge(&mut self, edge: impl Into<Label>) -> GraphResult<()> {
        let edge = edge.into();
        if self.store.contains_edge(&edge) {
            return Err(GraphError::DuplicateEdge(edge));
        }
        self.store.ensure_edge(edge);
        self.invalidate();
        Ok(())
    }

    /// Add an isolated node.
    pub fn add_node(&mut self, node: impl Into<Label>) -> GraphResult<()> {
        let node = node.into();
        if self.store.contains_node(&node) {
            return Err(GraphError::DuplicateNode(node));
        }
        self.store.ensure_node(node);
        self.invalidate();
        Ok(())
    }

    /// Add one incidence, creating either endpoint if absent.
    pub fn add_incidence(
        &mut self,
        edge: impl Into<Label>,
        node: impl Into<Label>,
    ) -> GraphResult<()> {
        let (edge, node) = (edge.into(), node.into());
        let e = self.store.ensure_edge(edge.clone());
        let n = self.store.ensure_node(node.clone());
        if !self.store.insert_pair(e, n) {
            // endpoints already existed, so nothing was changed above
            return Err(GraphError::DuplicateCell { edge, node });
        }
        self.invalidate();
        Ok(())
    }

    /// Remove an edge, all its incidences, and their property rows.
    /// Member nodes stay, possibly isolated.
    pub fn remove_edge(&mut self, edge: &Label) -> GraphResult<()> {
        let handle = self
            .store
            .edge_handle(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.clone()))?;
        let members = self.store.remove_edge(handle).unwrap_or_default();
        for node in members {
            self.cell_props.remove(&(handle, node));
        }
        self.edge_props.remove(&handle);
        self.invalidate();
        Ok(())
    }

    /// Remove a node, all its incidences, and their property rows.
    /// Edges it belonged to stay, possibly empty.
    pub fn remove_node(&mut self, node: &Label) -> GraphResult<()> {
        let handle = self
            .store
            .node_handle(node)
            .ok_or_else(|| GraphError::NodeNotFound(node.clone()))?;
        let memberships = self.store.remove_node(handle).unwrap_or_default();
        for edge in memberships {
            self.cell_props.remove(&(edge, handle));
        }
        self.node_props.remove(&handle);
        self.invalidate();
        Ok(())
    }

    /// Remove one incidence and its cell row. Endpoints stay.
    pub fn remove_incidence(&mut self, edge: &Label, node: &Label) -> GraphResult<()> {
        let e = self
            .store
            .edge_handle(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.clone()))?;
        let n = self
            .store
            .node_handle(node)
            .ok_or_else(|| GraphError::NodeNotFound(node.clone()))?;
        if !self.store.remove_pair(e, n) {
            return Err(GraphError::CellNotFound {
                edge: edge.clone(),
                node: node.clone(),
            });
        }
        self.cell_props.remove(&(e, n));
        self.invalidate();
        Ok(())
    }

    // --- Property upsert ---

    /// Upsert edge properties and/or weight. Never changes structure.
    pub fn set_edge_properties(
        &mut self,
        edge: &Label,
        properties: Option<Properties>,
        weight: Option<f64>,
    ) -> GraphResult<()> {
        let handle = self
            .store
            .edge_handle(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.clone()))?;
        self.edge_props.set(handle, properties, weight);
        self.invalidate_dual();
        Ok(())
    }

    pub fn set_node_properties(
        &mut self,
        node: &Label,
        properties: Option<Properties>,
        weight: Option<f64>,
    ) -> GraphResult<()> {
        let handle = self
            .store
            .node_handle(node)
            .ok_or_else(|| GraphError::NodeNotFound(node.clone()))?;
        self.node_props.set(handle, properties, weight);
        self.invalidate_dual();
        Ok(())
    }

    pub fn set_cell_properties(
        &mut self,
        edge: &Label,
        node: &Label,
        properties: Option<Properties>,
        weight: Option<f64>,
    ) -> GraphResult<()> {
        let e = self
            .store
            .edge_handle(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.clone()))?;
        let n = self
            .store
            .node_handle(node)
            .ok_or_else(|| GraphError::NodeNotFound(node.clone()))?;
        if !self.store.contains_pair(e, n) {
            return Err(GraphError::CellNotFound {
                edge: edge.clone(),
                node: node.clone(),
            });
        }
        self.cell_props.set((e, n), properties, weight);
        self.invalidate_dual();
        Ok(())
    }

    /// Fallback value for an edge property key with no stored value.
    pub fn set_default_edge_property(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.edge_props.set_default(key, value);
        self.invalidate_dual();
    }

    pub fn set_default_node_property(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.node_props.set_default(key, value);
        self.invalidate_dual();
    }

    pub fn set_default_cell_property(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.cell_props.set_default(key, value);
        self.invalidate_dual();
    }
}
