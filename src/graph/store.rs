//! Handle arenas and the canonical incidence table
//!
//! Labels are interned once into dense integer handles; everything below
//! the API boundary is keyed by handle, never by label.

use super::label::Label;
use indexmap::{IndexMap, IndexSet};

/// Stable handle for an interned edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeHandle(u32);

impl EdgeHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable handle for an interned node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u32);

impl NodeHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Intern table assigning dense handles in first-seen order.
///
/// Handles are never recycled: a label keeps its handle even after the
/// identity is structurally removed, so re-adding it is cheap and stable.
#[derive(Debug, Clone, Default)]
pub struct LabelArena {
    labels: IndexSet<Label>,
}

impl LabelArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a label, returning its existing handle or minting the next one.
    pub fn intern(&mut self, label: Label) -> u32 {
        let (index, _) = self.labels.insert_full(label);
        index as u32
    }

    pub fn lookup(&self, label: &Label) -> Option<u32> {
        self.labels.get_index_of(label).map(|i| i as u32)
    }

    /// Resolve a handle minted by this arena back to its label.
    pub fn resolve(&self, handle: u32) -> &Label {
        self.labels
            .get_index(handle as usize)
            .expect("handle was minted by this arena")
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The canonical incidence table: edge and node arenas plus adjacency
/// in both directions, all in first-seen order.
///
/// Presence in `edge_members` / `node_memberships` defines existence;
/// isolated nodes and empty edges are ordinary entries with no pairs.
#[derive(Debug, Clone, Default)]
pub struct IncidenceStore {
    edges: LabelArena,
    nodes: LabelArena,
    edge_members: IndexMap<EdgeHandle, IndexSet<NodeHandle>>,
    node_memberships: IndexMap<NodeHandle, IndexSet<EdgeHandle>>,
}

impl IncidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern an edge label, creating an empty edge on first appearance.
    pub fn ensure_edge(&mut self, label: Label) -> EdgeHandle {
        let handle = EdgeHandle(self.edges.intern(label));
        self.edge_members.entry(handle).or_default();
        handle
    }

    /// Intern a node label, creating an isolated node on first appearance.
    pub fn ensure_node(&mut self, label: Label) -> NodeHandle {
        let handle = NodeHandle(self.nodes.intern(label));
        self.node_memberships.entry(handle).or_default();
        handle
    }

    /// Handle of a live edge, if present.
    pub fn edge_handle(&self, label: &Label) -> Option<EdgeHandle> {
        let handle = EdgeHandle(self.edges.lookup(label)?);
        self.edge_members.contains_key(&handle).then_some(handle)
    }

    /// Handle of a live node, if present.
    pub fn node_handle(&self, label: &Label) -> Option<NodeHandle> {
        let handle = NodeHandle(self.nodes.lookup(label)?);
        self.node_memberships.contains_key(&handle).then_some(handle)
    }

    pub fn edge_label(&self, handle: EdgeHandle) -> &Label {
        self.edges.resolve(handle.0)
    }

    pub fn node_label(&self, handle: NodeHandle) -> &Label {
        self.nodes.resolve(handle.0)
    }

    pub fn contains_edge(&self, label: &Label) -> bool {
        self.edge_handle(label).is_some()
    }

    pub fn contains_node(&self, label: &Label) -> bool {
        self.node_handle(label).is_some()
    }

    pub fn contains_pair(&self, edge: EdgeHandle, node: NodeHandle) -> bool {
        self.edge_members
            .get(&edge)
            .map_or(false, |members| members.contains(&node))
    }

    /// Insert an incidence pair. Returns false if the pair already existed.
    pub fn insert_pair(&mut self, edge: EdgeHandle, node: NodeHandle) -> bool {
        let fresh = self.edge_members.entry(edge).or_default().insert(node);
        self.node_memberships.entry(node).or_default().insert(edge);
        fresh
    }

    /// Remove one incidence pair. Endpoints stay, possibly isolated/empty.
    pub fn remove_pair(&mut self, edge: EdgeHandle, node: NodeHandle) -> bool {
        let removed = self
            .edge_members
            .get_mut(&edge)
            .map_or(false, |members| members.shift_remove(&node));
        if removed {
            if let Some(memberships) = self.node_memberships.get_mut(&node) {
                memberships.shift_remove(&edge);
            }
        }
        removed
    }

    /// Remove an edge and all its incidences; returns the nodes it covered.
    pub fn remove_edge(&mut self, edge: EdgeHandle) -> Option<Vec<NodeHandle>> {
        let members = self.edge_members.shift_remove(&edge)?;
        for node in &members {
            if let Some(memberships) = self.node_memberships.get_mut(node) {
                memberships.shift_remove(&edge);
            }
        }
        Some(members.into_iter().collect())
    }

    /// Remove a node and all its incidences; returns the edges it belonged to.
    pub fn remove_node(&mut self, node: NodeHandle) -> Option<Vec<EdgeHandle>> {
        let memberships = self.node_memberships.shift_remove(&node)?;
        for edge in &memberships {
            if let Some(members) = self.edge_members.get_mut(edge) {
                members.shift_remove(&node);
            }
        }
        Some(memberships.into_iter().collect())
    }

    pub fn edge_handles(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        self.edge_members.keys().copied()
    }

    pub fn node_handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.node_memberships.keys().copied()
    }

    pub fn members(&self, edge: EdgeHandle) -> Option<&IndexSet<NodeHandle>> {
        self.edge_members.get(&edge)
    }

    pub fn memberships(&self, node: NodeHandle) -> Option<&IndexSet<EdgeHandle>> {
        self.node_memberships.get(&node)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_members.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_memberships.len()
    }

    pub fn incidence_count(&self) -> usize {
        self.edge_members.values().map(|members| members.len()).sum()
    }

    /// All pairs: edges in first-seen order, members in first-seen order.
    pub fn pairs(&self) -> impl Iterator<Item = (EdgeHandle, NodeHandle)> + '_ {
        self.edge_members
            .iter()
            .flat_map(|(edge, members)| members.iter().map(move |node| (*edge, *node)))
    }

    /// Group edges whose node sets are set-equal.
    ///
    /// Grouping key is the sorted node-handle sequence. This is a pure
    /// function of the current incidence state; it is never cached, so it
    /// cannot go stale across structural mutation.
    pub fn equivalence_classes(&self) -> Vec<Vec<EdgeHandle>> {
        let mut classes: IndexMap<Vec<NodeHandle>, Vec<EdgeHandle>> = IndexMap::new();
        for (edge, members) in &self.edge_members {
            let mut key: Vec<NodeHandle> = members.iter().copied().collect();
            key.sort_unstable();
            classes.entry(key).or_default().push(*edge);
        }
        classes.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> Label {
        Label::from(s)
    }

    #[test]
    fn intern_assigns_handles_in_first_seen_order() {
        let mut store = IncidenceStore::new();
        let p = store.ensure_edge(label("P"));
        let r = store.ensure_edge(label("R"));
        let p_again = store.ensure_edge(label("P"));

        assert_eq!(p, p_again);
        assert_eq!(p.index(), 0);
        assert_eq!(r.index(), 1);
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn insert_pair_reports_duplicates() {
        let mut store = IncidenceStore::new();
        let e = store.ensure_edge(label("P"));
        let n = store.ensure_node(label("A"));

        assert!(store.insert_pair(e, n));
        assert!(!store.insert_pair(e, n));
        assert_eq!(store.incidence_count(), 1);
    }

    #[test]
    fn remove_node_detaches_all_memberships() {
        let mut store = IncidenceStore::new();
        let p = store.ensure_edge(label("P"));
        let r = store.ensure_edge(label("R"));
        let a = store.ensure_node(label("A"));
        let c = store.ensure_node(label("C"));
        store.insert_pair(p, a);
        store.insert_pair(p, c);
        store.insert_pair(r, a);

        let touched = store.remove_node(a).unwrap();
        assert_eq!(touched.len(), 2);
        assert!(!store.contains_node(&label("A")));
        assert!(store.contains_edge(&label("R")));
        assert_eq!(store.incidence_count(), 1);
    }

    #[test]
    fn removing_last_pair_keeps_the_edge() {
        let mut store = IncidenceStore::new();
        let e = store.ensure_edge(label("P"));
        let n = store.ensure_node(label("A"));
        store.insert_pair(e, n);

        assert!(store.remove_pair(e, n));
        assert!(store.contains_edge(&label("P")));
        assert!(store.contains_node(&label("A")));
        assert_eq!(store.members(e).unwrap().len(), 0);
    }

    #[test]
    fn equivalence_classes_group_set_equal_edges() {
        let mut store = IncidenceStore::new();
        let l = store.ensure_edge(label("L"));
        let m = store.ensure_edge(label("M"));
        let o = store.ensure_edge(label("O"));
        let c = store.ensure_node(label("C"));
        let e = store.ensure_node(label("E"));
        let f = store.ensure_node(label("F"));
        // L and M cover the same nodes, in different insertion order
        store.insert_pair(l, c);
        store.insert_pair(l, e);
        store.insert_pair(l, f);
        store.insert_pair(m, f);
        store.insert_pair(m, c);
        store.insert_pair(m, e);
        store.insert_pair(o, c);

        let classes = store.equivalence_classes();
        assert_eq!(classes.len(), 2);
        assert!(classes.contains(&vec![l, m]));
        assert!(classes.contains(&vec![o]));
    }
}
