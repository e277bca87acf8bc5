//! Derived read-only views

use super::label::Label;

/// Two-partition expansion of a hypergraph: one vertex per edge, one per
/// node, and a link per incidence.
///
/// A snapshot: it owns its labels and does not track later mutation of
/// the model it came from (the model drops its memoized copy on mutation).
#[derive(Debug, Clone, PartialEq)]
pub struct BipartiteView {
    edge_vertices: Vec<Label>,
    node_vertices: Vec<Label>,
    links: Vec<(Label, Label)>,
}

impl BipartiteView {
    pub(crate) fn new(
        edge_vertices: Vec<Label>,
        node_vertices: Vec<Label>,
        links: Vec<(Label, Label)>,
    ) -> Self {
        Self {
            edge_vertices,
            node_vertices,
            links,
        }
    }

    /// Vertices of the edge partition, in first-seen order.
    pub fn edge_vertices(&self) -> &[Label] {
        &self.edge_vertices
    }

    /// Vertices of the node partition, in first-seen order.
    pub fn node_vertices(&self) -> &[Label] {
        &self.node_vertices
    }

    /// (edge, node) links, one per incidence.
    pub fn links(&self) -> &[(Label, Label)] {
        &self.links
    }

    pub fn vertex_count(&self) -> usize {
        self.edge_vertices.len() + self.node_vertices.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn has_link(&self, edge: &Label, node: &Label) -> bool {
        self.links
            .iter()
            .any(|(e, n)| e == edge && n == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_and_links_are_disjoint_views() {
        let view = BipartiteView::new(
            vec![Label::from("P")],
            vec![Label::from("A"), Label::from("C")],
            vec![
                (Label::from("P"), Label::from("A")),
                (Label::from("P"), Label::from("C")),
            ],
        );

        assert_eq!(view.vertex_count(), 3);
        assert_eq!(view.link_count(), 2);
        assert!(view.has_link(&Label::from("P"), &Label::from("A")));
        assert!(!view.has_link(&Label::from("P"), &Label::from("K")));
    }
}
