//! Bijection between node labels and dense integer indices.
//!
//! The layout engine only understands nodes numbered `0..n`. [`IndexMapping`]
//! assigns those numbers in first-seen order and translates in both
//! directions. Both lookups are backed by a single [`IndexSet`], so the two
//! directions can never disagree.

use std::hash::Hash;

use indexmap::IndexSet;

use crate::graph::LayoutGraph;

/// An edge expressed in index space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Label-to-index bijection over `[0, len)`.
///
/// # Examples
///
/// ```
/// use forceatlas_core::mapping::IndexMapping;
///
/// let mapping = IndexMapping::from_labels(["b", "a", "b", "c"]);
///
/// assert_eq!(mapping.len(), 3);
/// assert_eq!(mapping.index_of(&"a"), Some(1));
/// assert_eq!(mapping.label_of(2), Some(&"c"));
/// ```
#[derive(Debug, Clone)]
pub struct IndexMapping<N> {
    labels: IndexSet<N>,
}

impl<N> IndexMapping<N>
where
    N: Clone + Eq + Hash,
{
    /// Builds a mapping from labels in iteration order; repeats are ignored.
    pub fn from_labels(labels: impl IntoIterator<Item = N>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
        }
    }

    /// Builds a mapping over the nodes of `graph`.
    pub fn from_graph(graph: &LayoutGraph<N>) -> Self {
        Self {
            labels: graph.nodes().cloned().collect(),
        }
    }

    /// Forward lookup: label to index.
    pub fn index_of(&self, label: &N) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    /// Translates every edge of `graph` into index space.
    ///
    /// Returns `None` if an endpoint is not covered by this mapping.
    pub fn relabel_edges(&self, graph: &LayoutGraph<N>) -> Option<Vec<IndexedEdge>> {
        graph
            .edges()
            .map(|edge| {
                Some(IndexedEdge {
                    source: self.index_of(edge.source())?,
                    target: self.index_of(edge.target())?,
                    weight: edge.weight(),
                })
            })
            .collect()
    }
}

impl<N> IndexMapping<N> {
    /// Inverse lookup: index to label.
    pub fn label_of(&self, index: usize) -> Option<&N> {
        self.labels.get_index(index)
    }

    /// Iterates over `(index, label)` pairs in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, &N)> {
        self.labels.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_indices_follow_first_occurrence() {
        let mapping: IndexMapping<&str> = IndexMapping::from_labels(["z", "y", "z", "x", "y"]);

        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.index_of(&"z"), Some(0));
        assert_eq!(mapping.index_of(&"y"), Some(1));
        assert_eq!(mapping.index_of(&"x"), Some(2));
        assert_eq!(mapping.index_of(&"w"), None);
        assert_eq!(mapping.label_of(3), None);
    }

    #[test]
    fn test_from_graph_matches_node_order() {
        let mut graph = LayoutGraph::new();
        graph.add_edge("b", "a");
        graph.add_node("c");

        let mapping = IndexMapping::from_graph(&graph);

        let pairs: Vec<_> = mapping.iter().map(|(i, l)| (i, *l)).collect();
        assert_eq!(pairs, vec![(0, "b"), (1, "a"), (2, "c")]);
    }

    #[test]
    fn test_relabel_edges() {
        let mut graph = LayoutGraph::new();
        graph.add_edge("b", "a");
        graph.add_weighted_edge("a", "c", 3.0);

        let mapping = IndexMapping::from_graph(&graph);
        let edges = mapping.relabel_edges(&graph).unwrap();

        assert_eq!(
            edges,
            vec![
                IndexedEdge {
                    source: 0,
                    target: 1,
                    weight: 1.0
                },
                IndexedEdge {
                    source: 1,
                    target: 2,
                    weight: 3.0
                },
            ]
        );
    }

    #[test]
    fn test_relabel_edges_with_foreign_mapping() {
        let mut graph = LayoutGraph::new();
        graph.add_edge("a", "b");

        let mapping: IndexMapping<&str> = IndexMapping::from_labels(["a"]);

        assert!(mapping.relabel_edges(&graph).is_none());
    }

    #[test]
    fn test_empty_mapping() {
        let mapping = IndexMapping::from_graph(&LayoutGraph::<u8>::new());

        assert!(mapping.is_empty());
        assert_eq!(mapping.iter().count(), 0);
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Forward then inverse lookup returns the original label, and indices cover `0..len`.
    fn check_mapping_is_bijection(labels: Vec<u16>) -> Result<(), TestCaseError> {
        let mapping: IndexMapping<u16> = IndexMapping::from_labels(labels.iter().copied());

        let mut seen = vec![false; mapping.len()];
        for label in &labels {
            let index = mapping.index_of(label);
            prop_assert!(index.is_some());
            let index = index.unwrap();
            prop_assert!(index < mapping.len());
            prop_assert_eq!(mapping.label_of(index), Some(label));
            seen[index] = true;
        }

        prop_assert!(seen.into_iter().all(|covered| covered));
        Ok(())
    }

    proptest! {
        #[test]
        fn mapping_is_bijection(labels in prop::collection::vec(0u16..64, 0..128)) {
            check_mapping_is_bijection(labels)?;
        }
    }
}
