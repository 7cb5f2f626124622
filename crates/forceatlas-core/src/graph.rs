//! Graph input for layout computation.
//!
//! [`LayoutGraph`] is the normalized graph the driver works with: an ordered
//! node set, a directedness flag, and weighted edges between nodes. Labels are
//! arbitrary hashable values; their insertion order decides the dense index
//! each node receives later on (see [`IndexMapping`](crate::mapping::IndexMapping)).
//!
//! # Example
//!
//! ```
//! use forceatlas_core::graph::LayoutGraph;
//!
//! let mut graph = LayoutGraph::new();
//! graph.add_edge("a", "b");
//! graph.add_edge("b", "c");
//! graph.add_node("lonely");
//!
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_count(), 2);
//! ```

use std::hash::Hash;

use indexmap::IndexSet;
use petgraph::{EdgeType, graph::IndexType, visit::EdgeRef};

/// Weight assigned to edges added without an explicit weight.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// A weighted edge between two node labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<N> {
    source: N,
    target: N,
    weight: f64,
}

impl<N> Edge<N> {
    /// Returns the source endpoint.
    pub fn source(&self) -> &N {
        &self.source
    }

    /// Returns the target endpoint.
    pub fn target(&self) -> &N {
        &self.target
    }

    /// Returns the edge weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A graph whose nodes are to be positioned.
///
/// Every edge endpoint is guaranteed to be a member of the node set: adding an
/// edge inserts any endpoint that is not yet present.
#[derive(Debug, Clone)]
pub struct LayoutGraph<N> {
    nodes: IndexSet<N>,
    edges: Vec<Edge<N>>,
    directed: bool,
}

impl<N> Default for LayoutGraph<N> {
    fn default() -> Self {
        Self {
            nodes: IndexSet::new(),
            edges: Vec::new(),
            directed: false,
        }
    }
}

impl<N> LayoutGraph<N>
where
    N: Clone + Eq + Hash,
{
    /// Creates an empty undirected graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty directed graph.
    pub fn new_directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Creates an edgeless graph from a collection of node labels.
    ///
    /// Duplicate labels collapse into a single node.
    pub fn from_nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        nodes.into_iter().collect()
    }

    /// Converts a [`petgraph::Graph`] using a closure to extract edge weights.
    ///
    /// Node weights become labels and directedness follows the graph's edge type.
    /// Parallel node weights that compare equal are merged into one node.
    pub fn from_petgraph_with<E, Ty, Ix, F>(graph: &petgraph::Graph<N, E, Ty, Ix>, weight: F) -> Self
    where
        Ty: EdgeType,
        Ix: IndexType,
        F: Fn(&E) -> f64,
    {
        let mut result = if graph.is_directed() {
            Self::new_directed()
        } else {
            Self::new()
        };

        for index in graph.node_indices() {
            result.add_node(graph[index].clone());
        }

        for edge in graph.edge_references() {
            result.add_weighted_edge(
                graph[edge.source()].clone(),
                graph[edge.target()].clone(),
                weight(edge.weight()),
            );
        }

        result
    }

    /// Adds a node, returning `false` if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        self.nodes.insert(node)
    }

    /// Adds an edge with [`DEFAULT_EDGE_WEIGHT`].
    pub fn add_edge(&mut self, source: N, target: N) {
        self.add_weighted_edge(source, target, DEFAULT_EDGE_WEIGHT);
    }

    /// Adds an edge with an explicit weight, inserting missing endpoints.
    pub fn add_weighted_edge(&mut self, source: N, target: N, weight: f64) {
        self.nodes.insert(source.clone());
        self.nodes.insert(target.clone());
        self.edges.push(Edge {
            source,
            target,
            weight,
        });
    }

    /// Returns `true` if the node is part of the graph.
    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }
}

impl<N> LayoutGraph<N> {
    /// Iterates over node labels in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &N> {
        self.nodes.iter()
    }

    /// Iterates over edges in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge<N>> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N> FromIterator<N> for LayoutGraph<N>
where
    N: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut graph = Self::new();
        for node in iter {
            graph.add_node(node);
        }
        graph
    }
}

impl<N, E, Ty, Ix> From<&petgraph::Graph<N, E, Ty, Ix>> for LayoutGraph<N>
where
    N: Clone + Eq + Hash,
    Ty: EdgeType,
    Ix: IndexType,
{
    fn from(graph: &petgraph::Graph<N, E, Ty, Ix>) -> Self {
        Self::from_petgraph_with(graph, |_| DEFAULT_EDGE_WEIGHT)
    }
}
