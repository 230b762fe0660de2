//! Simple undirected graph over integer vertex labels.

use crate::error::{Result, SubpartitionError};
use petgraph::graphmap::UnGraphMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Vertex label. Labels are arbitrary distinct integers; the catalog
/// graphs use `1..=n`.
pub type Vertex = u32;

/// A simple undirected graph: no self-loops, no parallel edges.
///
/// Vertices and edges may be added in any order; all queries that feed
/// the model builder iterate vertices in ascending label order, so the
/// insertion order never leaks into generated models.
///
/// # Examples
///
/// ```
/// use u_subpartition::graph::Graph;
///
/// let g = Graph::from_edges(1..=4, [(1, 2), (2, 3), (3, 4), (4, 1)]).unwrap();
/// assert_eq!(g.vertex_count(), 4);
/// assert_eq!(g.edge_count(), 4);
/// assert!(g.has_edge(4, 1));
/// assert!(!g.has_edge(1, 3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: UnGraphMap<Vertex, ()>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            inner: UnGraphMap::new(),
        }
    }

    /// Creates a graph with the given isolated vertices.
    pub fn with_vertices(vertices: impl IntoIterator<Item = Vertex>) -> Self {
        let mut graph = Self::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        graph
    }

    /// Creates a graph from a vertex list and an edge list.
    ///
    /// Edge endpoints missing from `vertices` are added implicitly.
    /// Repeated edges (in either orientation) collapse into one.
    pub fn from_edges(
        vertices: impl IntoIterator<Item = Vertex>,
        edges: impl IntoIterator<Item = (Vertex, Vertex)>,
    ) -> Result<Self> {
        let mut graph = Self::with_vertices(vertices);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Adds a vertex. Adding an existing vertex is a no-op.
    pub fn add_vertex(&mut self, v: Vertex) {
        self.inner.add_node(v);
    }

    /// Adds the undirected edge `{u, v}`, adding missing endpoints.
    ///
    /// Returns `true` if the edge was not present before.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<bool> {
        if u == v {
            return Err(SubpartitionError::SelfLoop(u));
        }
        Ok(self.inner.add_edge(u, v, ()).is_none())
    }

    /// Whether `v` is a vertex of the graph.
    pub fn contains_vertex(&self, v: Vertex) -> bool {
        self.inner.contains_node(v)
    }

    /// Whether `{u, v}` is an edge of the graph.
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.inner.contains_edge(u, v)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Vertices in ascending label order.
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices: Vec<Vertex> = self.inner.nodes().collect();
        vertices.sort_unstable();
        vertices
    }

    /// Neighbours of `v` in ascending label order (empty if `v` is absent).
    pub fn neighbors(&self, v: Vertex) -> Vec<Vertex> {
        if !self.inner.contains_node(v) {
            return Vec::new();
        }
        let mut neighbors: Vec<Vertex> = self.inner.neighbors(v).collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Degree of `v` (0 if `v` is absent).
    pub fn degree(&self, v: Vertex) -> usize {
        if !self.inner.contains_node(v) {
            return 0;
        }
        self.inner.neighbors(v).count()
    }

    /// Edges as `(min, max)` pairs in lexicographic order.
    pub fn edges(&self) -> Vec<(Vertex, Vertex)> {
        let mut edges: Vec<(Vertex, Vertex)> = self
            .inner
            .all_edges()
            .map(|(u, v, _)| if u < v { (u, v) } else { (v, u) })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Unordered vertex pairs `(u, v)` with `u < v` that are not edges,
    /// ordered by `u` then `v`.
    pub fn non_adjacent_pairs(&self) -> Vec<(Vertex, Vertex)> {
        let vertices = self.vertices();
        let mut pairs = Vec::new();
        for (i, &u) in vertices.iter().enumerate() {
            for &v in &vertices[i + 1..] {
                if !self.has_edge(u, v) {
                    pairs.push((u, v));
                }
            }
        }
        pairs
    }

    /// Content hash of the vertex and edge sets.
    ///
    /// Equal graphs hash equally regardless of insertion order; any added
    /// vertex or edge changes the value (up to hash collisions).
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.vertices().hash(&mut hasher);
        self.edges().hash(&mut hasher);
        hasher.finish()
    }
}
