//! Dense index view of a [`Graph`] for traversal-heavy algorithms.

use super::types::{Graph, Vertex};
use fixedbitset::FixedBitSet;
use std::collections::HashMap;

/// Adjacency lists and neighbourhood bit sets over dense indices `0..n`.
///
/// Index `i` corresponds to the `i`-th smallest vertex label, so the
/// ascending `ones()` of a set translate to sorted label lists.
#[derive(Debug, Clone)]
pub(crate) struct IndexedGraph {
    labels: Vec<Vertex>,
    index: HashMap<Vertex, usize>,
    adjacency: Vec<Vec<usize>>,
    matrix: Vec<FixedBitSet>,
}

impl IndexedGraph {
    pub(crate) fn new(graph: &Graph) -> Self {
        let labels = graph.vertices();
        let n = labels.len();
        let index: HashMap<Vertex, usize> =
            labels.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let adjacency: Vec<Vec<usize>> = labels
            .iter()
            .map(|&v| graph.neighbors(v).iter().map(|w| index[w]).collect())
            .collect();
        let matrix = adjacency
            .iter()
            .map(|row| {
                let mut set = FixedBitSet::with_capacity(n);
                set.extend(row.iter().copied());
                set
            })
            .collect();
        Self {
            labels,
            index,
            adjacency,
            matrix,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    pub(crate) fn index_of(&self, v: Vertex) -> Option<usize> {
        self.index.get(&v).copied()
    }

    pub(crate) fn label(&self, i: usize) -> Vertex {
        self.labels[i]
    }

    /// An empty set sized for this graph.
    pub(crate) fn empty_set(&self) -> FixedBitSet {
        FixedBitSet::with_capacity(self.len())
    }

    pub(crate) fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.matrix[i].contains(j)
    }

    /// `N[i]`: the vertex together with its neighbours.
    pub(crate) fn closed_neighbourhood(&self, i: usize) -> FixedBitSet {
        let mut set = self.matrix[i].clone();
        set.insert(i);
        set
    }

    /// The component containing `start` in the graph with every `blocked`
    /// vertex removed. `start` must not be blocked.
    pub(crate) fn component(&self, start: usize, blocked: &FixedBitSet) -> FixedBitSet {
        let mut visited = blocked.clone();
        let mut component = self.empty_set();
        let mut stack = vec![start];
        visited.insert(start);
        component.insert(start);
        while let Some(v) = stack.pop() {
            for &w in &self.adjacency[v] {
                if !visited.put(w) {
                    component.insert(w);
                    stack.push(w);
                }
            }
        }
        component
    }

    /// Open neighbourhood `N(set)`.
    pub(crate) fn boundary(&self, set: &FixedBitSet) -> FixedBitSet {
        let mut border = self.empty_set();
        for v in set.ones() {
            border.union_with(&self.matrix[v]);
        }
        border.difference_with(set);
        border
    }
}
