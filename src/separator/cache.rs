//! Memoization table for separator families.

use super::types::Separator;
use crate::graph::{Graph, Vertex};
use std::collections::HashMap;
use std::sync::Arc;

/// Separator families keyed by vertex pair, valid for one graph.
///
/// The table remembers the [`Graph::fingerprint`] it was filled from;
/// [`sync`](Self::sync) drops every entry when a different (or modified)
/// graph is presented.
#[derive(Debug, Clone, Default)]
pub struct SeparatorCache {
    fingerprint: Option<u64>,
    entries: HashMap<(Vertex, Vertex), Arc<[Separator]>>,
    hits: usize,
    misses: usize,
}

impl SeparatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the cache to `graph`, clearing it if it was filled from
    /// another graph. Returns `true` if entries were discarded.
    pub fn sync(&mut self, graph: &Graph) -> bool {
        let fingerprint = graph.fingerprint();
        if self.fingerprint == Some(fingerprint) {
            return false;
        }
        let discarded = !self.entries.is_empty();
        self.entries.clear();
        self.fingerprint = Some(fingerprint);
        discarded
    }

    /// Cached family for `(a, b)`, if present.
    pub fn get(&mut self, a: Vertex, b: Vertex) -> Option<Arc<[Separator]>> {
        match self.entries.get(&(a, b)) {
            Some(family) => {
                self.hits += 1;
                Some(Arc::clone(family))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores the complete family for `(a, b)`.
    pub fn insert(&mut self, a: Vertex, b: Vertex, family: Vec<Separator>) {
        self.entries.insert((a, b), family.into());
    }

    /// Drops all entries and the graph binding.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.fingerprint = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::catalog;

    #[test]
    fn test_hit_and_miss() {
        let mut cache = SeparatorCache::new();
        let g = catalog::claw();
        assert!(!cache.sync(&g));
        assert!(cache.get(1, 2).is_none());
        cache.insert(1, 2, vec![Separator::new([3])]);
        assert_eq!(cache.get(1, 2).unwrap().as_ref(), &[Separator::new([3])]);
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidated_by_graph_change() {
        let mut cache = SeparatorCache::new();
        let mut g = catalog::path(4);
        cache.sync(&g);
        cache.insert(1, 4, vec![Separator::new([2]), Separator::new([3])]);

        assert!(!cache.sync(&g));
        assert_eq!(cache.len(), 1);

        g.add_edge(1, 3).unwrap();
        assert!(cache.sync(&g));
        assert!(cache.is_empty());
    }
}
