//! Separator value type.

use crate::graph::Vertex;
use std::fmt;

/// A vertex set whose removal disconnects two vertices.
///
/// Vertices are kept sorted ascending and free of duplicates, so two
/// separators with the same members compare (and hash) equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Separator {
    vertices: Vec<Vertex>,
}

impl Separator {
    /// Creates a separator from arbitrary vertices (sorted and deduplicated).
    pub fn new(vertices: impl IntoIterator<Item = Vertex>) -> Self {
        let mut vertices: Vec<Vertex> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices }
    }

    /// Members in ascending order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, v: Vertex) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    /// Whether every member of `self` is a member of `other`.
    pub fn is_subset(&self, other: &Separator) -> bool {
        self.vertices.iter().all(|&v| other.contains(v))
    }

    /// Whether `self` is a subset of `other` and strictly smaller.
    pub fn is_strict_subset(&self, other: &Separator) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    pub(crate) fn from_sorted(vertices: Vec<Vertex>) -> Self {
        debug_assert!(vertices.windows(2).all(|w| w[0] < w[1]));
        Self { vertices }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}
