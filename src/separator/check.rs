//! Reference checks for separators.
//!
//! These follow the definition directly and are meant for verification
//! and small instances, not for model generation.

use super::enumerator::check_pair;
use super::types::Separator;
use crate::error::{Resource, Result, SubpartitionError};
use crate::graph::{Graph, IndexedGraph, Vertex};

/// Largest number of candidate vertices [`exhaustive_separators`] accepts.
pub const MAX_EXHAUSTIVE_CANDIDATES: usize = 20;

/// Whether removing `removed` leaves `a` and `b` in different components.
///
/// Returns `false` if `a` or `b` is missing from the graph or is itself
/// in `removed`.
pub fn separates(graph: &Graph, a: Vertex, b: Vertex, removed: &[Vertex]) -> bool {
    separates_indexed(&IndexedGraph::new(graph), a, b, removed)
}

fn separates_indexed(indexed: &IndexedGraph, a: Vertex, b: Vertex, removed: &[Vertex]) -> bool {
    let (Some(ia), Some(ib)) = (indexed.index_of(a), indexed.index_of(b)) else {
        return false;
    };
    let mut blocked = indexed.empty_set();
    blocked.extend(removed.iter().filter_map(|&z| indexed.index_of(z)));
    if blocked.contains(ia) || blocked.contains(ib) {
        return false;
    }
    !indexed.component(ia, &blocked).contains(ib)
}

/// Whether `candidate` is an inclusion-minimal `(a, b)`-separator.
///
/// Separation is preserved under supersets, so it suffices to check that
/// dropping any single member reconnects `a` and `b`.
pub fn is_minimal_separator(graph: &Graph, a: Vertex, b: Vertex, candidate: &Separator) -> bool {
    let indexed = IndexedGraph::new(graph);
    if !separates_indexed(&indexed, a, b, candidate.vertices()) {
        return false;
    }
    let members = candidate.vertices();
    (0..members.len()).all(|skip| {
        let reduced: Vec<Vertex> = members
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &v)| v)
            .collect();
        !separates_indexed(&indexed, a, b, &reduced)
    })
}

/// Enumerates minimal `(a, b)`-separators by testing every vertex subset.
///
/// Candidates are visited in increasing size; a candidate containing an
/// already confirmed separator is skipped, so every accepted set is
/// minimal. Result order is by size, then lexicographic.
///
/// # Errors
///
/// Same pair errors as [`enumerate_separators`](super::enumerate_separators),
/// plus [`SubpartitionError::ResourceLimitExceeded`] when more than
/// [`MAX_EXHAUSTIVE_CANDIDATES`] vertices could belong to a separator.
pub fn exhaustive_separators(graph: &Graph, a: Vertex, b: Vertex) -> Result<Vec<Separator>> {
    check_pair(graph, a, b)?;
    let candidates: Vec<Vertex> = graph
        .vertices()
        .into_iter()
        .filter(|&v| v != a && v != b)
        .collect();
    if candidates.len() > MAX_EXHAUSTIVE_CANDIDATES {
        return Err(SubpartitionError::ResourceLimitExceeded {
            u: a,
            v: b,
            resource: Resource::ExhaustiveCandidates,
            limit: MAX_EXHAUSTIVE_CANDIDATES,
        });
    }

    let indexed = IndexedGraph::new(graph);
    let n = candidates.len();
    let members = |mask: u32| -> Vec<usize> { (0..n).filter(|&i| mask & (1 << i) != 0).collect() };
    let mut masks: Vec<u32> = (0..1u32 << n).collect();
    masks.sort_by_cached_key(|&m| (m.count_ones(), members(m)));

    let mut confirmed: Vec<u32> = Vec::new();
    let mut found = Vec::new();
    for mask in masks {
        if confirmed.iter().any(|&c| c & mask == c) {
            continue;
        }
        let subset: Vec<Vertex> = members(mask).into_iter().map(|i| candidates[i]).collect();
        if separates_indexed(&indexed, a, b, &subset) {
            confirmed.push(mask);
            found.push(Separator::from_sorted(subset));
        }
    }
    Ok(found)
}
