//! Small named graphs and random instances.
//!
//! Every generator labels vertices `1..=n`.

use super::types::{Graph, Vertex};
use rand::Rng;

fn build(n: Vertex, edges: &[(Vertex, Vertex)]) -> Graph {
    let mut graph = Graph::with_vertices(1..=n);
    for &(u, v) in edges {
        // Generators never produce loops.
        let _ = graph.add_edge(u, v);
    }
    graph
}

/// Path `1 - 2 - ... - n` (P5 for `n = 5`).
pub fn path(n: Vertex) -> Graph {
    let edges: Vec<_> = (1..n).map(|u| (u, u + 1)).collect();
    build(n, &edges)
}

/// Cycle `1 - 2 - ... - n - 1` (C4 for `n = 4`). For `n < 3` this is a path.
pub fn cycle(n: Vertex) -> Graph {
    let mut edges: Vec<_> = (1..n).map(|u| (u, u + 1)).collect();
    if n >= 3 {
        edges.push((n, 1));
    }
    build(n, &edges)
}

/// Claw K1,3 with centre 3 and leaves 1, 2, 4.
pub fn claw() -> Graph {
    build(4, &[(1, 3), (2, 3), (3, 4)])
}

/// Paw: triangle 1-2-3 with pendant vertex 4 attached to 3.
pub fn paw() -> Graph {
    build(4, &[(1, 2), (1, 3), (2, 3), (3, 4)])
}

/// Diamond: K4 minus the edge {2, 4}.
pub fn diamond() -> Graph {
    build(4, &[(1, 2), (1, 3), (1, 4), (2, 3), (3, 4)])
}

/// Star K1,leaves with centre 1 (K1,4 for `leaves = 4`).
pub fn star(leaves: Vertex) -> Graph {
    let edges: Vec<_> = (2..=leaves + 1).map(|v| (1, v)).collect();
    build(leaves + 1, &edges)
}

/// Complete graph K_n.
pub fn complete(n: Vertex) -> Graph {
    let mut edges = Vec::new();
    for u in 1..=n {
        for v in u + 1..=n {
            edges.push((u, v));
        }
    }
    build(n, &edges)
}

/// Erdős–Rényi G(n, p): each pair is an edge with probability `p`.
pub fn gnp<R: Rng>(n: Vertex, p: f64, rng: &mut R) -> Graph {
    let p = p.clamp(0.0, 1.0);
    let mut edges = Vec::new();
    for u in 1..=n {
        for v in u + 1..=n {
            if rng.random_bool(p) {
                edges.push((u, v));
            }
        }
    }
    build(n, &edges)
}
