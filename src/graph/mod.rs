//! Input graphs.
//!
//! [`Graph`] is a simple undirected graph over integer labels, backed by
//! `petgraph`'s `UnGraphMap`. The [`catalog`] module provides the small
//! named graphs commonly used to study connected subpartition polytopes
//! (paths, cycles, claw, paw, diamond, stars) plus random G(n, p) graphs.

pub mod catalog;
mod indexed;
mod types;

pub(crate) use indexed::IndexedGraph;
pub use types::{Graph, Vertex};
