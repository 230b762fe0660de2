//! Connected subpartitions via minimal vertex separators.
//!
//! A *connected k-subpartition* of a graph assigns each vertex at most one
//! of `k` colours such that every colour class induces a connected
//! subgraph. This crate builds the integer programming model of that
//! structure:
//!
//! - **Graphs**: a simple undirected [`Graph`](graph::Graph) plus a
//!   [`catalog`](graph::catalog) of small named graphs.
//! - **Separators**: lazy, duplicate-free enumeration of all minimal
//!   `(a, b)`-vertex separators, with exhaustive checks for small graphs.
//! - **ILP model**: a solver-agnostic 0/1 model layer and a CPLEX LP writer.
//! - **Formulation**: the separator formulation, one inequality per
//!   non-adjacent pair, minimal separator and colour.
//!
//! No solver is bundled; the LP text is meant for CPLEX, Gurobi, HiGHS or
//! SCIP.
//!
//! # Example
//!
//! ```
//! use u_subpartition::graph::catalog;
//! use u_subpartition::{build_subpartition_ilp, to_lp_string};
//!
//! let model = build_subpartition_ilp(&catalog::claw(), 3).unwrap();
//! assert_eq!(model.separator_constraint_count(), 9);
//! let text = to_lp_string(&model);
//! assert!(text.contains("(1,2)-SEP_#1_c1: x1,1 + x2,1 - x3,1 <= 1"));
//! ```

pub mod error;
pub mod formulation;
pub mod graph;
pub mod ilp;
pub mod separator;

pub use error::{Resource, Result, SubpartitionError};
pub use formulation::{build_subpartition_ilp, FormulationConfig, SubpartitionBuilder};
pub use graph::{Graph, Vertex};
pub use ilp::{to_lp_string, write_lp, IlpModel};
pub use separator::{enumerate_separators, Separator};
