//! Separator formulation of connected subpartitions.
//!
//! Given a graph `G` and a colour count `k`, builds the 0/1 program whose
//! feasible points are the vertex colourings with at most one colour per
//! vertex in which every colour class induces a connected subgraph.
//!
//! # Key Components
//!
//! - [`SubpartitionBuilder`]: configurable, optionally memoizing builder
//! - [`FormulationConfig`]: resource caps, parallelism, model name
//! - [`build_subpartition_ilp`]: one-shot build with defaults
//! - [`separator_constraint`]: the single inequality for one separator

mod builder;
mod config;

pub use builder::{build_subpartition_ilp, separator_constraint, BuildStats, SubpartitionBuilder};
pub use config::FormulationConfig;
