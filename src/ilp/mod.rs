//! Integer linear programming model layer.
//!
//! A solver-agnostic representation of 0/1 linear programs over
//! (vertex, colour) assignment variables, plus a CPLEX LP writer.
//!
//! # Key Components
//!
//! - **Variables**: [`AssignmentVar`] `x[u,c]`, [`LinearTerm`], [`Bound`]
//! - **Constraints**: [`Constraint`] with a structured [`ConstraintLabel`]
//! - **Model**: [`IlpModel`]: objective, ordered constraints, binaries, bounds
//! - **Serialization**: [`LpWriter`], [`write_lp`], [`to_lp_string`]
//!
//! # Design
//!
//! The model never solves anything. It keeps constraints in insertion
//! order so that serialized output is reproducible and diffable.

mod lp_format;
mod model;
mod variables;

pub use lp_format::{to_lp_string, write_lp, LpWriter};
pub use model::{Constraint, ConstraintLabel, IlpModel, Objective};
pub use variables::{AssignmentVar, Bound, Colour, LinearTerm};
