//! Error types shared by the separator enumerator and the model builder.

use crate::graph::Vertex;
use std::fmt;
use thiserror::Error;

/// Which configured cap a build ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    /// Number of minimal separators enumerated for a single vertex pair.
    SeparatorsPerPair,
    /// Total number of separator constraints in the model.
    SeparatorConstraints,
    /// Number of candidate vertices for exhaustive enumeration.
    ExhaustiveCandidates,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::SeparatorsPerPair => write!(f, "separators per pair"),
            Resource::SeparatorConstraints => write!(f, "separator constraints"),
            Resource::ExhaustiveCandidates => write!(f, "exhaustive candidates"),
        }
    }
}

/// Errors produced while enumerating separators or building a model.
#[derive(Error, Debug)]
pub enum SubpartitionError {
    /// The pair references a vertex outside the graph, or both ends coincide.
    #[error("invalid vertex pair ({a}, {b}): {reason}")]
    InvalidPair {
        a: Vertex,
        b: Vertex,
        reason: &'static str,
    },

    /// The pair is an edge of the graph and cannot be separated.
    #[error("vertices {a} and {b} are adjacent and cannot be separated")]
    AdjacentPair { a: Vertex, b: Vertex },

    /// Fewer than one colour was requested.
    #[error("colour count must be at least 1, got {0}")]
    InvalidColourCount(u32),

    /// The builder needs at least one vertex.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// Graphs are simple; loops are rejected on insertion.
    #[error("self-loop on vertex {0} is not allowed")]
    SelfLoop(Vertex),

    /// A configured cap was exceeded while processing pair `(u, v)`.
    #[error("pair ({u}, {v}) exceeded the limit of {limit} {resource}")]
    ResourceLimitExceeded {
        u: Vertex,
        v: Vertex,
        resource: Resource,
        limit: usize,
    },

    /// The builder configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing serialized model text failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SubpartitionError>;
