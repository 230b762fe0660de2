//! Minimal vertex separator enumeration.
//!
//! For a pair of non-adjacent vertices `(a, b)`, a *minimal separator* is
//! an inclusion-minimal vertex set whose removal puts `a` and `b` into
//! different components. A pair can have exponentially many of them, so
//! [`enumerate_separators`] returns a lazy iterator ([`MinimalSeparators`])
//! that callers fold as it goes.
//!
//! # Key Components
//!
//! - [`enumerate_separators`] / [`MinimalSeparators`]: output-sensitive
//!   enumeration, polynomial delay per separator
//! - [`check`]: definition-level checks and an exhaustive reference
//!   enumeration for small graphs
//! - [`SeparatorCache`]: per-graph memoization table used by the model
//!   builder when enabled
//!
//! # References
//!
//! Kloks, T. & Kratsch, D. (1998), "Listing all minimal separators of a graph"

mod cache;
pub mod check;
mod enumerator;
mod types;

pub use cache::SeparatorCache;
pub use enumerator::{enumerate_separators, MinimalSeparators};
pub use types::Separator;
