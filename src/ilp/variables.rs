//! ILP variable types.

use crate::graph::Vertex;
use std::fmt;

/// Colour (part) index, `1..=k`.
pub type Colour = u32;

/// Binary assignment variable `x[u,c]`: vertex `u` belongs to colour `c`.
///
/// Identity is the `(vertex, colour)` pair; the display form `x{u},{c}`
/// is what serialized models use as the variable name.
///
/// # Examples
///
/// ```
/// use u_subpartition::ilp::AssignmentVar;
///
/// let x = AssignmentVar::new(3, 2);
/// assert_eq!(x.to_string(), "x3,2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentVar {
    /// Vertex label.
    pub vertex: Vertex,
    /// Colour index (1-based).
    pub colour: Colour,
}

impl AssignmentVar {
    pub fn new(vertex: Vertex, colour: Colour) -> Self {
        Self { vertex, colour }
    }
}

impl fmt::Display for AssignmentVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{},{}", self.vertex, self.colour)
    }
}

/// A variable with an integer coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearTerm {
    pub coefficient: i64,
    pub var: AssignmentVar,
}

impl LinearTerm {
    pub fn new(coefficient: i64, var: AssignmentVar) -> Self {
        Self { coefficient, var }
    }
}

/// Explicit bounds on a variable.
///
/// The separator formulation declares none; the type exists so the
/// model can carry a bounds section for other formulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound {
    pub var: AssignmentVar,
    pub lower: i64,
    pub upper: i64,
}

impl Bound {
    pub fn new(var: AssignmentVar, lower: i64, upper: i64) -> Self {
        Self { var, lower, upper }
    }

    /// Whether the bound pins the variable to a single value.
    pub fn is_fixed(&self) -> bool {
        self.lower == self.upper
    }
}

/// Writes `terms` as `x1,1 + 4 x2,2 - x3,1`, omitting unit coefficients.
pub(crate) fn write_terms(f: &mut impl fmt::Write, terms: &[LinearTerm]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        let magnitude = term.coefficient.unsigned_abs();
        match (i, term.coefficient < 0) {
            (0, false) => {}
            (0, true) => write!(f, "- ")?,
            (_, false) => write!(f, " + ")?,
            (_, true) => write!(f, " - ")?,
        }
        if magnitude != 1 {
            write!(f, "{magnitude} ")?;
        }
        write!(f, "{}", term.var)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_ordering() {
        let a = AssignmentVar::new(1, 3);
        let b = AssignmentVar::new(2, 1);
        assert!(a < b);
        assert_eq!(b.to_string(), "x2,1");
    }

    #[test]
    fn test_write_terms() {
        let terms = [
            LinearTerm::new(-1, AssignmentVar::new(1, 1)),
            LinearTerm::new(4, AssignmentVar::new(2, 2)),
            LinearTerm::new(-3, AssignmentVar::new(3, 1)),
            LinearTerm::new(1, AssignmentVar::new(4, 1)),
            LinearTerm::new(0, AssignmentVar::new(5, 1)),
        ];
        let mut out = String::new();
        write_terms(&mut out, &terms).unwrap();
        assert_eq!(out, "- x1,1 + 4 x2,2 - 3 x3,1 + x4,1 + 0 x5,1");
    }

    #[test]
    fn test_bound() {
        let b = Bound::new(AssignmentVar::new(1, 1), 0, 0);
        assert!(b.is_fixed());
        assert!(!Bound::new(AssignmentVar::new(1, 1), 0, 1).is_fixed());
    }
}
