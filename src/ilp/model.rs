//! ILP model definition.

use super::variables::{write_terms, AssignmentVar, Bound, Colour, LinearTerm};
use crate::graph::Vertex;
use std::collections::HashSet;
use std::fmt;

/// Identifies where a constraint comes from.
///
/// Labels render as `GUB{u}` and `({u},{v})-SEP_#{index}_c{colour}`;
/// every field takes part in the label, so distinct constraints of one
/// model never share a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintLabel {
    /// At-most-one-colour constraint of a vertex.
    Gub { vertex: Vertex },

    /// Separator inequality for the non-adjacent pair `(u, v)`, the
    /// `index`-th (1-based) separator of that pair, and one colour.
    Separator {
        u: Vertex,
        v: Vertex,
        index: usize,
        colour: Colour,
    },
}

impl fmt::Display for ConstraintLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintLabel::Gub { vertex } => write!(f, "GUB{vertex}"),
            ConstraintLabel::Separator {
                u,
                v,
                index,
                colour,
            } => write!(f, "({u},{v})-SEP_#{index}_c{colour}"),
        }
    }
}

/// A labelled linear inequality `Σ terms <= rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub label: ConstraintLabel,
    pub terms: Vec<LinearTerm>,
    pub rhs: i64,
}

impl Constraint {
    pub fn new(label: ConstraintLabel, terms: Vec<LinearTerm>, rhs: i64) -> Self {
        Self { label, terms, rhs }
    }

    /// Whether this is a separator inequality.
    pub fn is_separator(&self) -> bool {
        matches!(self.label, ConstraintLabel::Separator { .. })
    }

    /// Left-hand side value under a 0/1 assignment given as a predicate.
    pub fn lhs_value(&self, assigned: impl Fn(AssignmentVar) -> bool) -> i64 {
        self.terms
            .iter()
            .filter(|t| assigned(t.var))
            .map(|t| t.coefficient)
            .sum()
    }

    /// Whether the assignment satisfies this inequality.
    pub fn is_satisfied(&self, assigned: impl Fn(AssignmentVar) -> bool) -> bool {
        self.lhs_value(assigned) <= self.rhs
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.label)?;
        write_terms(f, &self.terms)?;
        write!(f, " <= {}", self.rhs)
    }
}

/// Objective function of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Minimize a linear combination of variables.
    Minimize { terms: Vec<LinearTerm> },

    /// Maximize a linear combination of variables.
    Maximize { terms: Vec<LinearTerm> },
}

impl Objective {
    pub fn terms(&self) -> &[LinearTerm] {
        match self {
            Objective::Minimize { terms } | Objective::Maximize { terms } => terms,
        }
    }

    pub fn is_maximize(&self) -> bool {
        matches!(self, Objective::Maximize { .. })
    }
}

/// An integer linear program over binary assignment variables.
///
/// Constraint order is preserved exactly as added; serializers emit it
/// unchanged.
///
/// # Examples
///
/// ```
/// use u_subpartition::ilp::{AssignmentVar, Constraint, ConstraintLabel, IlpModel, LinearTerm, Objective};
///
/// let x11 = AssignmentVar::new(1, 1);
/// let x12 = AssignmentVar::new(1, 2);
/// let mut model = IlpModel::new("example");
/// model.add_binary(x11);
/// model.add_binary(x12);
/// model.add_constraint(Constraint::new(
///     ConstraintLabel::Gub { vertex: 1 },
///     vec![LinearTerm::new(1, x11), LinearTerm::new(1, x12)],
///     1,
/// ));
/// model.set_objective(Objective::Maximize { terms: vec![LinearTerm::new(1, x11)] });
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IlpModel {
    /// Model name.
    pub name: String,
    /// Objective function.
    pub objective: Option<Objective>,
    /// Constraints in emission order.
    pub constraints: Vec<Constraint>,
    /// Declared binary variables, each once, in declaration order.
    pub binaries: Vec<AssignmentVar>,
    /// Explicit variable bounds.
    pub bounds: Vec<Bound>,
}

impl IlpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declares a binary variable.
    pub fn add_binary(&mut self, var: AssignmentVar) {
        self.binaries.push(var);
    }

    /// Appends a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Adds an explicit bound.
    pub fn add_bound(&mut self, bound: Bound) {
        self.bounds.push(bound);
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Validates the model for consistency.
    ///
    /// Checks that binaries are declared once, that every variable used by
    /// the objective, constraints, or bounds is declared, and that
    /// constraint labels are unique.
    pub fn validate(&self) -> Result<(), String> {
        let mut declared = HashSet::with_capacity(self.binaries.len());
        for var in &self.binaries {
            if !declared.insert(*var) {
                return Err(format!("binary declared twice: {var}"));
            }
        }

        if let Some(objective) = &self.objective {
            for term in objective.terms() {
                if !declared.contains(&term.var) {
                    return Err(format!("undeclared variable in objective: {}", term.var));
                }
            }
        }

        let mut labels = HashSet::with_capacity(self.constraints.len());
        for constraint in &self.constraints {
            if !labels.insert(constraint.label) {
                return Err(format!("duplicate constraint label: {}", constraint.label));
            }
            for term in &constraint.terms {
                if !declared.contains(&term.var) {
                    return Err(format!(
                        "undeclared variable in {}: {}",
                        constraint.label, term.var
                    ));
                }
            }
        }

        for bound in &self.bounds {
            if !declared.contains(&bound.var) {
                return Err(format!("undeclared variable in bounds: {}", bound.var));
            }
            if bound.lower > bound.upper {
                return Err(format!(
                    "empty bound on {}: {} > {}",
                    bound.var, bound.lower, bound.upper
                ));
            }
        }
        Ok(())
    }

    /// Returns the number of declared variables.
    pub fn variable_count(&self) -> usize {
        self.binaries.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the number of at-most-one-colour constraints.
    pub fn gub_count(&self) -> usize {
        self.constraints.len() - self.separator_constraint_count()
    }

    /// Returns the number of separator inequalities.
    pub fn separator_constraint_count(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_separator()).count()
    }

    /// Separator inequalities generated for the pair `(u, v)`.
    pub fn separator_constraints(&self, u: Vertex, v: Vertex) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter(move |c| {
            matches!(c.label, ConstraintLabel::Separator { u: cu, v: cv, .. } if cu == u && cv == v)
        })
    }
}
