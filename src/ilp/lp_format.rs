//! CPLEX LP text serialization.
//!
//! Emits the sections `Maximize`/`Minimize`, `Subject To`, `Bounds`,
//! `Binaries`, `End`. Long expressions are wrapped at term boundaries so
//! no line exceeds the configured width (CPLEX rejects lines over 510
//! characters).

use super::model::IlpModel;
use super::variables::write_terms;
use crate::error::Result;
use std::fmt::{self, Write as _};
use std::io;

/// LP writer settings.
///
/// # Examples
///
/// ```
/// use u_subpartition::graph::catalog;
/// use u_subpartition::formulation::build_subpartition_ilp;
/// use u_subpartition::ilp::LpWriter;
///
/// let model = build_subpartition_ilp(&catalog::path(3), 2).unwrap();
/// let text = LpWriter::default().with_vars_per_line(4).to_string(&model);
/// assert!(text.starts_with("\\ Problem: "));
/// assert!(text.contains(" (1,3)-SEP_#1_c2: x1,2 + x3,2 - x2,2 <= 1\n"));
/// assert!(text.ends_with("End\n"));
/// ```
#[derive(Debug, Clone)]
pub struct LpWriter {
    /// Soft maximum line length for objective and constraint rows.
    pub line_width: usize,
    /// Variables per line in the `Binaries` section.
    pub vars_per_line: usize,
}

impl Default for LpWriter {
    fn default() -> Self {
        Self {
            line_width: 255,
            vars_per_line: 10,
        }
    }
}

impl LpWriter {
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width.max(16);
        self
    }

    pub fn with_vars_per_line(mut self, n: usize) -> Self {
        self.vars_per_line = n.max(1);
        self
    }

    /// Renders the model as LP text.
    pub fn to_string(&self, model: &IlpModel) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(model, &mut out);
        out
    }

    /// Writes the model as LP text.
    pub fn write<W: io::Write>(&self, model: &IlpModel, out: &mut W) -> Result<()> {
        out.write_all(self.to_string(model).as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn render(&self, model: &IlpModel, out: &mut String) -> fmt::Result {
        writeln!(out, "\\ Problem: {}", model.name)?;

        let mut row = String::new();
        match &model.objective {
            Some(objective) => {
                let sense = if objective.is_maximize() {
                    "Maximize"
                } else {
                    "Minimize"
                };
                writeln!(out, "{sense}")?;
                write!(row, "obj: ")?;
                write_terms(&mut row, objective.terms())?;
            }
            None => {
                writeln!(out, "Minimize")?;
                write!(row, "obj:")?;
            }
        }
        self.write_wrapped(out, row.trim_end())?;

        writeln!(out, "Subject To")?;
        for constraint in &model.constraints {
            row.clear();
            write!(row, "{constraint}")?;
            self.write_wrapped(out, &row)?;
        }

        writeln!(out, "Bounds")?;
        for bound in &model.bounds {
            if bound.is_fixed() {
                writeln!(out, " {} = {}", bound.var, bound.lower)?;
            } else {
                writeln!(out, " {} <= {} <= {}", bound.lower, bound.var, bound.upper)?;
            }
        }

        writeln!(out, "Binaries")?;
        for chunk in model.binaries.chunks(self.vars_per_line) {
            for var in chunk {
                write!(out, " {var}")?;
            }
            writeln!(out)?;
        }

        writeln!(out, "End")
    }

    /// Writes ` row`, breaking before a `+`, `-` or `<=` token (kept
    /// together with what follows it) when the current line would exceed
    /// the width. Continuation lines are indented by three spaces.
    fn write_wrapped(&self, out: &mut String, row: &str) -> fmt::Result {
        let mut chunks: Vec<String> = Vec::new();
        for token in row.split(' ') {
            let starts_chunk = matches!(token, "+" | "-" | "<=");
            match chunks.last_mut() {
                Some(last) if !starts_chunk => {
                    last.push(' ');
                    last.push_str(token);
                }
                _ => chunks.push(token.to_string()),
            }
        }

        let mut line_len = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            if i > 0 && line_len + 1 + chunk.len() > self.line_width {
                writeln!(out)?;
                write!(out, "  ")?;
                line_len = 2;
            }
            write!(out, " {chunk}")?;
            line_len += 1 + chunk.len();
        }
        writeln!(out)
    }
}

/// Writes `model` as LP text with default settings.
pub fn write_lp<W: io::Write>(model: &IlpModel, out: &mut W) -> Result<()> {
    LpWriter::default().write(model, out)
}

/// Renders `model` as LP text with default settings.
pub fn to_lp_string(model: &IlpModel) -> String {
    LpWriter::default().to_string(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::{AssignmentVar, Bound, Constraint, ConstraintLabel, LinearTerm, Objective};

    fn x(v: u32, c: u32) -> AssignmentVar {
        AssignmentVar::new(v, c)
    }

    fn tiny() -> IlpModel {
        let mut model = IlpModel::new("tiny");
        for v in 1..=3 {
            model.add_binary(x(v, 1));
        }
        model.set_objective(Objective::Maximize {
            terms: vec![LinearTerm::new(1, x(1, 1)), LinearTerm::new(4, x(2, 1))],
        });
        model.add_constraint(Constraint::new(
            ConstraintLabel::Separator {
                u: 1,
                v: 3,
                index: 1,
                colour: 1,
            },
            vec![
                LinearTerm::new(1, x(1, 1)),
                LinearTerm::new(1, x(3, 1)),
                LinearTerm::new(-1, x(2, 1)),
            ],
            1,
        ));
        model
    }

    #[test]
    fn test_sections() {
        let text = to_lp_string(&tiny());
        let expected = "\\ Problem: tiny\n\
                        Maximize\n \
                        obj: x1,1 + 4 x2,1\n\
                        Subject To\n \
                        (1,3)-SEP_#1_c1: x1,1 + x3,1 - x2,1 <= 1\n\
                        Bounds\n\
                        Binaries\n \
                        x1,1 x2,1 x3,1\n\
                        End\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_bounds_and_missing_objective() {
        let mut model = tiny();
        model.objective = None;
        model.add_bound(Bound::new(x(1, 1), 0, 1));
        model.add_bound(Bound::new(x(2, 1), 0, 0));
        let text = to_lp_string(&model);
        assert!(text.contains("Minimize\n obj:\n"));
        assert!(text.contains("Bounds\n 0 <= x1,1 <= 1\n x2,1 = 0\nBinaries\n"));
    }

    #[test]
    fn test_binaries_wrap() {
        let text = LpWriter::default().with_vars_per_line(2).to_string(&tiny());
        assert!(text.contains("Binaries\n x1,1 x2,1\n x3,1\nEnd\n"));
    }

    #[test]
    fn test_long_rows_wrap() {
        let mut model = IlpModel::new("wide");
        let terms: Vec<LinearTerm> = (1..=40)
            .map(|v| {
                model.add_binary(x(v, 1));
                LinearTerm::new(-1, x(v, 1))
            })
            .collect();
        model.add_constraint(Constraint::new(ConstraintLabel::Gub { vertex: 1 }, terms, 1));
        let writer = LpWriter::default().with_line_width(60);
        let text = writer.to_string(&model);
        assert!(text.lines().all(|l| l.len() <= 60), "{text}");
        let row: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "Subject To")
            .skip(1)
            .take_while(|l| *l != "Bounds")
            .collect();
        assert!(row.len() > 1);
        assert!(row[1].starts_with("   - x"));
        assert!(row.last().unwrap().ends_with("<= 1"));
    }

    #[test]
    fn test_write_to_io() {
        let mut buf = Vec::new();
        write_lp(&tiny(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_lp_string(&tiny()));
    }
}
