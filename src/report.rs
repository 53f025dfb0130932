//! Human-readable and DIMACS renderings of a solver verdict.

use crate::{Assignment, Formula, SatResult, Variable};
use std::io::{self, Write};

pub const SAT: &str = "The formula is satisfiable (SAT).";
pub const UNSAT: &str = "The formula is not satisfiable (UNSAT).";
pub const EMPTY: &str = "The formula is empty and therefore satisfiable (⊤).";
pub const DONT_CARE: &str = "If variables that you typed in are not in the variable assignment, \
                             then the satisfiability of the formula is independent from their truth values.";

/// Bindings of `model` ordered by variable name, or by number for numeric formulas.
fn sorted_bindings(formula: &Formula, model: &Assignment) -> Vec<(Variable, bool)> {
    let mut bindings = model.iter().collect::<Vec<_>>();
    if formula.is_named() {
        bindings.sort_by(|(a, _), (b, _)| formula.name(*a).cmp(&formula.name(*b)));
    } else {
        bindings.sort_by_key(|(v, _)| *v);
    }
    bindings
}

pub fn write_report<W: Write>(mut w: W, formula: &Formula, result: &SatResult) -> io::Result<()> {
    match result {
        SatResult::Unsatisfiable => writeln!(w, "{}", UNSAT),
        SatResult::Satisfiable(_) if formula.is_empty() => writeln!(w, "{}", EMPTY),
        SatResult::Satisfiable(model) => {
            writeln!(w, "{}", SAT)?;
            writeln!(w)?;
            writeln!(w, "Variable Assignment:")?;
            for (v, value) in sorted_bindings(formula, model) {
                writeln!(w, "  {} = {}", formula.name(v), value)?;
            }
            writeln!(w)?;
            writeln!(w, "{}", DONT_CARE)
        }
    }
}

/// SAT competition output: an `s` status line, then a `v` line of literals ending in 0.
pub fn write_dimacs<W: Write>(mut w: W, formula: &Formula, result: &SatResult) -> io::Result<()> {
    match result {
        SatResult::Unsatisfiable => writeln!(w, "s UNSATISFIABLE"),
        SatResult::Satisfiable(model) => {
            writeln!(w, "s SATISFIABLE")?;
            write!(w, "v")?;
            for (v, value) in sorted_bindings(formula, model) {
                if value {
                    write!(w, " {}", v)?;
                } else {
                    write!(w, " -{}", v)?;
                }
            }
            writeln!(w, " 0")
        }
    }
}
