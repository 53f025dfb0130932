mod assignment;
pub mod formula;
pub mod report;
mod solver;

#[cfg(test)]
mod brute_force;

use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Assignment> {
        match self {
            SatResult::Satisfiable(m) => Some(m),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use assignment::{Assignment, TrailMark};
pub use formula::{BuildError, Clause, ClauseStatus, Formula, Literal, Variable};
pub use solver::{Branching, Solver, SolverConfig, SolverStats};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputFormat {
    /// One clause of named literals per line, see [`formula::text`].
    Text,
    Dimacs,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Text(#[from] formula::text::TextParseError),
    #[error(transparent)]
    Dimacs(#[from] formula::dimacs::DimacsParseError),
}

pub fn parse<R: std::io::Read>(reader: R, format: InputFormat) -> Result<Formula, ParseError> {
    Ok(match format {
        InputFormat::Text => formula::text::parse(reader)?,
        InputFormat::Dimacs => formula::dimacs::parse(reader)?,
    })
}

pub fn parse_file<P: AsRef<Path>>(path: P, format: InputFormat) -> Result<Formula, ParseError> {
    let file = File::open(path)?;
    parse(file, format)
}

/// Decides `formula` with the default configuration.
pub fn solve(formula: &Formula) -> SatResult {
    Solver::new(formula).solve()
}
