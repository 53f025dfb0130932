//! Line-oriented clause input: one clause per line, literals separated by
//! whitespace, a leading `-` negates. `A -B C` reads as `(A | !B | C)`.
//! The first blank line ends the formula.

use crate::formula::{BuildError, Formula};
use std::io::{self, BufRead, BufReader, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextParseError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Build { line: usize, source: BuildError },
}

/// Splits one line into `(name, polarity)` descriptors.
pub fn parse_clause(line: &str) -> Vec<(&str, bool)> {
    line.split_whitespace()
        .map(|token| match token.strip_prefix('-') {
            Some(name) => (name, false),
            None => (token, true),
        })
        .collect()
}

pub fn parse<R: Read>(reader: R) -> Result<Formula, TextParseError> {
    let reader = BufReader::new(reader);

    let mut lines = vec![];
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }

    Formula::from_named(lines.iter().map(|line| parse_clause(line))).map_err(|e| match e {
        // clause indices count non-blank lines, which all precede the terminator
        BuildError::EmptyVariable { clause, .. } => TextParseError::Build {
            line: clause + 1,
            source: e,
        },
    })
}
