use crate::formula::{Clause, Formula, Literal, Variable};
use std::io::{BufRead, BufReader, Read, Write};
use thiserror::Error;

pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut num_clauses = None;
    // literals of a clause that has not seen its terminating 0 yet
    let mut pending = vec![];

    'lines: for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let _num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                num_clauses = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?,
                );
            }
            Some(_) => {
                let expected = num_clauses
                    .ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

                for x in line {
                    match parse_literal(x)? {
                        Some(l) => pending.push(l),
                        None => {
                            clauses.push(Clause::new(pending.drain(..)));
                            if clauses.len() >= expected {
                                break 'lines;
                            }
                        }
                    }
                }
            }
        }
    }

    if num_clauses.is_none() {
        return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
    }
    // tolerate a missing 0 after the last clause
    if !pending.is_empty() {
        clauses.push(Clause::new(pending));
    }

    let formula = Formula::new(clauses);
    Ok(formula)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    if l > 0 {
        Ok(Some(Literal::Positive(Variable(l as usize))))
    } else if l < 0 {
        Ok(Some(Literal::Negative(Variable(l.unsigned_abs()))))
    } else {
        Ok(None)
    }
}

/// Writes a formula over numeric variables in DIMACS CNF form.
pub fn write<W: Write>(mut w: W, formula: &Formula) -> std::io::Result<()> {
    let num_variables = formula.variables().iter().map(|v| v.0).max().unwrap_or(0);
    writeln!(w, "p cnf {} {}", num_variables, formula.num_clauses())?;
    for clause in formula.clauses() {
        for literal in clause.literals() {
            if literal.is_positive() {
                write!(w, "{} ", literal.idx())?;
            } else {
                write!(w, "-{} ", literal.idx())?;
            }
        }
        writeln!(w, "0")?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum DimacsParseError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Format(String),
}
