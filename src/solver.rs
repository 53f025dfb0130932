use crate::assignment::Assignment;
use crate::formula::{ClauseIdx, Formula, Literal, Variable};
use crate::SatResult;
use log::{debug, trace};

/// How the engine picks the variable to branch on once propagation is exhausted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Branching {
    /// The first unassigned variable, in order of first occurrence in the formula,
    /// that still occurs in an undetermined clause.
    FirstOccurrence,
    /// The unassigned variable with the most occurrences in undetermined clauses.
    /// Ties go to the variable that occurs first in the formula.
    MostOccurrences,
}

impl Default for Branching {
    fn default() -> Self {
        Branching::FirstOccurrence
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct SolverConfig {
    pub branching: Branching,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SolverStats {
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Search {
    Satisfied,
    Unsatisfied,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Simplified {
    Conflict,
    Satisfied,
    Undetermined,
}

pub struct Solver<'f> {
    formula: &'f Formula,
    config: SolverConfig,
    stats: SolverStats,
}

impl<'f> Solver<'f> {
    pub fn new(formula: &'f Formula) -> Self {
        Self::with_config(formula, SolverConfig::default())
    }

    pub fn with_config(formula: &'f Formula, config: SolverConfig) -> Self {
        Self {
            formula,
            config,
            stats: SolverStats::default(),
        }
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    pub fn solve(&mut self) -> SatResult {
        self.stats = SolverStats::default();
        let mut assignment = Assignment::new();
        let result = match self.search(&mut assignment, 0) {
            Search::Satisfied => SatResult::Satisfiable(assignment),
            Search::Unsatisfied => {
                debug_assert!(assignment.is_empty());
                SatResult::Unsatisfiable
            }
        };
        debug!(
            "{} after {} decisions, {} propagations, {} pure literals, {} conflicts",
            if result.is_sat() { "sat" } else { "unsat" },
            self.stats.decisions,
            self.stats.propagations,
            self.stats.pure_literals,
            self.stats.conflicts
        );
        result
    }

    /// One DPLL frame. An unsatisfied search leaves `assignment` exactly as it
    /// was on entry; a satisfied one keeps every binding it made.
    fn search(&mut self, assignment: &mut Assignment, depth: usize) -> Search {
        let entry = assignment.mark();

        match self.simplify(assignment, depth) {
            Simplified::Conflict => {
                self.stats.conflicts += 1;
                assignment.undo_to(entry);
                return Search::Unsatisfied;
            }
            Simplified::Satisfied => return Search::Satisfied,
            Simplified::Undetermined => {}
        }

        let variable = match self.decide(assignment) {
            Some(variable) => variable,
            None => {
                // nothing left to branch on, so the formula must be decided already
                if self.formula.is_satisfied(assignment) {
                    return Search::Satisfied;
                }
                assignment.undo_to(entry);
                return Search::Unsatisfied;
            }
        };

        for &value in &[true, false] {
            let branch = assignment.mark();
            self.stats.decisions += 1;
            let literal = Literal::new(variable, value);
            trace!("decision {} at depth {}", literal, depth + 1);
            assignment.assign_literal(&literal);

            if self.search(assignment, depth + 1) == Search::Satisfied {
                return Search::Satisfied;
            }
            trace!("backtrack: {} failed at depth {}", literal, depth + 1);
            assignment.undo_to(branch);
        }

        assignment.undo_to(entry);
        Search::Unsatisfied
    }

    /// Unit propagation to exhaustion, then pure literal elimination, repeated until
    /// neither applies or the formula is decided.
    fn simplify(&mut self, assignment: &mut Assignment, depth: usize) -> Simplified {
        loop {
            if self.formula.has_falsified_clause(assignment) {
                trace!("conflict at depth {}", depth);
                return Simplified::Conflict;
            }
            if self.formula.is_satisfied(assignment) {
                return Simplified::Satisfied;
            }

            if let Some((ClauseIdx(idx), literal)) = self.formula.unit_literal(assignment) {
                trace!("implied({}) {} at depth {}", idx, literal, depth);
                self.stats.propagations += 1;
                assignment.assign_literal(&literal);
                continue;
            }

            let pure = self.formula.pure_literals(assignment);
            if pure.is_empty() {
                return Simplified::Undetermined;
            }
            for literal in &pure {
                trace!("pure {} at depth {}", literal, depth);
                assignment.assign_literal(literal);
            }
            self.stats.pure_literals += pure.len();
        }
    }

    fn decide(&self, assignment: &Assignment) -> Option<Variable> {
        let formula = self.formula;
        let mut open = formula
            .unassigned_variables(assignment)
            .map(|v| (v, formula.open_occurrences(v, assignment).count()))
            .filter(|(_, count)| *count > 0);

        match self.config.branching {
            Branching::FirstOccurrence => open.next().map(|(v, _)| v),
            Branching::MostOccurrences => {
                let mut best: Option<(Variable, usize)> = None;
                for (v, count) in open {
                    if best.map_or(true, |(_, most)| count > most) {
                        best = Some((v, count));
                    }
                }
                best.map(|(v, _)| v)
            }
        }
    }
}
