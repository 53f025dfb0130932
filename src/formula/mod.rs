pub mod dimacs;
pub mod text;

use crate::assignment::Assignment;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn new(variable: Variable, polarity: bool) -> Self {
        if polarity {
            Literal::Positive(variable)
        } else {
            Literal::Negative(variable)
        }
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// The truth value of this literal, or `None` if its variable is unassigned.
    pub fn evaluate(&self, assignment: &Assignment) -> Option<bool> {
        assignment
            .value(*self.variable())
            .map(|value| value == self.is_positive())
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(v) => write!(f, "{}", v),
            Literal::Negative(v) => write!(f, "!{}", v),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClauseStatus {
    Satisfied,
    Falsified,
    Undetermined,
}

#[derive(Clone, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
    tautology: bool,
}

impl Clause {
    /// Repeated literals collapse into their first occurrence.
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: Vec<Literal> = vec![];
        for literal in disjuncts {
            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }
        let tautology = literals.iter().any(|l| literals.contains(&l.negated()));
        Self { literals, tautology }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A tautology contains some literal together with its negation.
    pub fn is_tautology(&self) -> bool {
        self.tautology
    }

    pub fn status(&self, assignment: &Assignment) -> ClauseStatus {
        if self.tautology {
            return ClauseStatus::Satisfied;
        }
        let mut undetermined = false;
        for literal in &self.literals {
            match literal.evaluate(assignment) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => {}
                None => undetermined = true,
            }
        }
        if undetermined {
            ClauseStatus::Undetermined
        } else {
            ClauseStatus::Falsified
        }
    }

    /// The only unassigned literal of this clause, provided every other literal is false.
    pub fn unit_literal(&self, assignment: &Assignment) -> Option<Literal> {
        if self.tautology {
            return None;
        }
        let mut unit = None;
        for literal in &self.literals {
            match literal.evaluate(assignment) {
                Some(true) => return None,
                Some(false) => {}
                None => {
                    if unit.is_some() {
                        return None;
                    }
                    unit = Some(*literal);
                }
            }
        }
        unit
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.literals.is_empty() {
            return f.write_str("⊥");
        }
        let mut first = true;
        for literal in &self.literals {
            if !first {
                f.write_str(" | ")?;
            }
            first = false;
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("empty variable name at position {position} of clause {clause}")]
    EmptyVariable { clause: usize, position: usize },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClauseIdx(pub usize);

#[derive(Clone)]
pub struct Formula {
    clauses: Vec<Clause>,
    // first-occurrence order
    variables: Vec<Variable>,
    occurrences: HashMap<Variable, Vec<ClauseIdx>>,
    // indexed by variable, empty for numeric formulas
    names: Vec<String>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        let mut variables = vec![];
        let mut occurrences: HashMap<Variable, Vec<ClauseIdx>> = HashMap::new();
        for (idx, clause) in clauses.iter().enumerate() {
            for literal in clause.literals() {
                let clauses_of = occurrences.entry(*literal.variable()).or_insert_with(|| {
                    variables.push(*literal.variable());
                    vec![]
                });
                // a tautology mentions its variable twice
                if clauses_of.last() != Some(&ClauseIdx(idx)) {
                    clauses_of.push(ClauseIdx(idx));
                }
            }
        }
        Self {
            clauses,
            variables,
            occurrences,
            names: vec![],
        }
    }

    /// Builds a formula from `(name, polarity)` descriptors. Names are interned into
    /// variables `0, 1, ...` in order of first occurrence.
    pub fn from_named<C, L, S>(conjuncts: C) -> Result<Self, BuildError>
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = vec![];
        let mut interned: HashMap<String, Variable> = HashMap::new();
        let mut clauses = vec![];
        for (clause_idx, disjuncts) in conjuncts.into_iter().enumerate() {
            let mut literals = vec![];
            for (position, (name, polarity)) in disjuncts.into_iter().enumerate() {
                let name = name.as_ref();
                if name.is_empty() {
                    return Err(BuildError::EmptyVariable {
                        clause: clause_idx,
                        position,
                    });
                }
                let variable = match interned.get(name) {
                    Some(v) => *v,
                    None => {
                        let v = Variable(names.len());
                        names.push(name.to_string());
                        interned.insert(name.to_string(), v);
                        v
                    }
                };
                literals.push(Literal::new(variable, polarity));
            }
            clauses.push(Clause::new(literals));
        }
        let mut formula = Self::new(clauses);
        formula.names = names;
        Ok(formula)
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn clause(&self, idx: ClauseIdx) -> &Clause {
        &self.clauses[idx.0]
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn occurrences(&self, variable: Variable) -> &[ClauseIdx] {
        self.occurrences.get(&variable).map_or(&[], |o| o.as_slice())
    }

    pub fn is_named(&self) -> bool {
        !self.names.is_empty()
    }

    pub fn name(&self, variable: Variable) -> Cow<'_, str> {
        match self.names.get(variable.0) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(variable.0.to_string()),
        }
    }

    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|c| c.status(assignment) == ClauseStatus::Satisfied)
    }

    pub fn has_falsified_clause(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .any(|c| c.status(assignment) == ClauseStatus::Falsified)
    }

    /// The unit literal of the first unit clause, in clause order.
    pub fn unit_literal(&self, assignment: &Assignment) -> Option<(ClauseIdx, Literal)> {
        self.clauses
            .iter()
            .enumerate()
            .find_map(|(idx, c)| c.unit_literal(assignment).map(|l| (ClauseIdx(idx), l)))
    }

    pub fn unassigned_variables<'a>(
        &'a self,
        assignment: &'a Assignment,
    ) -> impl Iterator<Item = Variable> + 'a {
        self.variables
            .iter()
            .copied()
            .filter(move |v| assignment.value(*v).is_none())
    }

    /// Undetermined clauses that mention `variable`.
    pub fn open_occurrences<'a>(
        &'a self,
        variable: Variable,
        assignment: &'a Assignment,
    ) -> impl Iterator<Item = &'a Clause> + 'a {
        self.occurrences(variable)
            .iter()
            .map(move |idx| self.clause(*idx))
            .filter(move |c| c.status(assignment) == ClauseStatus::Undetermined)
    }

    /// Literals of unassigned variables that occur with a single polarity across the
    /// undetermined clauses, in first-occurrence order of their variables.
    pub fn pure_literals(&self, assignment: &Assignment) -> Vec<Literal> {
        let mut pure = vec![];
        'variables: for variable in self.unassigned_variables(assignment) {
            let mut polarity = None;
            for clause in self.open_occurrences(variable, assignment) {
                for literal in clause.literals().filter(|l| *l.variable() == variable) {
                    match polarity {
                        None => polarity = Some(literal.is_positive()),
                        Some(p) if p != literal.is_positive() => continue 'variables,
                        Some(_) => {}
                    }
                }
            }
            if let Some(p) = polarity {
                pure.push(Literal::new(variable, p));
            }
        }
        pure
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.literals.len() > 1 {
                f.write_str("(")?;
            }
            write!(f, "{}", clause)?;
            if clause.literals.len() > 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("⊤");
        }
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.is_empty() {
                f.write_str("⊥")?;
                continue;
            }
            f.write_str("(")?;
            let mut first_literal = true;
            for literal in clause.literals() {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                if !literal.is_positive() {
                    f.write_str("!")?;
                }
                f.write_str(&self.name(*literal.variable()))?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Random 3-SAT formulas over at most `MAX_VARS` variables.
#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    const MAX_VARS: usize = 10;
    const MAX_CLAUSES: usize = 30;

    let literal = (0..MAX_VARS, any::<bool>()).prop_map(|(v, polarity)| Literal::new(Variable(v), polarity));
    let clause = proptest::collection::vec(literal, 1..=3).prop_map(|literals| Clause::new(literals));
    proptest::collection::vec(clause, 0..MAX_CLAUSES).prop_map(|clauses| Formula::new(clauses))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned(values: &[(usize, bool)]) -> Assignment {
        let mut assignment = Assignment::new();
        for (v, value) in values {
            assignment.assign(Variable(*v), *value);
        }
        assignment
    }

    #[test]
    fn literal_negation_shares_variable() {
        assert_eq!(p(3).negated(), n(3));
        assert_eq!(n(3).negated(), p(3));
        assert_eq!(p(3).variable(), n(3).variable());
        assert_ne!(p(3), n(3));
        assert_eq!(Literal::new(Variable(2), false), n(2));
    }

    #[test]
    fn literal_evaluation() {
        let assignment = assigned(&[(0, true), (1, false)]);
        assert_eq!(p(0).evaluate(&assignment), Some(true));
        assert_eq!(n(0).evaluate(&assignment), Some(false));
        assert_eq!(p(1).evaluate(&assignment), Some(false));
        assert_eq!(n(1).evaluate(&assignment), Some(true));
        assert_eq!(p(2).evaluate(&assignment), None);
    }

    #[test]
    fn clause_collapses_duplicates() {
        let c = Clause::new(vec![n(0), n(0), p(1), n(0)]);
        assert_eq!(c.literals().cloned().collect::<Vec<_>>(), vec![n(0), p(1)]);
        assert!(!c.is_tautology());
    }

    #[test]
    fn clause_status() {
        let c = Clause::new(vec![p(0), n(1), p(2)]);
        assert_eq!(c.status(&Assignment::new()), ClauseStatus::Undetermined);
        assert_eq!(c.status(&assigned(&[(1, false)])), ClauseStatus::Satisfied);
        assert_eq!(
            c.status(&assigned(&[(0, false), (1, true)])),
            ClauseStatus::Undetermined
        );
        assert_eq!(
            c.status(&assigned(&[(0, false), (1, true), (2, false)])),
            ClauseStatus::Falsified
        );
    }

    #[test]
    fn empty_clause_is_falsified() {
        let c = Clause::new(vec![]);
        assert!(c.is_empty());
        assert_eq!(c.status(&Assignment::new()), ClauseStatus::Falsified);
        assert_eq!(c.unit_literal(&Assignment::new()), None);
    }

    #[test]
    fn tautology_is_satisfied() {
        let c = Clause::new(vec![p(0), p(1), n(0)]);
        assert!(c.is_tautology());
        assert_eq!(c.status(&Assignment::new()), ClauseStatus::Satisfied);
        assert_eq!(c.status(&assigned(&[(1, false)])), ClauseStatus::Satisfied);
        assert_eq!(c.unit_literal(&assigned(&[(1, false)])), None);
    }

    #[test]
    fn unit_literal() {
        let c = Clause::new(vec![p(0), n(1), p(2)]);
        assert_eq!(c.unit_literal(&Assignment::new()), None);
        assert_eq!(c.unit_literal(&assigned(&[(0, false), (1, true)])), Some(p(2)));
        assert_eq!(c.unit_literal(&assigned(&[(0, true), (1, true)])), None);
        assert_eq!(c.unit_literal(&assigned(&[(0, false), (1, true), (2, false)])), None);
        assert_eq!(Clause::new(vec![n(4)]).unit_literal(&Assignment::new()), Some(n(4)));
    }

    #[test]
    fn variables_in_first_occurrence_order() {
        let f = Formula::new(vec![
            Clause::new(vec![p(7), n(2)]),
            Clause::new(vec![n(7), p(0)]),
            Clause::new(vec![p(2), p(5)]),
        ]);
        assert_eq!(f.variables(), &[Variable(7), Variable(2), Variable(0), Variable(5)]);
        assert_eq!(f.occurrences(Variable(7)), &[ClauseIdx(0), ClauseIdx(1)]);
        assert_eq!(f.occurrences(Variable(5)), &[ClauseIdx(2)]);
        assert!(f.occurrences(Variable(9)).is_empty());

        let assignment = assigned(&[(2, true)]);
        assert_eq!(
            f.unassigned_variables(&assignment).collect::<Vec<_>>(),
            vec![Variable(7), Variable(0), Variable(5)]
        );
    }

    #[test]
    fn tautology_records_one_occurrence() {
        let f = Formula::new(vec![Clause::new(vec![p(0), n(0)])]);
        assert_eq!(f.occurrences(Variable(0)), &[ClauseIdx(0)]);
    }

    #[test]
    fn formula_status() {
        let f = Formula::new(vec![Clause::new(vec![p(0), p(1)]), Clause::new(vec![n(0)])]);
        assert!(!f.is_satisfied(&Assignment::new()));
        assert!(!f.has_falsified_clause(&Assignment::new()));
        assert!(f.is_satisfied(&assigned(&[(0, false), (1, true)])));
        assert!(f.has_falsified_clause(&assigned(&[(0, true)])));

        let empty = Formula::new(vec![]);
        assert!(empty.is_satisfied(&Assignment::new()));
        assert!(!empty.has_falsified_clause(&Assignment::new()));

        let bottom = Formula::new(vec![Clause::new(vec![])]);
        assert!(bottom.has_falsified_clause(&Assignment::new()));
    }

    #[test]
    fn first_unit_literal_in_clause_order() {
        let f = Formula::new(vec![
            Clause::new(vec![p(0), p(1)]),
            Clause::new(vec![n(2)]),
            Clause::new(vec![p(3)]),
        ]);
        assert_eq!(f.unit_literal(&Assignment::new()), Some((ClauseIdx(1), n(2))));
        assert_eq!(
            f.unit_literal(&assigned(&[(0, false)])),
            Some((ClauseIdx(0), p(1)))
        );
    }

    #[test]
    fn pure_literals_ignore_satisfied_clauses() {
        // (0 | 1 | 2) & (!0) & (!1 | 3)
        let f = Formula::new(vec![
            Clause::new(vec![p(0), p(1), p(2)]),
            Clause::new(vec![n(0)]),
            Clause::new(vec![n(1), p(3)]),
        ]);
        assert_eq!(f.pure_literals(&Assignment::new()), vec![p(2), p(3)]);
        // once !1 | 3 is satisfied, 1 only occurs positively
        assert_eq!(f.pure_literals(&assigned(&[(3, true)])), vec![p(1), p(2)]);
    }

    #[test]
    fn named_formula() {
        let f = Formula::from_named(vec![
            vec![("A", true), ("B", true), ("C", true)],
            vec![("A", false)],
            vec![("B", false), ("D", true)],
        ])
        .expect("valid formula");
        assert!(f.is_named());
        assert_eq!(f.variables().len(), 4);
        assert_eq!(f.name(Variable(0)), "A");
        assert_eq!(f.name(Variable(3)), "D");
        assert_eq!(format!("{}", f), "(A | B | C) & (!A) & (!B | D)");
    }

    #[test]
    fn named_formula_rejects_empty_name() {
        let err = Formula::from_named(vec![vec![("A", true)], vec![("B", true), ("", false)]])
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyVariable { clause: 1, position: 1 });
    }

    #[test]
    fn display_degenerate_formulas() {
        assert_eq!(format!("{}", Formula::new(vec![])), "⊤");
        let f = Formula::new(vec![Clause::new(vec![]), Clause::new(vec![p(1), n(2)])]);
        assert_eq!(format!("{}", f), "⊥ & (1 | !2)");
        assert_eq!(format!("{:?}", f), "⊥ & (1 | !2)");
    }
}
