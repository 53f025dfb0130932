use crate::*;

// Exhaustive search over every total assignment, used to cross-check the solver
#[cfg(test)]
pub(crate) fn solve_brute_force(f: &Formula) -> SatResult {
    let variables = f.variables();
    assert!(variables.len() <= 16); // just for safety

    'search: for bits in 0..2u32.pow(variables.len() as u32) {
        let mut assignment = Assignment::new();
        for (i, v) in variables.iter().enumerate() {
            assignment.assign(*v, bits & (1 << i) == 0);
        }
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if literal.evaluate(&assignment) == Some(true) {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        return SatResult::Satisfiable(assignment);
    }
    // no assignment is valid
    SatResult::Unsatisfiable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn brute_force_bcp_sat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let f = Formula::new(vec![c1, c2]);

        let result = solve_brute_force(&f);
        assert!(f.is_satisfied(result.model().unwrap()));
    }

    #[test]
    fn brute_force_bcp_unsat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let c3 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn brute_force_tautology_is_sat() {
        let f = Formula::new(vec![Clause::new(vec![p(4), n(4)])]);
        assert!(solve_brute_force(&f).is_sat());
    }

    #[test]
    fn brute_force_degenerate_formulas() {
        assert_eq!(
            solve_brute_force(&Formula::new(vec![])),
            SatResult::Satisfiable(Assignment::new())
        );
        assert_eq!(
            solve_brute_force(&Formula::new(vec![Clause::new(vec![])])),
            SatResult::Unsatisfiable
        );
    }
}
