use crate::formula::{Formula, Literal, Variable};
use std::collections::HashMap;

/// A partial map from variables to truth values. Every binding is recorded on a
/// trail so the map can be rolled back to an earlier [`TrailMark`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<Variable, bool>,
    trail: Vec<Variable>,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TrailMark(usize);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, variable: Variable) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    pub fn contains(&self, variable: Variable) -> bool {
        self.values.contains_key(&variable)
    }

    /// Binds an unassigned variable. Rebinding a variable is a bug in the caller.
    pub fn assign(&mut self, variable: Variable, value: bool) {
        let previous = self.values.insert(variable, value);
        assert!(
            previous.is_none(),
            "variable {} assigned {} while already holding {:?}",
            variable,
            value,
            previous
        );
        self.trail.push(variable);
    }

    /// Binds the variable of `literal` so that the literal is true.
    pub fn assign_literal(&mut self, literal: &Literal) {
        self.assign(*literal.variable(), literal.is_positive());
    }

    pub fn mark(&self) -> TrailMark {
        TrailMark(self.trail.len())
    }

    /// Drops every binding made since `mark` was taken.
    pub fn undo_to(&mut self, mark: TrailMark) {
        assert!(mark.0 <= self.trail.len(), "trail mark {} is in the future", mark.0);
        for variable in self.trail.drain(mark.0..) {
            self.values.remove(&variable);
        }
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// Bindings in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.trail.iter().map(move |v| (*v, self.values[v]))
    }

    /// A total assignment for `formula`: variables left unconstrained by this
    /// assignment are set to false.
    pub fn completed(&self, formula: &Formula) -> Assignment {
        let mut total = self.clone();
        for variable in formula.variables() {
            if !total.contains(*variable) {
                total.assign(*variable, false);
            }
        }
        total
    }
}
