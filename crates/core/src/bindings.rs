//! Binding environments produced by the matcher
//!
//! Bindings are kept in insertion order in a plain vector. The matcher binds
//! by pushing and undoes a failed alternative by truncating back to a saved
//! mark, so backtracking never copies the environment.

use crate::pattern::{VarKind, Variable};
use crate::symbol::Symbol;
use crate::term::{Element, Term};

/// The value bound to a variable, shaped by the variable's kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Bound by an `s.` variable
    Symbol(Symbol),
    /// Bound by a `t.` variable: a symbol or a whole group
    Term(Element),
    /// Bound by an `e.` variable
    Expression(Term),
}

impl Binding {
    pub fn kind(&self) -> VarKind {
        match self {
            Binding::Symbol(_) => VarKind::Symbol,
            Binding::Term(_) => VarKind::Term,
            Binding::Expression(_) => VarKind::Expression,
        }
    }

    /// The bound value as a term, ready to be spliced into a result.
    pub fn to_term(&self) -> Term {
        match self {
            Binding::Symbol(s) => Term::from_elements(vec![Element::Symbol(s.clone())]),
            Binding::Term(e) => Term::from_elements(vec![e.clone()]),
            Binding::Expression(t) => t.clone(),
        }
    }

    /// Append the bound value to `out` without building an intermediate term.
    pub fn append_to(&self, out: &mut Term) {
        match self {
            Binding::Symbol(s) => out.push(Element::Symbol(s.clone())),
            Binding::Term(e) => out.push(e.clone()),
            Binding::Expression(t) => out.append(t.clone()),
        }
    }
}

/// Variable bindings in the order they were made.
///
/// The matcher records a mark before each attempt and truncates back to it
/// on failure, so lookups stay linear over a short vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<(Variable, Binding)>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    /// The value bound to `variable`, if any. Kind and name must both match.
    pub fn get(&self, variable: &Variable) -> Option<&Binding> {
        self.entries
            .iter()
            .find(|(v, _)| v == variable)
            .map(|(_, b)| b)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.get(variable).is_some()
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Binding)> {
        self.entries.iter().map(|(v, b)| (v, b))
    }

    /// Bind a variable that is not bound yet.
    ///
    /// Callers are expected to check [`Bindings::get`] first; binding the same
    /// variable twice keeps the first value visible.
    pub fn bind(&mut self, variable: Variable, value: Binding) {
        debug_assert_eq!(variable.kind, value.kind(), "binding kind mismatch");
        self.entries.push((variable, value));
    }

    pub(crate) fn mark(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn reset(&mut self, mark: usize) {
        self.entries.truncate(mark);
    }
}
