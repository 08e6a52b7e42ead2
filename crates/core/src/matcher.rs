//! Pattern matcher
//!
//! Aligns a [`Pattern`] against a [`Term`] left to right. Every element kind
//! is deterministic except `e.` variables, which try candidate lengths
//! shortest first and backtrack when the rest of the pattern fails. The
//! first overall success wins, so `e.1 '+' e.2` splits at the first `'+'`.
//!
//! When the matcher descends into a group it records what is left of the
//! enclosing level in a [`Pending`] chain. Reaching the end of a group resumes
//! that chain, so a failure after the group can still retry different
//! `e.` lengths inside it.
//!
//! Bindings are undone by truncating to a saved mark; failure is a plain
//! `false`, never an error.

use crate::bindings::{Binding, Bindings};
use crate::pattern::{Pattern, PatternElement, VarKind, Variable};
use crate::term::{Element, Term};

/// Match `pattern` against the whole of `term`.
pub fn match_pattern(pattern: &Pattern, term: &Term) -> Option<Bindings> {
    match_with(pattern, term, Bindings::new())
}

/// Match starting from existing bindings.
///
/// Variables already bound in `bindings` only match values structurally equal
/// to their binding. On success the returned environment contains the old
/// bindings followed by the new ones.
pub fn match_with(pattern: &Pattern, term: &Term, bindings: Bindings) -> Option<Bindings> {
    let mut matcher = Matcher { bindings };
    if matcher.match_seq(pattern.elements(), term.elements(), &Pending::Done) {
        Some(matcher.bindings)
    } else {
        None
    }
}

/// Work left over at enclosing levels while a group is being matched.
enum Pending<'p, 't, 'a> {
    Done,
    Then {
        pattern: &'p [PatternElement],
        term: &'t [Element],
        next: &'a Pending<'p, 't, 'a>,
    },
}

struct Matcher {
    bindings: Bindings,
}

impl Matcher {
    fn match_seq<'p, 't>(
        &mut self,
        pattern: &'p [PatternElement],
        term: &'t [Element],
        pending: &Pending<'p, 't, '_>,
    ) -> bool {
        let Some((first, rest)) = pattern.split_first() else {
            return term.is_empty() && self.resume(pending);
        };

        match first {
            PatternElement::Literal(expected) => match term.split_first() {
                Some((Element::Symbol(found), tail)) if found == expected => {
                    self.match_seq(rest, tail, pending)
                }
                _ => false,
            },
            PatternElement::Var(var) => match var.kind {
                VarKind::Symbol => match term.split_first() {
                    Some((Element::Symbol(s), tail)) => {
                        self.bind_then(var, Binding::Symbol(s.clone()), rest, tail, pending)
                    }
                    _ => false,
                },
                VarKind::Term => match term.split_first() {
                    Some((element, tail)) => {
                        self.bind_then(var, Binding::Term(element.clone()), rest, tail, pending)
                    }
                    None => false,
                },
                VarKind::Expression => self.match_expression(var, rest, term, pending),
            },
            PatternElement::Nested(inner) => match term.split_first() {
                Some((Element::Group(group), tail)) => {
                    let after = Pending::Then {
                        pattern: rest,
                        term: tail,
                        next: pending,
                    };
                    self.match_seq(inner.elements(), group.elements(), &after)
                }
                _ => false,
            },
        }
    }

    fn resume(&mut self, pending: &Pending<'_, '_, '_>) -> bool {
        match pending {
            Pending::Done => true,
            Pending::Then {
                pattern,
                term,
                next,
            } => self.match_seq(pattern, term, next),
        }
    }

    /// Bind (or check) a single-element variable, then continue.
    fn bind_then<'p, 't>(
        &mut self,
        var: &Variable,
        value: Binding,
        rest: &'p [PatternElement],
        tail: &'t [Element],
        pending: &Pending<'p, 't, '_>,
    ) -> bool {
        if let Some(existing) = self.bindings.get(var) {
            return *existing == value && self.match_seq(rest, tail, pending);
        }

        let mark = self.bindings.mark();
        self.bindings.bind(var.clone(), value);
        if self.match_seq(rest, tail, pending) {
            return true;
        }
        self.bindings.reset(mark);
        false
    }

    fn match_expression<'p, 't>(
        &mut self,
        var: &Variable,
        rest: &'p [PatternElement],
        term: &'t [Element],
        pending: &Pending<'p, 't, '_>,
    ) -> bool {
        // A repeated e-variable has a fixed length: its binding must be a prefix
        if let Some(Binding::Expression(bound)) = self.bindings.get(var) {
            let len = bound.len();
            return term.len() >= len
                && term[..len] == *bound.elements()
                && self.match_seq(rest, &term[len..], pending);
        }

        // Last element at this level: only the whole remainder can work
        let shortest = if rest.is_empty() { term.len() } else { 0 };

        for len in shortest..=term.len() {
            let mark = self.bindings.mark();
            self.bindings.bind(
                var.clone(),
                Binding::Expression(Term::from_elements(term[..len].to_vec())),
            );
            if self.match_seq(rest, &term[len..], pending) {
                return true;
            }
            self.bindings.reset(mark);
        }
        false
    }
}
