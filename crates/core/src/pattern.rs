//! Patterns
//!
//! A pattern is a sequence of elements matched left to right against a term:
//!
//! | Element | Matches |
//! |---------|---------|
//! | literal symbol | exactly that plain symbol |
//! | `s.X` | one plain symbol |
//! | `t.X` | one symbol or one whole group |
//! | `e.X` | zero or more contiguous elements at the same level |
//! | `(...)` | one group whose contents match the inner pattern |
//!
//! Patterns are built with chained helpers:
//!
//! ```
//! use refal_core::Pattern;
//!
//! // e.1 '+' e.2
//! let p = Pattern::new().e("1").chr('+').e("2");
//! assert_eq!(p.to_string(), "e.1 '+' e.2");
//! ```

use crate::symbol::Symbol;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// `s.` - exactly one plain symbol
    Symbol,
    /// `t.` - one symbol or one group
    Term,
    /// `e.` - any run of elements
    Expression,
}

impl VarKind {
    pub fn prefix(self) -> char {
        match self {
            VarKind::Symbol => 's',
            VarKind::Term => 't',
            VarKind::Expression => 'e',
        }
    }

    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            's' => Some(VarKind::Symbol),
            't' => Some(VarKind::Term),
            'e' => Some(VarKind::Expression),
            _ => None,
        }
    }
}

/// A pattern variable such as `e.1` or `s.Head`.
///
/// The name is shared by all occurrences inside one sentence; the kind is part
/// of the identity, so `s.1` and `e.1` are different variables (and a sentence
/// using both is rejected when it is defined).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    pub kind: VarKind,
    pub name: Arc<str>,
}

impl Variable {
    pub fn new(kind: VarKind, name: impl AsRef<str>) -> Self {
        Variable {
            kind,
            name: Arc::from(name.as_ref()),
        }
    }

    pub fn s(name: impl AsRef<str>) -> Self {
        Variable::new(VarKind::Symbol, name)
    }

    pub fn t(name: impl AsRef<str>) -> Self {
        Variable::new(VarKind::Term, name)
    }

    pub fn e(name: impl AsRef<str>) -> Self {
        Variable::new(VarKind::Expression, name)
    }

    /// Parse the `kind.name` notation, e.g. `"e.1"`.
    pub fn parse(text: &str) -> Option<Self> {
        let (prefix, name) = text.split_once('.')?;
        let mut chars = prefix.chars();
        let kind = VarKind::from_prefix(chars.next()?)?;
        if chars.next().is_some() || name.is_empty() {
            return None;
        }
        Some(Variable::new(kind, name))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.prefix(), self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    Literal(Symbol),
    Var(Variable),
    Nested(Pattern),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    elements: Vec<PatternElement>,
}

impl Pattern {
    pub fn new() -> Self {
        Pattern::default()
    }

    pub fn from_elements(elements: Vec<PatternElement>) -> Self {
        Pattern { elements }
    }

    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, element: PatternElement) {
        self.elements.push(element);
    }

    pub fn lit(mut self, symbol: Symbol) -> Self {
        self.elements.push(PatternElement::Literal(symbol));
        self
    }

    pub fn chr(self, c: char) -> Self {
        self.lit(Symbol::Char(c))
    }

    /// One literal character element per char of `s`.
    pub fn chars(mut self, s: &str) -> Self {
        self.elements
            .extend(s.chars().map(|c| PatternElement::Literal(Symbol::Char(c))));
        self
    }

    pub fn var(mut self, variable: Variable) -> Self {
        self.elements.push(PatternElement::Var(variable));
        self
    }

    pub fn s(self, name: &str) -> Self {
        self.var(Variable::s(name))
    }

    pub fn t(self, name: &str) -> Self {
        self.var(Variable::t(name))
    }

    pub fn e(self, name: &str) -> Self {
        self.var(Variable::e(name))
    }

    pub fn nested(mut self, inner: Pattern) -> Self {
        self.elements.push(PatternElement::Nested(inner));
        self
    }

    /// Every variable occurrence, depth first, left to right.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        collect_variables(&self.elements, &mut out);
        out
    }
}

fn collect_variables<'a>(elements: &'a [PatternElement], out: &mut Vec<&'a Variable>) {
    for element in elements {
        match element {
            PatternElement::Literal(_) => {}
            PatternElement::Var(v) => out.push(v),
            PatternElement::Nested(inner) => collect_variables(&inner.elements, out),
        }
    }
}

impl fmt::Display for PatternElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternElement::Literal(Symbol::Char(c)) => write!(f, "'{}'", c),
            PatternElement::Literal(Symbol::Compound(s)) => write!(f, "\"{}\"", s),
            PatternElement::Literal(other) => write!(f, "{}", other),
            PatternElement::Var(v) => write!(f, "{}", v),
            PatternElement::Nested(inner) => write!(f, "({})", inner),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}
