//! Terms (passive expressions)
//!
//! A term is an ordered sequence of elements, where each element is either a
//! [`Symbol`] or a nested term written in parentheses (a *group*). Terms are
//! the only runtime values of the language.
//!
//! Construction flattens terms passed as parts: `build![build![a, b], c]` and
//! `build![a, b, c]` are the same value. Only an explicit [`Element::Group`]
//! introduces nesting.
//!
//! Equality and hashing are structural over every element.

use crate::symbol::Symbol;
use std::fmt;
use std::ops::Range;
use std::slice;

/// One top-level item of a [`Term`]: a symbol or a parenthesised group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    Symbol(Symbol),
    Group(Term),
}

impl Element {
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Element::Symbol(s) => Some(s),
            Element::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Term> {
        match self {
            Element::Group(t) => Some(t),
            Element::Symbol(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Element::Group(_))
    }
}

impl From<Symbol> for Element {
    fn from(s: Symbol) -> Self {
        Element::Symbol(s)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Symbol(s) => write!(f, "{}", s),
            Element::Group(t) => write!(f, "({})", t),
        }
    }
}

/// A flat sequence of elements; groups nest further terms.
///
/// Equality and hashing are structural over every element, so two terms
/// built by different routes compare equal when their contents do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Term {
    elements: Vec<Element>,
}

/// One argument to [`Term::build`].
///
/// A `Part::Term` is spliced into the result; every other part contributes
/// exactly one element.
#[derive(Debug, Clone)]
pub enum Part {
    Term(Term),
    Element(Element),
}

impl From<Term> for Part {
    fn from(t: Term) -> Self {
        Part::Term(t)
    }
}

impl From<&Term> for Part {
    fn from(t: &Term) -> Self {
        Part::Term(t.clone())
    }
}

impl From<Element> for Part {
    fn from(e: Element) -> Self {
        Part::Element(e)
    }
}

impl From<Symbol> for Part {
    fn from(s: Symbol) -> Self {
        Part::Element(Element::Symbol(s))
    }
}

impl From<char> for Part {
    fn from(c: char) -> Self {
        Part::Element(Element::Symbol(Symbol::Char(c)))
    }
}

impl From<i64> for Part {
    fn from(n: i64) -> Self {
        Part::Element(Element::Symbol(Symbol::Number(n)))
    }
}

/// A string literal expands to one character symbol per char.
impl From<&str> for Part {
    fn from(s: &str) -> Self {
        Part::Term(Term::from_chars(s))
    }
}

impl Term {
    /// The empty term.
    pub fn new() -> Self {
        Term::default()
    }

    /// Take `elements` as they are; groups inside stay nested.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Term { elements }
    }

    /// One character symbol per char of `s`.
    pub fn from_chars(s: &str) -> Self {
        Term {
            elements: s.chars().map(|c| Element::Symbol(Symbol::Char(c))).collect(),
        }
    }

    /// Concatenate parts into a new term, flattening nested `Term` parts.
    pub fn build<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Part>,
    {
        let mut term = Term::new();
        for part in parts {
            match part.into() {
                Part::Term(t) => term.elements.extend(t.elements),
                Part::Element(e) => term.elements.push(e),
            }
        }
        term
    }

    /// Wrap this term in parentheses, producing a single group element.
    pub fn into_group(self) -> Element {
        Element::Group(self)
    }

    /// Number of top-level elements. A group counts once however much it holds.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The top-level element at `index`, counting from zero.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Top-level elements as a slice, for matching by position.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn iter(&self) -> slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Copy out a contiguous range of top-level elements.
    ///
    /// Returns `None` when the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Option<Term> {
        self.elements.get(range).map(|s| Term::from_elements(s.to_vec()))
    }

    /// Append one element. Use [`Term::append`] to splice a whole term.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    /// Append `term` wrapped in parentheses.
    pub fn push_group(&mut self, term: Term) {
        self.elements.push(Element::Group(term));
    }

    /// Splice all elements of `other` onto the end of this term.
    pub fn append(&mut self, other: Term) {
        self.elements.extend(other.elements);
    }

    /// The characters of this term if it consists only of character symbols.
    pub fn as_chars(&self) -> Option<String> {
        self.elements
            .iter()
            .map(|e| e.as_symbol().and_then(Symbol::as_char))
            .collect()
    }
}

impl From<Vec<Element>> for Term {
    fn from(elements: Vec<Element>) -> Self {
        Term { elements }
    }
}

impl FromIterator<Element> for Term {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Term {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Term {
    type Item = &'a Element;
    type IntoIter = slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for Term {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Adjacent characters are written back to back; any other neighbouring
/// pair is separated by one space.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev_char = None;
        for (i, element) in self.elements.iter().enumerate() {
            let is_char = matches!(element, Element::Symbol(Symbol::Char(_)));
            if i > 0 && !(is_char && prev_char == Some(true)) {
                write!(f, " ")?;
            }
            write!(f, "{}", element)?;
            prev_char = Some(is_char);
        }
        Ok(())
    }
}

/// Build a [`Term`] from parts, flattening any `Term` arguments.
///
/// ```
/// use refal_core::{build, Term};
///
/// let ab = build!['a', 'b'];
/// assert_eq!(build![ab, 'c'], Term::from_chars("abc"));
/// ```
#[macro_export]
macro_rules! build {
    () => {
        $crate::term::Term::new()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::term::Term::build([$($crate::term::Part::from($part)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(t: &Term) -> u64 {
        let mut h = DefaultHasher::new();
        t.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_build_flattens_terms() {
        let a = Term::from_chars("a");
        let b = Term::from_chars("b");
        let c = Term::from_chars("c");

        let left = build![build![a.clone(), b.clone()], c.clone()];
        let right = build![a.clone(), build![b.clone(), c.clone()]];
        let flat = build![a, b, c];

        assert_eq!(left, flat);
        assert_eq!(right, flat);
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_groups_are_not_flattened() {
        let inner = Term::from_chars("ab");
        let t = build![inner.clone().into_group(), 'c'];
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(0), Some(&Element::Group(inner)));
    }

    #[test]
    fn test_str_part_expands_to_chars() {
        let t = build!["Hi", 1i64];
        assert_eq!(t.len(), 3);
        assert_eq!(t.get(2), Some(&Element::Symbol(Symbol::Number(1))));
    }

    #[test]
    fn test_structural_equality_recurses_into_groups() {
        let x = build![Term::from_chars("ab").into_group()];
        let y = build![Term::from_chars("ab").into_group()];
        let z = build![Term::from_chars("ac").into_group()];
        assert_eq!(x, y);
        assert_ne!(x, z);
    }

    #[test]
    fn test_hash_covers_every_element() {
        // Same length and same first element, different tail
        let x = Term::from_chars("abc");
        let y = Term::from_chars("abd");
        assert_ne!(x, y);
        assert_ne!(hash_of(&x), hash_of(&y));
        assert_eq!(hash_of(&x), hash_of(&Term::from_chars("abc")));
    }

    #[test]
    fn test_slice() {
        let t = Term::from_chars("hello");
        assert_eq!(t.slice(1..3), Some(Term::from_chars("el")));
        assert_eq!(t.slice(5..5), Some(Term::new()));
        assert_eq!(t.slice(3..9), None);
    }

    #[test]
    fn test_display_spacing() {
        assert_eq!(Term::from_chars("a-b-c").to_string(), "a-b-c");

        let t = build![
            Symbol::ident("Go"),
            'x',
            'y',
            Term::from_chars("in").into_group(),
            42i64,
            Symbol::compound("str"),
        ];
        assert_eq!(t.to_string(), "Go xy (in) 42 str");
        assert_eq!(Term::new().to_string(), "");
    }

    #[test]
    fn test_as_chars() {
        assert_eq!(Term::from_chars("abc").as_chars(), Some("abc".to_string()));
        assert_eq!(build!['a', 1i64].as_chars(), None);
    }
}
