//! Symbols: the leaf values of a term
//!
//! Refal distinguishes four kinds of symbols:
//! - single characters (`'a'`, `'+'`)
//! - compound strings, a quoted run of characters treated as one unit (`"Hello"`)
//! - numbers (macrodigits)
//! - identifiers (`Go`, `True`)
//!
//! Symbols are immutable and compared by value. Strings are reference-counted
//! so cloning a symbol (which the matcher does a lot) is O(1).

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A single character
    Char(char),

    /// A compound string: several characters matched as one symbol
    Compound(Arc<str>),

    /// A numeric symbol (macrodigit)
    Number(i64),

    /// An identifier
    Ident(Arc<str>),
}

impl Symbol {
    /// A single character symbol.
    pub fn char(c: char) -> Self {
        Symbol::Char(c)
    }

    /// A compound symbol. `"abc"` here is one symbol, not three characters.
    pub fn compound(s: impl AsRef<str>) -> Self {
        Symbol::Compound(Arc::from(s.as_ref()))
    }

    /// A numeric symbol.
    pub fn number(n: i64) -> Self {
        Symbol::Number(n)
    }

    /// An identifier symbol such as `True`.
    ///
    /// Identifiers compare by text and never equal a compound symbol with the
    /// same spelling.
    pub fn ident(name: impl AsRef<str>) -> Self {
        Symbol::Ident(Arc::from(name.as_ref()))
    }

    pub fn is_char(&self) -> bool {
        matches!(self, Symbol::Char(_))
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// The value of a numeric symbol; `None` for every other kind.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Symbol::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Symbol::Ident(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::Compound(s) => write!(f, "{}", s),
            Symbol::Number(n) => write!(f, "{}", n),
            Symbol::Ident(name) => write!(f, "{}", name),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl From<i64> for Symbol {
    fn from(n: i64) -> Self {
        Symbol::Number(n)
    }
}
