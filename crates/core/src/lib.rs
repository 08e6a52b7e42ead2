//! Refal Core: the term model and pattern matcher
//!
//! This crate provides the language-level data shared by every part of a
//! Refal runtime:
//!
//! - `symbol`: leaf values (characters, compound strings, numbers, identifiers)
//! - `term`: passive expressions, the only runtime value type
//! - `names`: the function-name namespace shared by front end and evaluator
//! - `pattern`: sentence patterns and pattern variables
//! - `bindings`: variable environments produced by matching
//! - `matcher`: the backtracking matcher
//!
//! # Example
//!
//! ```
//! use refal_core::{Pattern, Term, Variable, Binding, match_pattern};
//!
//! let pattern = Pattern::new().e("1").chr('+').e("2");
//! let bindings = match_pattern(&pattern, &Term::from_chars("a+b+c")).unwrap();
//!
//! assert_eq!(
//!     bindings.get(&Variable::e("1")),
//!     Some(&Binding::Expression(Term::from_chars("a")))
//! );
//! ```

pub mod bindings;
pub mod matcher;
pub mod names;
pub mod pattern;
pub mod symbol;
pub mod term;

pub use bindings::{Binding, Bindings};
pub use matcher::{match_pattern, match_with};
pub use names::{Name, Namespace};
pub use pattern::{Pattern, PatternElement, VarKind, Variable};
pub use symbol::Symbol;
pub use term::{Element, Part, Term};
