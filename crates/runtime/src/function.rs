//! Entries of the function table

use crate::ast::{Sentence, SourceLocation};
use crate::error::Result;
use crate::eval::Evaluator;
use refal_core::{Name, Term};
use std::fmt;
use std::sync::Arc;

/// A natively implemented function.
///
/// Natives receive the evaluator, so they can call back into the program and
/// reach the host I/O.
pub type NativeFn = Arc<dyn Fn(&mut Evaluator<'_>, Term) -> Result<Term> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// Defined by sentences in the program
    User,
    /// Supplied by the host at load time
    External,
    /// Built into the runtime
    Library,
}

#[derive(Clone)]
pub enum Body {
    Sentences(Vec<Sentence>),
    Native(NativeFn),
}

#[derive(Clone)]
pub struct Function {
    pub name: Name,
    pub kind: FunctionKind,
    pub body: Body,
    pub source: Option<SourceLocation>,
}

impl Function {
    pub fn user(name: Name, sentences: Vec<Sentence>, source: Option<SourceLocation>) -> Self {
        Function {
            name,
            kind: FunctionKind::User,
            body: Body::Sentences(sentences),
            source,
        }
    }

    pub fn native(name: Name, kind: FunctionKind, native: NativeFn) -> Self {
        Function {
            name,
            kind,
            body: Body::Native(native),
            source: None,
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        match &self.body {
            Body::Sentences(sentences) => sentences,
            Body::Native(_) => &[],
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.body, Body::Native(_))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            Body::Sentences(s) => format!("{} sentences", s.len()),
            Body::Native(_) => "<native>".to_string(),
        };
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("body", &body)
            .field("source", &self.source)
            .finish()
    }
}
