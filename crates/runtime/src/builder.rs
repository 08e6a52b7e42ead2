//! Program assembly
//!
//! [`ProgramBuilder`] owns the namespace while a program is put together and
//! hands it, with the syntax tree and any host natives, to the definition
//! pass. A parser front end uses [`ProgramBuilder::from_syntax`]; hosts and
//! tests usually build sentences directly:
//!
//! ```
//! use refal_core::{Pattern, Term};
//! use refal_runtime::{Expr, ProgramBuilder, Sentence};
//!
//! let mut builder = ProgramBuilder::new();
//! // Rev { s.1 e.2 = <Rev e.2> s.1; = ; }
//! let rev = builder.name("Rev");
//! builder.function(
//!     "Rev",
//!     vec![
//!         Sentence::new(
//!             Pattern::new().s("1").e("2"),
//!             Expr::new().call(rev, Expr::new().e("2")).s("1"),
//!         ),
//!         Sentence::new(Pattern::new(), Expr::new()),
//!     ],
//! );
//! builder.function("Go", vec![Sentence::new(Pattern::new(), Expr::new())]);
//!
//! let program = builder.load().unwrap();
//! let mut io = refal_runtime::BufferIo::new();
//! let reversed = program.call("Rev", Term::from_chars("abc"), &mut io).unwrap();
//! assert_eq!(reversed, Term::from_chars("cba"));
//! ```

use crate::ast::{ExternDecl, FunctionDef, Item, Sentence, SourceLocation, SyntaxProgram};
use crate::config::RuntimeConfig;
use crate::define::define;
use crate::error::Result;
use crate::eval::Evaluator;
use crate::function::NativeFn;
use crate::program::Program;
use refal_core::{Name, Namespace, Term};
use std::sync::Arc;

#[derive(Default)]
pub struct ProgramBuilder {
    namespace: Namespace,
    syntax: SyntaxProgram,
    natives: Vec<(Name, NativeFn)>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        ProgramBuilder::default()
    }

    /// Continue from a tree produced by a front end with `namespace`.
    pub fn from_syntax(namespace: Namespace, syntax: SyntaxProgram) -> Self {
        ProgramBuilder {
            namespace,
            syntax,
            natives: Vec::new(),
        }
    }

    /// Handle for a function name, for use in [`crate::Expr::call`].
    pub fn name(&mut self, text: &str) -> Name {
        self.namespace.intern(text)
    }

    /// Add a function defined by sentences.
    pub fn function(&mut self, name: &str, sentences: Vec<Sentence>) -> &mut Self {
        self.push_function(name, sentences, None)
    }

    pub fn function_at(
        &mut self,
        name: &str,
        sentences: Vec<Sentence>,
        source: SourceLocation,
    ) -> &mut Self {
        self.push_function(name, sentences, Some(source))
    }

    fn push_function(
        &mut self,
        name: &str,
        sentences: Vec<Sentence>,
        source: Option<SourceLocation>,
    ) -> &mut Self {
        let name = self.namespace.intern(name);
        self.syntax.items.push(Item::Function(FunctionDef {
            name,
            sentences,
            source,
        }));
        self
    }

    /// Declare functions the program expects from outside (`$EXTERN`).
    pub fn external(&mut self, names: &[&str]) -> &mut Self {
        let names = names.iter().map(|n| self.namespace.intern(n)).collect();
        self.syntax.items.push(Item::Extern(ExternDecl {
            names,
            source: None,
        }));
        self
    }

    /// Supply a natively implemented function.
    pub fn define_native<F>(&mut self, name: &str, native: F) -> &mut Self
    where
        F: Fn(&mut Evaluator<'_>, Term) -> Result<Term> + Send + Sync + 'static,
    {
        let name = self.namespace.intern(name);
        self.natives.push((name, Arc::new(native)));
        self
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn syntax(&self) -> &SyntaxProgram {
        &self.syntax
    }

    /// Define every function with the default configuration.
    pub fn load(self) -> Result<Program> {
        self.load_with(RuntimeConfig::default())
    }

    pub fn load_with(self, config: RuntimeConfig) -> Result<Program> {
        define(self.namespace, self.syntax, self.natives, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use refal_core::Pattern;

    #[test]
    fn test_names_are_shared_with_syntax() {
        let mut b = ProgramBuilder::new();
        let f = b.name("F");
        b.function("F", vec![Sentence::new(Pattern::new(), Expr::new())]);
        let def = b.syntax().functions().next().unwrap();
        assert_eq!(def.name, f);
        assert_eq!(b.namespace().resolve(f), "F");
    }

    #[test]
    fn test_from_syntax_keeps_source_locations() {
        let mut ns = Namespace::new();
        let go = ns.intern("Go");
        let syntax = SyntaxProgram {
            items: vec![Item::Function(FunctionDef {
                name: go,
                sentences: vec![Sentence::new(Pattern::new(), Expr::new())],
                source: Some(SourceLocation::new("main.ref".into(), 2)),
            })],
        };
        let program = ProgramBuilder::from_syntax(ns, syntax).load().unwrap();
        let entry = program.function(program.entry_point()).unwrap();
        assert_eq!(entry.source.as_ref().map(|s| s.line), Some(2));
    }
}
