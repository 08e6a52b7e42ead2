//! Loaded programs
//!
//! A [`Program`] is the fixed function table produced by the definition
//! pass. It is read-only and `Send + Sync`; each run or host call creates
//! its own [`Evaluator`].

use crate::ast::SyntaxProgram;
use crate::config::RuntimeConfig;
use crate::define::{define, lookup};
use crate::error::{Result, RuntimeError, format_panic_payload};
use crate::eval::Evaluator;
use crate::function::Function;
use crate::io::Io;
use refal_core::{Name, Namespace, Term};
use tracing::debug;

#[derive(Debug)]
pub struct Program {
    namespace: Namespace,
    /// Indexed by `Name`; names that are only referenced stay `None`
    functions: Vec<Option<Function>>,
    entry: Name,
    config: RuntimeConfig,
}

impl Program {
    pub(crate) fn from_parts(
        namespace: Namespace,
        functions: Vec<Option<Function>>,
        entry: Name,
        config: RuntimeConfig,
    ) -> Self {
        Program {
            namespace,
            functions,
            entry,
            config,
        }
    }

    /// Define every function of `syntax`, whose names come from `namespace`.
    pub fn load(namespace: Namespace, syntax: SyntaxProgram, config: RuntimeConfig) -> Result<Self> {
        define(namespace, syntax, Vec::new(), config)
    }

    /// Invoke the entry point once with an empty term and discard its result.
    ///
    /// Evaluation runs on a dedicated thread with `config.stack_size` bytes of
    /// stack; the caller blocks until it finishes.
    pub fn run(&self, io: &mut dyn Io) -> Result<()> {
        debug!(
            "Running {} (max depth {}, stack {} bytes)",
            self.config.entry_point, self.config.max_depth, self.config.stack_size
        );
        self.on_eval_thread(move || self.run_inline(io))
    }

    /// Like [`Program::run`], but on the calling thread.
    ///
    /// The calling thread's stack must be deep enough for `config.max_depth`
    /// nested calls; otherwise lower the limit.
    pub fn run_inline(&self, io: &mut dyn Io) -> Result<()> {
        let mut evaluator = Evaluator::new(self, io);
        evaluator.call_function(self.entry, Term::new())?;
        Ok(())
    }

    /// Call any function of the program.
    ///
    /// Like [`Program::run`], evaluation happens on a dedicated thread with
    /// `config.stack_size` bytes of stack.
    pub fn call(&self, name: &str, argument: Term, io: &mut dyn Io) -> Result<Term> {
        self.on_eval_thread(move || self.call_inline(name, argument, io))
    }

    /// Like [`Program::call`], but on the calling thread.
    pub fn call_inline(&self, name: &str, argument: Term, io: &mut dyn Io) -> Result<Term> {
        Evaluator::new(self, io).call(name, argument)
    }

    /// Run `eval` on a scoped thread sized by `config.stack_size` and wait
    /// for it. A panic on that thread becomes [`RuntimeError::Panic`].
    fn on_eval_thread<T, F>(&self, eval: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> Result<T> + Send,
    {
        std::thread::scope(|scope| {
            let handle = std::thread::Builder::new()
                .name("refal-eval".to_string())
                .stack_size(self.config.stack_size)
                .spawn_scoped(scope, eval)?;
            match handle.join() {
                Ok(result) => result,
                Err(payload) => Err(RuntimeError::Panic(format_panic_payload(&payload))),
            }
        })
    }

    pub fn function(&self, name: Name) -> Option<&Function> {
        lookup(&self.functions, name)
    }

    pub fn lookup(&self, text: &str) -> Option<&Function> {
        self.namespace.get(text).and_then(|name| self.function(name))
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter().flatten()
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn entry_point(&self) -> Name {
        self.entry
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, FunctionDef, Item, Sentence};
    use crate::builder::ProgramBuilder;
    use crate::function::FunctionKind;
    use crate::io::BufferIo;
    use refal_core::Pattern;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_program_is_send_sync() {
        assert_send_sync::<Program>();
    }

    #[test]
    fn test_load_from_front_end_tree() {
        let mut ns = Namespace::new();
        let go = ns.intern("Go");
        let prout = ns.intern("Prout");
        let syntax = SyntaxProgram {
            items: vec![Item::Function(FunctionDef {
                name: go,
                sentences: vec![Sentence::new(
                    Pattern::new(),
                    Expr::new().call(prout, Expr::new().chars("hi")),
                )],
                source: None,
            })],
        };

        let program = Program::load(ns, syntax, RuntimeConfig::default()).unwrap();
        assert_eq!(program.entry_point(), go);

        let mut io = BufferIo::new();
        program.run(&mut io).unwrap();
        assert_eq!(io.output(), ["hi".to_string()]);
    }

    #[test]
    fn test_run_inline_matches_run() {
        let mut b = ProgramBuilder::new();
        let prout = b.name("Prout");
        b.function(
            "Go",
            vec![Sentence::new(
                Pattern::new(),
                Expr::new().call(prout, Expr::new().num(1).num(2)),
            )],
        );
        let program = b.load().unwrap();

        let mut threaded = BufferIo::new();
        let mut inline = BufferIo::new();
        program.run(&mut threaded).unwrap();
        program.run_inline(&mut inline).unwrap();
        assert_eq!(threaded.output(), inline.output());
        assert_eq!(inline.output(), ["1 2".to_string()]);
    }

    #[test]
    fn test_native_panic_is_reported() {
        let mut b = ProgramBuilder::new();
        let boom = b.name("Boom");
        b.define_native("Boom", |_, _| panic!("native blew up"));
        b.function(
            "Go",
            vec![Sentence::new(Pattern::new(), Expr::new().call(boom, Expr::new()))],
        );
        let program = b.load().unwrap();

        let err = program.run(&mut BufferIo::new()).unwrap_err();
        assert!(matches!(err, RuntimeError::Panic(ref msg) if msg == "native blew up"));
    }

    #[test]
    fn test_call_with_default_depth_reports_limit() {
        // Down { e.1 = <Down e.1>; }
        let mut b = ProgramBuilder::new();
        let down = b.name("Down");
        b.function("Go", vec![Sentence::new(Pattern::new(), Expr::new())]);
        b.function(
            "Down",
            vec![Sentence::new(
                Pattern::new().e("1"),
                Expr::new().call(down, Expr::new().e("1")),
            )],
        );
        let program = b.load().unwrap();
        assert_eq!(program.config().max_depth, crate::config::DEFAULT_MAX_DEPTH);

        let err = program
            .call("Down", Term::new(), &mut BufferIo::new())
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::RecursionLimit { limit } if limit == crate::config::DEFAULT_MAX_DEPTH
        ));
    }

    #[test]
    fn test_call_inline_uses_calling_thread() {
        let mut b = ProgramBuilder::new();
        b.function("Go", vec![Sentence::new(Pattern::new(), Expr::new())]);
        b.define_native("Where", |_, _| {
            let name = std::thread::current().name().unwrap_or("").to_string();
            Ok(Term::from_chars(&name))
        });
        let program = b.load().unwrap();
        let mut io = BufferIo::new();

        assert_eq!(
            program.call("Where", Term::new(), &mut io).unwrap(),
            Term::from_chars("refal-eval")
        );
        let inline = program.call_inline("Where", Term::new(), &mut io).unwrap();
        assert_ne!(inline, Term::from_chars("refal-eval"));
    }

    #[test]
    fn test_functions_iterates_table() {
        let mut b = ProgramBuilder::new();
        b.function("Go", vec![Sentence::new(Pattern::new(), Expr::new())]);
        let program = b.load().unwrap();
        let users: Vec<&str> = program
            .functions()
            .filter(|f| f.kind == FunctionKind::User)
            .map(|f| program.namespace().resolve(f.name))
            .collect();
        assert_eq!(users, vec!["Go"]);
    }
}
