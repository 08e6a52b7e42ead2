//! Refal Runtime: evaluator, standard library and program driver
//!
//! Programs arrive as a syntax tree ([`SyntaxProgram`]) whose names come from
//! a [`refal_core::Namespace`]. Loading runs the definition pass once and
//! yields a read-only [`Program`]; running it calls the entry point (`Go` by
//! default) with an empty term.
//!
//! - `ast`: syntax tree handed over by a front end
//! - `builder`: assembling programs and supplying host natives
//! - `define`: the definition pass
//! - `eval`: sentence evaluation
//! - `library`: built-in functions (`Prout`, `Add`, `Numb`, ...)
//! - `program`: the loaded function table and driver
//! - `io`, `config`, `error`: host I/O, runtime settings, failures
//!
//! Logging goes through `tracing`; install a subscriber in the host to see it.

pub mod ast;
pub mod builder;
pub mod config;
mod define;
pub mod error;
pub mod eval;
pub mod function;
pub mod io;
mod library;
pub mod program;

pub use ast::{
    Condition, Expr, ExprNode, ExternDecl, FunctionDef, Item, Sentence, SourceLocation,
    SyntaxProgram,
};
pub use builder::ProgramBuilder;
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use eval::Evaluator;
pub use function::{Body, Function, FunctionKind, NativeFn};
pub use io::{BufferIo, Io, StdIo};
pub use program::Program;
