//! Sentence evaluation
//!
//! A call tries the callee's sentences in declaration order:
//!
//! ```text
//! TryingSentence(i) --no match--------------> TryingSentence(i + 1)
//!        |
//!      match --> CheckingConditions --fail--> TryingSentence(i + 1)
//!                       |
//!                      ok --> BuildingResult --> Done
//!
//! i == sentence count --> RecognitionImpossible
//! ```
//!
//! A failed pattern or condition only moves on to the next sentence. Errors
//! raised while evaluating a condition's template (including a called
//! function running out of sentences) abort the whole evaluation.

use crate::ast::{Expr, ExprNode, Sentence};
use crate::error::{Result, RuntimeError};
use crate::function::{Body, Function};
use crate::io::Io;
use crate::program::Program;
use refal_core::{Bindings, Name, Term, match_pattern, match_with};
use tracing::trace;

pub struct Evaluator<'a> {
    program: &'a Program,
    io: &'a mut dyn Io,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(program: &'a Program, io: &'a mut dyn Io) -> Self {
        Evaluator {
            program,
            io,
            depth: 0,
        }
    }

    pub fn program(&self) -> &'a Program {
        self.program
    }

    /// The host I/O, for library functions.
    pub fn io(&mut self) -> &mut dyn Io {
        &mut *self.io
    }

    /// Number of calls currently in progress.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Call a function by its textual name.
    pub fn call(&mut self, name: &str, argument: Term) -> Result<Term> {
        let handle = self
            .program
            .namespace()
            .get(name)
            .filter(|&n| self.program.function(n).is_some())
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: name.to_string(),
                caller: "<host>".to_string(),
            })?;
        self.call_function(handle, argument)
    }

    pub fn call_function(&mut self, name: Name, argument: Term) -> Result<Term> {
        let program = self.program;
        let function = program
            .function(name)
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: program.namespace().display(name).to_string(),
                caller: "<host>".to_string(),
            })?;

        let limit = program.config().max_depth;
        if self.depth >= limit {
            return Err(RuntimeError::RecursionLimit { limit });
        }

        self.depth += 1;
        trace!(
            depth = self.depth,
            "<{} {}>",
            program.namespace().display(name),
            argument
        );
        let result = match &function.body {
            Body::Native(native) => native(self, argument),
            Body::Sentences(sentences) => self.apply_sentences(function, sentences, argument),
        };
        self.depth -= 1;
        result
    }

    fn apply_sentences(
        &mut self,
        function: &Function,
        sentences: &[Sentence],
        argument: Term,
    ) -> Result<Term> {
        for (index, sentence) in sentences.iter().enumerate() {
            let Some(bindings) = match_pattern(&sentence.pattern, &argument) else {
                continue;
            };
            let Some(bindings) = self.check_conditions(function, sentence, bindings)? else {
                trace!(sentence = index + 1, "condition failed");
                continue;
            };
            trace!(sentence = index + 1, "matched");
            return self.eval_expr(function, &sentence.result, &bindings);
        }

        Err(RuntimeError::RecognitionImpossible {
            function: self.program.namespace().display(function.name).to_string(),
            argument: argument.to_string(),
        })
    }

    /// Evaluate conditions in order, extending the bindings.
    /// `Ok(None)` means some condition's pattern did not match.
    fn check_conditions(
        &mut self,
        function: &Function,
        sentence: &Sentence,
        mut bindings: Bindings,
    ) -> Result<Option<Bindings>> {
        for condition in &sentence.conditions {
            let value = self.eval_expr(function, &condition.expr, &bindings)?;
            match match_with(&condition.pattern, &value, bindings) {
                Some(extended) => bindings = extended,
                None => return Ok(None),
            }
        }
        Ok(Some(bindings))
    }

    /// Substitute variables and evaluate calls left to right.
    fn eval_expr(&mut self, function: &Function, expr: &Expr, bindings: &Bindings) -> Result<Term> {
        let mut out = Term::new();
        for node in &expr.nodes {
            match node {
                ExprNode::Symbol(symbol) => out.push(symbol.clone()),
                ExprNode::Var(variable) => match bindings.get(variable) {
                    Some(binding) => binding.append_to(&mut out),
                    None => {
                        return Err(RuntimeError::malformed(
                            &self.program.namespace().display(function.name).to_string(),
                            format!("variable {} is not bound", variable),
                        ));
                    }
                },
                ExprNode::Group(inner) => {
                    let group = self.eval_expr(function, inner, bindings)?;
                    out.push_group(group);
                }
                ExprNode::Call {
                    function: callee,
                    argument,
                } => {
                    let argument = self.eval_expr(function, argument, bindings)?;
                    out.append(self.call_function(*callee, argument)?);
                }
            }
        }
        Ok(out)
    }
}
