//! Definition pass
//!
//! Turns a [`SyntaxProgram`] into a loaded [`Program`] in one sweep:
//!
//! 1. library functions are registered
//! 2. host natives are registered, replacing library functions of the same name
//! 3. sentence-defined functions are registered, replacing either of the above
//! 4. every `$EXTERN` name must have ended up in the table
//! 5. every sentence is checked: consistent variable kinds, no unbound
//!    variables in conditions or results, no calls to unknown functions
//! 6. the entry point is resolved
//!
//! After this pass the function table is never modified again.

use crate::ast::{Expr, Item, Sentence, SyntaxProgram};
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::function::{Function, FunctionKind, NativeFn};
use crate::library;
use crate::program::Program;
use refal_core::{Name, Namespace, VarKind, Variable};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

pub(crate) fn define(
    mut namespace: Namespace,
    syntax: SyntaxProgram,
    natives: Vec<(Name, NativeFn)>,
    config: RuntimeConfig,
) -> Result<Program> {
    let mut table: Vec<Option<Function>> = Vec::new();

    for (text, native) in library::functions() {
        let name = namespace.intern(text);
        insert(&mut table, Function::native(name, FunctionKind::Library, native));
    }

    for (name, native) in natives {
        if lookup(&table, name).is_some() {
            debug!(
                "Host function {} replaces library function",
                namespace.display(name)
            );
        }
        insert(&mut table, Function::native(name, FunctionKind::External, native));
    }

    let mut externs = Vec::new();
    for item in syntax.items {
        match item {
            Item::Extern(decl) => externs.extend(decl.names),
            Item::Function(def) => {
                match lookup(&table, def.name).map(|f| f.kind) {
                    Some(FunctionKind::User) => {
                        return Err(RuntimeError::DuplicateFunction {
                            name: namespace.display(def.name).to_string(),
                        });
                    }
                    Some(kind) => debug!(
                        "{} shadows {:?} function of the same name",
                        namespace.display(def.name),
                        kind
                    ),
                    None => {}
                }
                debug!(
                    "Defining {} ({} sentences)",
                    namespace.display(def.name),
                    def.sentences.len()
                );
                insert(&mut table, Function::user(def.name, def.sentences, def.source));
            }
        }
    }

    for name in externs {
        match lookup(&table, name) {
            Some(function) => debug!(
                "External {} resolved to {:?} function",
                namespace.display(name),
                function.kind
            ),
            None => {
                return Err(RuntimeError::UnresolvedExternal {
                    name: namespace.display(name).to_string(),
                });
            }
        }
    }

    for function in table.iter().flatten() {
        for (index, sentence) in function.sentences().iter().enumerate() {
            validate_sentence(&namespace, &table, function, index, sentence)?;
        }
    }

    let entry = namespace
        .get(&config.entry_point)
        .filter(|&name| lookup(&table, name).is_some_and(|f| f.kind == FunctionKind::User))
        .ok_or_else(|| RuntimeError::MissingEntryPoint {
            name: config.entry_point.clone(),
        })?;
    debug!("Entry point: {}", config.entry_point);

    Ok(Program::from_parts(namespace, table, entry, config))
}

fn insert(table: &mut Vec<Option<Function>>, function: Function) {
    let index = function.name.index();
    if table.len() <= index {
        table.resize_with(index + 1, || None);
    }
    table[index] = Some(function);
}

pub(crate) fn lookup(table: &[Option<Function>], name: Name) -> Option<&Function> {
    table.get(name.index()).and_then(Option::as_ref)
}

/// Static checks for one sentence of a user function.
fn validate_sentence<'s>(
    namespace: &Namespace,
    table: &[Option<Function>],
    function: &Function,
    index: usize,
    sentence: &'s Sentence,
) -> Result<()> {
    let owner = namespace.display(function.name).to_string();
    let mut checker = SentenceChecker {
        owner: &owner,
        sentence: index + 1,
        kinds: HashMap::new(),
        bound: HashSet::new(),
    };

    checker.bind_all(sentence.pattern.variables())?;
    for condition in &sentence.conditions {
        checker.check_expr(namespace, table, &condition.expr)?;
        checker.bind_all(condition.pattern.variables())?;
    }
    checker.check_expr(namespace, table, &sentence.result)
}

struct SentenceChecker<'o, 's> {
    owner: &'o str,
    /// 1-based, for messages
    sentence: usize,
    kinds: HashMap<Arc<str>, VarKind>,
    bound: HashSet<&'s Variable>,
}

impl<'s> SentenceChecker<'_, 's> {
    fn record_kind(&mut self, variable: &Variable) -> Result<()> {
        match self.kinds.get(&variable.name) {
            Some(&kind) if kind != variable.kind => Err(RuntimeError::malformed(
                self.owner,
                format!(
                    "sentence {}: variable '{}' used as both {}. and {}.",
                    self.sentence,
                    variable.name,
                    kind.prefix(),
                    variable.kind.prefix()
                ),
            )),
            Some(_) => Ok(()),
            None => {
                self.kinds.insert(variable.name.clone(), variable.kind);
                Ok(())
            }
        }
    }

    fn bind_all(&mut self, variables: Vec<&'s Variable>) -> Result<()> {
        for variable in variables {
            self.record_kind(variable)?;
            self.bound.insert(variable);
        }
        Ok(())
    }

    fn check_expr(&mut self, namespace: &Namespace, table: &[Option<Function>], expr: &Expr) -> Result<()> {
        for variable in expr.variables() {
            self.record_kind(variable)?;
            if !self.bound.contains(variable) {
                return Err(RuntimeError::malformed(
                    self.owner,
                    format!("sentence {}: variable {} is not bound", self.sentence, variable),
                ));
            }
        }
        for callee in expr.calls() {
            if lookup(table, callee).is_none() {
                return Err(RuntimeError::UndefinedFunction {
                    name: namespace.display(callee).to_string(),
                    caller: self.owner.to_string(),
                });
            }
        }
        Ok(())
    }
}
