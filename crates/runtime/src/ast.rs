//! Syntax tree handed over by a front end
//!
//! A front end (parser, code generator, or a host assembling a program by
//! hand through [`crate::ProgramBuilder`]) produces a [`SyntaxProgram`]
//! whose function names are [`Name`] handles from one [`refal_core::Namespace`].
//! The definition pass consumes the tree together with that namespace.

use refal_core::{Name, Pattern, Symbol, Variable};
use std::path::PathBuf;

/// Source location for error reporting
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// Line (0-indexed)
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file: PathBuf, line: usize) -> Self {
        SourceLocation { file, line }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line + 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntaxProgram {
    pub items: Vec<Item>,
}

impl SyntaxProgram {
    pub fn new() -> Self {
        SyntaxProgram::default()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(def) => Some(def),
            Item::Extern(_) => None,
        })
    }

    pub fn externs(&self) -> impl Iterator<Item = &ExternDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Extern(decl) => Some(decl),
            Item::Function(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Function(FunctionDef),
    /// `$EXTERN Name1, Name2;`
    Extern(ExternDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternDecl {
    pub names: Vec<Name>,
    pub source: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    pub sentences: Vec<Sentence>,
    pub source: Option<SourceLocation>,
}

/// `pattern, cond1 : pat1, ... = result;`
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub pattern: Pattern,
    pub conditions: Vec<Condition>,
    pub result: Expr,
}

impl Sentence {
    pub fn new(pattern: Pattern, result: Expr) -> Self {
        Sentence {
            pattern,
            conditions: Vec::new(),
            result,
        }
    }

    /// Add a `, expr : pattern` condition after the existing ones.
    pub fn with_condition(mut self, expr: Expr, pattern: Pattern) -> Self {
        self.conditions.push(Condition { expr, pattern });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub expr: Expr,
    pub pattern: Pattern,
}

/// A result template: symbols, variables, groups and calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    pub nodes: Vec<ExprNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Symbol(Symbol),
    Var(Variable),
    /// `( ... )`
    Group(Expr),
    /// `<Function argument>`
    Call { function: Name, argument: Expr },
}

impl Expr {
    pub fn new() -> Self {
        Expr::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn sym(mut self, symbol: Symbol) -> Self {
        self.nodes.push(ExprNode::Symbol(symbol));
        self
    }

    pub fn chr(self, c: char) -> Self {
        self.sym(Symbol::Char(c))
    }

    pub fn chars(mut self, s: &str) -> Self {
        self.nodes
            .extend(s.chars().map(|c| ExprNode::Symbol(Symbol::Char(c))));
        self
    }

    pub fn num(self, n: i64) -> Self {
        self.sym(Symbol::Number(n))
    }

    pub fn var(mut self, variable: Variable) -> Self {
        self.nodes.push(ExprNode::Var(variable));
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

    pub fn group(mut self, inner: Expr) -> Self {
        self.nodes.push(ExprNode::Group(inner));
        self
    }

    pub fn call(mut self, function: Name, argument: Expr) -> Self {
        self.nodes.push(ExprNode::Call { function, argument });
        self
    }

    /// Every variable occurrence, including those inside groups and call
    /// arguments.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if let ExprNode::Var(v) = node {
                out.push(v);
            }
        });
        out
    }

    /// Every called function name, outermost calls after their arguments.
    pub fn calls(&self) -> Vec<Name> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if let ExprNode::Call { function, .. } = node {
                out.push(*function);
            }
        });
        out
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ExprNode)) {
        for node in &self.nodes {
            match node {
                ExprNode::Symbol(_) | ExprNode::Var(_) => {}
                ExprNode::Group(inner) => inner.walk(visit),
                ExprNode::Call { argument, .. } => argument.walk(visit),
            }
            visit(node);
        }
    }
}
