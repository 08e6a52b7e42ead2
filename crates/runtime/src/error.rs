//! Runtime errors
//!
//! Every failure that aborts evaluation or loading is a [`RuntimeError`].
//! A sentence whose pattern or condition does not match is ordinary control
//! flow and never produces one; only running out of sentences does
//! ([`RuntimeError::RecognitionImpossible`]).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A call exhausted all sentences of its function
    #[error("Recognition impossible in {function}. Last expression: {argument}")]
    RecognitionImpossible { function: String, argument: String },

    /// No function carries the configured entry-point name
    #[error("No entry point defined (entry point is a function named '{name}')")]
    MissingEntryPoint { name: String },

    /// A sentence that can never be evaluated correctly
    #[error("Malformed definition of {function}: {reason}")]
    Malformed { function: String, reason: String },

    /// A call to a name with no function behind it
    #[error("Undefined function '{name}' called from {caller}")]
    UndefinedFunction { name: String, caller: String },

    #[error("Function '{name}' is defined more than once")]
    DuplicateFunction { name: String },

    /// An `$EXTERN` declaration the host did not supply
    #[error("External function '{name}' was declared but not supplied")]
    UnresolvedExternal { name: String },

    #[error("Recursion depth limit exceeded (max: {limit})")]
    RecursionLimit { limit: usize },

    /// A library function received a well-shaped but invalid argument
    #[error("{function}: {message}")]
    Library { function: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The evaluation thread panicked
    #[error("Evaluation aborted: {0}")]
    Panic(String),
}

impl RuntimeError {
    pub fn library(function: &str, message: impl Into<String>) -> Self {
        RuntimeError::Library {
            function: function.to_string(),
            message: message.into(),
        }
    }

    pub fn malformed(function: &str, reason: impl Into<String>) -> Self {
        RuntimeError::Malformed {
            function: function.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures raised at load time rather than during evaluation.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            RuntimeError::MissingEntryPoint { .. }
                | RuntimeError::Malformed { .. }
                | RuntimeError::UndefinedFunction { .. }
                | RuntimeError::DuplicateFunction { .. }
                | RuntimeError::UnresolvedExternal { .. }
                | RuntimeError::Config(_)
        )
    }
}

/// Format a panic payload into an error message
pub fn format_panic_payload(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
