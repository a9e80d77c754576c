//! Error taxonomy for `.vcc` parsing.
//!
//! Two severity classes exist, independent of the error kind:
//!
//! - **Structural** violations make the model ill-formed (illegal names,
//!   duplicate argument names, malformed quoting, invalid enum defaults,
//!   invalid ABI literal, stanza shape). They are fatal in every mode.
//! - **Vocabulary** violations (unknown stanza keyword, unknown type token)
//!   are reported as errors in strict mode and as warnings otherwise, but an
//!   unresolved token has no native representation, so the run aborts before
//!   emission either way.
//!
//! The two classes are deliberately not unified: shape errors must never
//! slip through a lenient run.

use thiserror::Error;

/// A fatal parse error, carrying the 1-based input line it was detected on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VccError {
    #[error("line {line}: unknown stanza ${keyword}")]
    UnknownStanza { keyword: String, line: usize },

    #[error("line {line}: did not recognize type <{token}>")]
    UnknownType { token: String, line: usize },

    #[error("line {line}: valid ABI types are 'strict' or 'vrt', got '{value}'")]
    InvalidAbi { value: String, line: usize },

    #[error("line {line}: {context}: illegal name '{name}'")]
    IllegalIdentifier {
        context: String,
        name: String,
        line: usize,
    },

    #[error("line {line}: {func}(): duplicate argument name '{name}'")]
    DuplicateArgumentName {
        func: String,
        name: String,
        line: usize,
    },

    #[error("line {line}: unbalanced quote in default value")]
    UnbalancedQuote { line: usize },

    #[error("line {line}: ENUM default value <{value}> not valid")]
    InvalidEnumDefault { value: String, line: usize },

    #[error("line {line}: {context}: {detail}")]
    MalformedStanza {
        context: String,
        detail: String,
        line: usize,
    },

    #[error("line {line}: $Method must follow the $Object it belongs to")]
    MethodWithoutObject { line: usize },

    #[error("line {line}: first stanza must be $Module")]
    MissingModule { line: usize },

    #[error("line {line}: not emitting documentation for $Event {name}")]
    EventWithDocs { name: String, line: usize },
}

/// How a diagnostic should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl VccError {
    /// Structural errors are fatal regardless of the strictness mode.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            VccError::UnknownStanza { .. }
                | VccError::UnknownType { .. }
                | VccError::EventWithDocs { .. }
        )
    }

    /// Presentation severity under the given mode. Non-structural errors
    /// downgrade to warnings in lenient mode; whether the run can continue
    /// after a warning is the caller's decision (only [`VccError::EventWithDocs`]
    /// is recoverable).
    pub fn severity(&self, strict: bool) -> Severity {
        if strict || self.is_structural() {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// The input line the diagnostic points at.
    pub fn line(&self) -> usize {
        match self {
            VccError::UnknownStanza { line, .. }
            | VccError::UnknownType { line, .. }
            | VccError::InvalidAbi { line, .. }
            | VccError::IllegalIdentifier { line, .. }
            | VccError::DuplicateArgumentName { line, .. }
            | VccError::UnbalancedQuote { line }
            | VccError::InvalidEnumDefault { line, .. }
            | VccError::MalformedStanza { line, .. }
            | VccError::MethodWithoutObject { line }
            | VccError::MissingModule { line }
            | VccError::EventWithDocs { line, .. } => *line,
        }
    }
}
