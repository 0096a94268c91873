//! Errors surfaced to host code.
//!
//! Recoverable conditions are returned as [`BindingError`]. Caller bugs that
//! can be detected from the arguments alone (an internal field index past the
//! declared count, for instance) are [`ContractViolation`]s: they abort the
//! current operation with a panic whose payload is the violation itself.

use std::fmt;

use crate::runner::boundary::ErrorInfo;

/// Exception thrown inside the engine while running a getter, setter or
/// function.
#[derive(Debug, Clone, PartialEq)]
pub struct JsError {
    /// Error constructor name, when the engine raised the error itself.
    pub kind: Option<String>,
    /// String form of the thrown value.
    pub message: String,
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{}: {}", kind, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for JsError {}

impl From<ErrorInfo> for JsError {
    fn from(info: ErrorInfo) -> Self {
        JsError {
            kind: info.kind,
            message: info.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindingError {
    /// The host value has no engine representation. Carries the host type
    /// name.
    UnsupportedType(String),
    /// The engine threw.
    JsError(JsError),
    /// The value is not callable. Carries its string form.
    NotAFunction(String),
    NotAnObject(String),
    NotASymbol(String),
    /// The property name cannot be marshaled (it contains a NUL byte).
    InvalidPropertyName(String),
    /// The value was created in a different context.
    ForeignContext,
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::UnsupportedType(name) => {
                write!(f, "unsupported object property type `{}`", name)
            }
            BindingError::JsError(e) => write!(f, "{}", e),
            BindingError::NotAFunction(repr) => write!(f, "{} is not a function", repr),
            BindingError::NotAnObject(repr) => write!(f, "{} is not an object", repr),
            BindingError::NotASymbol(repr) => write!(f, "{} is not a symbol", repr),
            BindingError::InvalidPropertyName(name) => {
                write!(f, "property name {:?} contains a NUL byte", name)
            }
            BindingError::ForeignContext => {
                write!(f, "value belongs to a different context")
            }
        }
    }
}

impl std::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindingError::JsError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ErrorInfo> for BindingError {
    fn from(info: ErrorInfo) -> Self {
        BindingError::JsError(JsError::from(info))
    }
}

pub use crate::runner::ds::error::{fatal, ContractViolation};
