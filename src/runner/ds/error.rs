use std::fmt;
use std::fmt::{Display, Formatter};

use log::error;

use crate::runner::ds::value::JsValue;

/// Abrupt completion raised inside the engine.
#[derive(Clone)]
pub enum JErrorType {
    ReferenceError(String),
    TypeError(String),
    RangeError(String),
    SyntaxError(String),
    /// Arbitrary value thrown by a native function.
    Thrown(JsValue),
}
impl JErrorType {
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            JErrorType::ReferenceError(_) => Some("ReferenceError"),
            JErrorType::TypeError(_) => Some("TypeError"),
            JErrorType::RangeError(_) => Some("RangeError"),
            JErrorType::SyntaxError(_) => Some("SyntaxError"),
            JErrorType::Thrown(_) => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            JErrorType::ReferenceError(m)
            | JErrorType::TypeError(m)
            | JErrorType::RangeError(m)
            | JErrorType::SyntaxError(m) => m.to_string(),
            JErrorType::Thrown(v) => v.to_string(),
        }
    }
}
impl Display for JErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JErrorType::ReferenceError(m) => write!(f, "Uncaught reference error: {}.", m),
            JErrorType::TypeError(m) => write!(f, "Uncaught type error: {}.", m),
            JErrorType::RangeError(m) => write!(f, "Uncaught range error: {}.", m),
            JErrorType::SyntaxError(m) => write!(f, "Uncaught syntax error: {}.", m),
            JErrorType::Thrown(v) => write!(f, "Uncaught {}", v),
        }
    }
}
impl fmt::Debug for JErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Misuse of the engine that indicates a bug in the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractViolation {
    InternalFieldOutOfRange { index: u32, count: u32 },
    InternalFieldNotAValue { index: u32 },
    /// The engine refused a prototype link (cycle or non-extensible object).
    PrototypeRejected,
    /// A handle was used with a context other than the one that created it.
    ForeignContext,
    HeapExhausted { max_handles: usize },
    InvalidHandle(usize),
}

impl Display for ContractViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::InternalFieldOutOfRange { index, count } => {
                write!(f, "index out of range [{}] with length {}", index, count)
            }
            ContractViolation::InternalFieldNotAValue { index } => {
                write!(f, "internal field {} does not contain a value", index)
            }
            ContractViolation::PrototypeRejected => {
                write!(f, "the engine rejected the prototype assignment")
            }
            ContractViolation::ForeignContext => {
                write!(f, "value belongs to a different context")
            }
            ContractViolation::HeapExhausted { max_handles } => {
                write!(f, "handle limit of {} exhausted", max_handles)
            }
            ContractViolation::InvalidHandle(idx) => write!(f, "invalid value handle #{}", idx),
        }
    }
}

/// Aborts the current operation. The panic payload is the violation, so a
/// harness can recover it with `catch_unwind` and `downcast_ref`.
pub fn fatal(violation: ContractViolation) -> ! {
    error!("fatal: {}", violation);
    std::panic::panic_any(violation)
}
