use crate::dispatch::{Arity, ValueKind};
use std::error::Error;
use std::fmt;

pub type PipeResult<T> = Result<T, PipeError>;

#[derive(Debug)]
pub enum PipeError {
    MethodNotFound {
        receiver: ValueKind,
        method: String,
    },
    ArgumentMismatch {
        method: String,
        expected: Arity,
        given: usize,
    },
    TypeMismatch {
        method: String,
        expected: ValueKind,
        found: ValueKind,
    },
    InvalidArgument {
        method: String,
        message: String,
    },

    InvalidStep(String),

    Json(serde_json::Error),
}

impl PipeError {
    /// Short machine-friendly name of the failure class.
    pub fn kind(&self) -> &'static str {
        use PipeError::*;

        match self {
            MethodNotFound { .. } => "method_not_found",
            ArgumentMismatch { .. } | TypeMismatch { .. } | InvalidArgument { .. } => "argument_mismatch",
            InvalidStep(_) | Json(_) => "invalid_step",
        }
    }
}

impl fmt::Display for PipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PipeError::*;

        match self {
            MethodNotFound { receiver, method } => {
                write!(f, "undefined method `{}' for an instance of {}", method, receiver)
            }
            ArgumentMismatch { method, expected, given } => write!(
                f,
                "wrong number of arguments for `{}' (given {}, expected {})",
                method, given, expected
            ),
            TypeMismatch { method, expected, found } => write!(
                f,
                "no implicit conversion of {} into {} for `{}'",
                found, expected, method
            ),
            InvalidArgument { method, message } => write!(f, "{} for `{}'", message, method),
            InvalidStep(msg) => write!(f, "invalid pipeline step: {}", msg),
            Json(err) => write!(f, "invalid arguments: {}", err),
        }
    }
}

impl Error for PipeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipeError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PipeError {
    fn from(err: serde_json::Error) -> Self {
        PipeError::Json(err)
    }
}

pub fn method_not_found(receiver: ValueKind, method: &str) -> PipeError {
    PipeError::MethodNotFound {
        receiver,
        method: method.to_string(),
    }
}

pub fn type_mismatch(method: &str, expected: ValueKind, found: ValueKind) -> PipeError {
    PipeError::TypeMismatch {
        method: method.to_string(),
        expected,
        found,
    }
}

pub fn invalid_argument(method: &str, message: &str) -> PipeError {
    PipeError::InvalidArgument {
        method: method.to_string(),
        message: message.to_string(),
    }
}

pub fn invalid_step(msg: &str) -> PipeError {
    PipeError::InvalidStep(msg.to_string())
}
