//! Ledger executor shared types
//!
//! This crate provides the invocation and response types and the error
//! taxonomy shared by the executor core and anything that drives it.

pub mod error;

use bytes::Bytes;
use std::time::{SystemTime, UNIX_EPOCH};

pub use error::ExecError;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Fixed parameters of the executor
pub mod limits {
    /// Name of the file created by `createFile`, relative to the work dir
    pub const CREATED_FILE_NAME: &str = "test-file";

    /// Message returned by `createFile`
    pub const CREATED_FILE_MESSAGE: &str = "successfully created a file";
}

/// One call to the executor: a command name and its ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Create an invocation from a command name and arguments
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of an invocation: a payload or an error description, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(Bytes),
    Error(String),
}

impl Response {
    /// Build a success response
    pub fn success(payload: impl Into<Bytes>) -> Self {
        Response::Success(payload.into())
    }

    /// Build an error response from anything displayable
    pub fn error(message: impl std::fmt::Display) -> Self {
        Response::Error(message.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Payload bytes, if this is a success
    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            Response::Success(p) => Some(p),
            Response::Error(_) => None,
        }
    }

    /// Error text, if this is a failure
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error(m) => Some(m),
        }
    }
}

impl From<Result<Bytes, ExecError>> for Response {
    fn from(result: Result<Bytes, ExecError>) -> Self {
        match result {
            Ok(payload) => Response::Success(payload),
            Err(e) => Response::Error(e.to_string()),
        }
    }
}
