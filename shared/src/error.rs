//! Error taxonomy for command execution

use thiserror::Error;

/// Errors a handler or the dispatcher can return to the caller
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("wrong invoke method: {0}")]
    UnknownCommand(String),

    #[error("wrong arguments for {command}: expected {expected}, got {got}")]
    Arity {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("key not found: {0}")]
    NotFound(String),

    #[error("key was not updated: {0}")]
    StoreWrite(String),

    #[error("could not retrieve key {key} - error {reason}")]
    StoreRead { key: String, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error retrieving URL: {url} - {reason}")]
    Http { url: String, reason: String },

    #[error("error reading body: {0}")]
    Body(String),
}

impl ExecError {
    /// True for failures raised before any handler ran
    pub fn is_validation(&self) -> bool {
        matches!(self, ExecError::UnknownCommand(_) | ExecError::Arity { .. })
    }

    /// Wrap an I/O error with a description of what was being done
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ExecError::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_message() {
        let err = ExecError::Arity {
            command: "getValue".into(),
            expected: 1,
            got: 0,
        };
        assert_eq!(err.to_string(), "wrong arguments for getValue: expected 1, got 0");
        assert!(err.is_validation());
    }

    #[test]
    fn test_io_wraps_cause() {
        let err = ExecError::io(
            "error creating file",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "error creating file: denied");
        assert!(!err.is_validation());
    }
}
