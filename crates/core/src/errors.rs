use std::path::PathBuf;

/// Result type alias for flowenv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for flowenv operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or corrupted key material
    #[error("invalid key format: {message}")]
    KeyFormat { message: String },

    /// Encryption, decryption, or entropy failures
    #[error("crypto error: {message}")]
    Crypto { message: String },

    /// Decryption was attempted without a private key loaded
    #[error("no private key loaded: cannot decrypt")]
    MissingPrivateKey,

    /// A value required to be an encrypted token is not one
    #[error("invalid encrypted string: '{value}'")]
    InvalidToken { value: String },

    /// Malformed command-line input
    #[error("argument error: {message}")]
    Argument { message: String },

    /// Workflow file parsing errors
    #[error("failed to parse workflow '{path}': {message}")]
    WorkflowParse { path: PathBuf, message: String },

    /// A workflow step exited unsuccessfully
    #[error("{}", format_step_error(.step, .code))]
    StepFailed { step: String, code: Option<i32> },
}

fn format_step_error(step: &str, code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("step '{step}' failed with exit code {code}"),
        None => format!("step '{step}' was terminated by a signal"),
    }
}

// Conversion implementations
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a file system error with context
    #[must_use]
    pub fn io(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a key format error
    #[must_use]
    pub fn key_format(message: impl Into<String>) -> Self {
        Error::KeyFormat {
            message: message.into(),
        }
    }

    /// Create a crypto error
    #[must_use]
    pub fn crypto(message: impl Into<String>) -> Self {
        Error::Crypto {
            message: message.into(),
        }
    }

    /// Create an invalid token error
    #[must_use]
    pub fn invalid_token(value: impl Into<String>) -> Self {
        Error::InvalidToken {
            value: value.into(),
        }
    }

    /// Create an argument error
    #[must_use]
    pub fn argument(message: impl Into<String>) -> Self {
        Error::Argument {
            message: message.into(),
        }
    }

    /// Create a workflow parse error
    #[must_use]
    pub fn workflow_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::WorkflowParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a step failure error
    #[must_use]
    pub fn step_failed(step: impl Into<String>, code: Option<i32>) -> Self {
        Error::StepFailed {
            step: step.into(),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mentions_path_and_operation() {
        let err = Error::io(
            "/tmp/missing.pem",
            "read",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("read"));
        assert!(rendered.contains("/tmp/missing.pem"));
    }

    #[test]
    fn invalid_token_error_uses_the_documented_phrase() {
        let err = Error::invalid_token("plain value");
        assert!(err.to_string().starts_with("invalid encrypted string"));
    }

    #[test]
    fn step_failure_includes_exit_code_when_present() {
        assert_eq!(
            Error::step_failed("build", Some(2)).to_string(),
            "step 'build' failed with exit code 2"
        );
        assert_eq!(
            Error::step_failed("build", None).to_string(),
            "step 'build' was terminated by a signal"
        );
    }

    #[test]
    fn io_error_from_std_defaults_to_unknown_operation() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(err.to_string().contains("unknown"));
    }
}
