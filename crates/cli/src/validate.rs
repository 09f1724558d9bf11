//! Precondition checks for command arguments.
//!
//! Commands validate their inputs up front and return typed errors, so a
//! bad invocation fails before any key material is read or any step runs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use flowenv_core::{Error, Result};

// Keys are env-style identifiers; everything after the first '=' is free-form.
static ARG_TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+(=.*)?$").unwrap());

/// The path must exist and be a regular file.
pub fn require_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::io(
            path,
            "read",
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{what} is not an existing file"),
            ),
        ))
    }
}

/// The path must exist and be a directory.
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::io(
            path,
            "write",
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "output directory does not exist",
            ),
        ))
    }
}

/// Every `--arg` token must look like `KEY` or `KEY=VALUE`.
pub fn require_arg_tokens(tokens: &[String]) -> Result<()> {
    for token in tokens {
        if !ARG_TOKEN_PATTERN.is_match(token) {
            return Err(Error::argument(format!(
                "malformed argument '{token}': expected KEY=VALUE with an alphanumeric or underscore key"
            )));
        }
    }
    Ok(())
}
