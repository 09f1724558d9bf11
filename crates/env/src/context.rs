use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

use flowenv_core::errors::{Error, Result};
use flowenv_crypto::{cipher, PrivateKey};

// Anchored on the whole (trimmed) value: nothing before, nothing after, no
// whitespace inside the payload.
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ENC\(([A-Za-z0-9+/]+={0,2})\)$").unwrap());

/// Read-only secret resolution context used during workflow evaluation.
///
/// Holds at most one private key, loaded at construction. All operations
/// take `&self` and the context carries no interior mutability, so a single
/// instance can be shared freely across threads.
#[derive(Debug, Default)]
pub struct SecureContext {
    private_key: Option<PrivateKey>,
}

impl SecureContext {
    /// Context without a private key: values can still be classified with
    /// [`is_encrypted`](Self::is_encrypted), but decryption always fails.
    #[must_use]
    pub fn new() -> Self {
        Self { private_key: None }
    }

    #[must_use]
    pub fn with_private_key(key: PrivateKey) -> Self {
        Self {
            private_key: Some(key),
        }
    }

    /// Load the private key from an armored key file.
    pub fn with_key_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, "read", e))?;
        let key = PrivateKey::from_pem(&text)?;
        debug!(path = %path.display(), "loaded private key");
        Ok(Self::with_private_key(key))
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Whether a value is an encrypted token. Total: anything that does not
    /// match the grammar exactly is simply not encrypted.
    #[must_use]
    pub fn is_encrypted(&self, value: &str) -> bool {
        TOKEN_PATTERN.is_match(value.trim())
    }

    /// Decrypt a value if it is an encrypted token, otherwise return it
    /// unchanged. Plain values are the common case during workflow
    /// evaluation and are not errors.
    pub fn resolve(&self, value: &str) -> Result<String> {
        let Some(payload) = token_payload(value.trim()) else {
            return Ok(value.to_string());
        };
        let plaintext = self.open_payload(payload)?;
        match std::str::from_utf8(&plaintext) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(Error::crypto("decrypted payload is not valid UTF-8")),
        }
    }

    /// Decrypt a value that must already be an encrypted token. Unlike
    /// [`resolve`](Self::resolve) there is no pass-through: a value that
    /// does not match the token grammar is rejected outright.
    pub fn decrypt_bytes(&self, value: &str) -> Result<Zeroizing<Vec<u8>>> {
        let Some(payload) = token_payload(value.trim()) else {
            return Err(Error::invalid_token(value));
        };
        self.open_payload(payload)
    }

    fn open_payload(&self, payload: &str) -> Result<Zeroizing<Vec<u8>>> {
        let Some(key) = self.private_key.as_ref() else {
            return Err(Error::MissingPrivateKey);
        };
        let blob = STANDARD
            .decode(payload)
            .map_err(|e| Error::crypto(format!("invalid base64 payload: {e}")))?;
        cipher::open(key, &blob)
    }
}

fn token_payload(trimmed: &str) -> Option<&str> {
    TOKEN_PATTERN
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
