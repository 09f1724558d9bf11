use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use flowenv_core::constants::{
    ENCRYPTED_FILE_SUFFIX, ENCRYPTED_TOKEN_PREFIX, ENCRYPTED_TOKEN_SUFFIX,
};
use flowenv_core::errors::{Error, Result};

use crate::cipher;
use crate::keys::PublicKey;

/// Encrypts ad-hoc strings and files against one public key.
///
/// String mode emits an `ENC(...)` token ready to embed in a configuration
/// value; file mode writes raw ciphertext to a sibling file. The asymmetry is
/// deliberate: files are encrypted at rest as opaque bytes, strings are
/// destined for YAML values.
#[derive(Debug)]
pub struct SecretEncryptor {
    public: PublicKey,
}

/// What a [`SecretEncryptor::encrypt`] call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptOutcome {
    /// A token ready to embed in a configuration value.
    Token(String),
    /// Path of the ciphertext written next to the input file.
    FileWritten(PathBuf),
}

impl SecretEncryptor {
    #[must_use]
    pub fn new(public: PublicKey) -> Self {
        Self { public }
    }

    /// Load the recipient public key from an armored key file.
    pub fn from_public_key_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, "read", e))?;
        let public = PublicKey::from_pem(&text)?;
        Ok(Self::new(public))
    }

    /// Dispatch on the two mutually exclusive input modes.
    pub fn encrypt(&self, file: Option<&Path>, literal: Option<&str>) -> Result<EncryptOutcome> {
        match (file, literal) {
            (Some(_), Some(_)) => Err(Error::argument(
                "provide a file or a literal string to encrypt, not both",
            )),
            (None, None) => Err(Error::argument(
                "nothing to encrypt: provide a file or a literal string",
            )),
            (Some(path), None) => Ok(EncryptOutcome::FileWritten(self.encrypt_file(path)?)),
            (None, Some(value)) => Ok(EncryptOutcome::Token(self.encrypt_str(value)?)),
        }
    }

    /// Encrypt a literal string into an embeddable token. Surrounding
    /// whitespace is trimmed before encryption.
    pub fn encrypt_str(&self, value: &str) -> Result<String> {
        let sealed = cipher::seal(&self.public, value.trim().as_bytes())?;
        Ok(format!(
            "{ENCRYPTED_TOKEN_PREFIX}{}{ENCRYPTED_TOKEN_SUFFIX}",
            STANDARD.encode(sealed)
        ))
    }

    /// Encrypt a file's contents and write the raw ciphertext to the sibling
    /// output path. Returns the path written.
    pub fn encrypt_file(&self, path: &Path) -> Result<PathBuf> {
        let plaintext = fs::read(path).map_err(|e| Error::io(path, "read", e))?;
        let sealed = cipher::seal(&self.public, &plaintext)?;
        let output = encrypted_output_path(path);
        fs::write(&output, sealed).map_err(|e| Error::io(&output, "write", e))?;
        debug!(input = %path.display(), output = %output.display(), "encrypted file");
        Ok(output)
    }
}

/// Sibling path for file-mode ciphertext: the suffix lands before the final
/// extension component (`archive.tar.gz` becomes `archive.tar-encrypted.gz`).
#[must_use]
pub fn encrypted_output_path(input: &Path) -> PathBuf {
    match (input.file_stem(), input.extension()) {
        (Some(stem), Some(ext)) => {
            let mut name = stem.to_os_string();
            name.push(ENCRYPTED_FILE_SUFFIX);
            name.push(".");
            name.push(ext);
            input.with_file_name(name)
        }
        (Some(stem), None) => {
            let mut name = stem.to_os_string();
            name.push(ENCRYPTED_FILE_SUFFIX);
            input.with_file_name(name)
        }
        (None, _) => {
            let mut name = input.as_os_str().to_os_string();
            name.push(ENCRYPTED_FILE_SUFFIX);
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyPair;
    use tempfile::TempDir;

    #[test]
    fn output_path_lands_before_the_final_extension() {
        assert_eq!(
            encrypted_output_path(Path::new("report.txt")),
            PathBuf::from("report-encrypted.txt")
        );
        assert_eq!(
            encrypted_output_path(Path::new("archive.tar.gz")),
            PathBuf::from("archive.tar-encrypted.gz")
        );
        assert_eq!(
            encrypted_output_path(Path::new("noext")),
            PathBuf::from("noext-encrypted")
        );
        assert_eq!(
            encrypted_output_path(Path::new("data/report.txt")),
            PathBuf::from("data/report-encrypted.txt")
        );
    }

    #[test]
    fn string_mode_trims_before_sealing() {
        let pair = KeyPair::generate().unwrap();
        let encryptor = SecretEncryptor::new(*pair.public_key());

        let token = encryptor.encrypt_str("  spaced out \n").unwrap();
        let payload = token
            .strip_prefix(ENCRYPTED_TOKEN_PREFIX)
            .and_then(|t| t.strip_suffix(ENCRYPTED_TOKEN_SUFFIX))
            .unwrap();
        let blob = STANDARD.decode(payload).unwrap();
        let plaintext = cipher::open(pair.private_key(), &blob).unwrap();
        assert_eq!(plaintext.as_slice(), b"spaced out");
    }

    #[test]
    fn file_mode_writes_raw_ciphertext_to_the_sibling_path() {
        let pair = KeyPair::generate().unwrap();
        let encryptor = SecretEncryptor::new(*pair.public_key());

        let dir = TempDir::new().unwrap();
        let input = dir.path().join("config.json");
        fs::write(&input, br#"{"token":"hunter2"}"#).unwrap();

        let output = encryptor.encrypt_file(&input).unwrap();
        assert_eq!(output, dir.path().join("config-encrypted.json"));

        let blob = fs::read(&output).unwrap();
        assert!(!blob.starts_with(ENCRYPTED_TOKEN_PREFIX.as_bytes()));
        let plaintext = cipher::open(pair.private_key(), &blob).unwrap();
        assert_eq!(plaintext.as_slice(), br#"{"token":"hunter2"}"#);
    }

    #[test]
    fn dispatcher_rejects_missing_and_conflicting_inputs() {
        let pair = KeyPair::generate().unwrap();
        let encryptor = SecretEncryptor::new(*pair.public_key());

        let neither = encryptor.encrypt(None, None).unwrap_err();
        assert!(matches!(neither, Error::Argument { .. }));

        let both = encryptor
            .encrypt(Some(Path::new("x")), Some("y"))
            .unwrap_err();
        assert!(matches!(both, Error::Argument { .. }));
    }

    #[test]
    fn dispatcher_routes_literals_to_tokens() {
        let pair = KeyPair::generate().unwrap();
        let encryptor = SecretEncryptor::new(*pair.public_key());

        match encryptor.encrypt(None, Some("secret")).unwrap() {
            EncryptOutcome::Token(token) => {
                assert!(token.starts_with(ENCRYPTED_TOKEN_PREFIX));
                assert!(token.ends_with(ENCRYPTED_TOKEN_SUFFIX));
            }
            other => panic!("expected a token, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_input_file_is_an_io_error() {
        let pair = KeyPair::generate().unwrap();
        let encryptor = SecretEncryptor::new(*pair.public_key());

        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.txt");
        let err = encryptor.encrypt_file(&missing).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));

        let err = encryptor.encrypt_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn loading_a_malformed_public_key_file_fails() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.pem");
        fs::write(&bogus, "definitely not a key").unwrap();
        let err = SecretEncryptor::from_public_key_file(&bogus).unwrap_err();
        assert!(matches!(err, Error::KeyFormat { .. }));

        let missing = dir.path().join("missing.pem");
        let err = SecretEncryptor::from_public_key_file(&missing).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn debug_output_truncates_the_recipient_key() {
        let pair = KeyPair::generate().unwrap();
        let encryptor = SecretEncryptor::new(*pair.public_key());

        let rendered = format!("{encryptor:?}");
        let full = pair.public_key().to_base64();
        assert!(rendered.contains(&full[..8]));
        assert!(!rendered.contains(&full));
    }
}
