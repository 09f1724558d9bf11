use std::path::Path;

use flowenv_core::Result;
use flowenv_crypto::{EncryptOutcome, SecretEncryptor};

use crate::validate;

pub fn execute(public: &Path, file: Option<&Path>, literal: Option<&str>) -> Result<()> {
    validate::require_file(public, "public key")?;
    if let Some(path) = file {
        validate::require_file(path, "input file")?;
    }

    let encryptor = SecretEncryptor::from_public_key_file(public)?;
    match encryptor.encrypt(file, literal)? {
        EncryptOutcome::Token(token) => println!("{token}"),
        EncryptOutcome::FileWritten(path) => println!("{}", path.display()),
    }
    Ok(())
}
