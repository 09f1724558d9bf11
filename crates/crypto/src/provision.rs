use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use flowenv_core::constants::{PRIVATE_KEY_SUFFIX, PUBLIC_KEY_SUFFIX};
use flowenv_core::errors::{Error, Result};

use crate::keys::KeyPair;

/// Result of provisioning a key pair to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedKeyPair {
    pub private_path: PathBuf,
    pub public_path: PathBuf,
    pub fingerprint: String,
}

/// Generate a fresh key pair and write `{name}-private.pem` and
/// `{name}-public.pem` under `dir`. Existing files with the same names are
/// overwritten; callers wanting protection must check beforehand.
pub fn provision_key_pair(name: &str, dir: &Path) -> Result<ProvisionedKeyPair> {
    if !dir.is_dir() {
        return Err(Error::io(
            dir,
            "write",
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "output directory does not exist",
            ),
        ));
    }

    let pair = KeyPair::generate()?;
    let private_path = dir.join(format!("{name}{PRIVATE_KEY_SUFFIX}"));
    let public_path = dir.join(format!("{name}{PUBLIC_KEY_SUFFIX}"));

    write_private_key(&private_path, &pair.private_key().to_pem())?;
    debug!(path = %private_path.display(), "wrote private key");
    fs::write(&public_path, pair.public_key().to_pem())
        .map_err(|e| Error::io(&public_path, "write", e))?;
    debug!(path = %public_path.display(), "wrote public key");

    Ok(ProvisionedKeyPair {
        private_path,
        public_path,
        fingerprint: pair.public_key().fingerprint(),
    })
}

// The private key file must not be readable by other users.
#[cfg(unix)]
fn write_private_key(path: &Path, pem: &str) -> Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map_err(|e| Error::io(path, "open", e))?;
    file.write_all(pem.as_bytes())
        .map_err(|e| Error::io(path, "write", e))
}

#[cfg(not(unix))]
fn write_private_key(path: &Path, pem: &str) -> Result<()> {
    fs::write(path, pem).map_err(|e| Error::io(path, "write", e))
}
