use std::path::Path;
use tracing::info;

use flowenv_core::Result;
use flowenv_crypto::provision_key_pair;

use crate::validate;

pub fn execute(name: &str, dir: &Path) -> Result<()> {
    validate::require_dir(dir)?;

    let provisioned = provision_key_pair(name, dir)?;
    info!(fingerprint = %provisioned.fingerprint, "generated key pair");

    println!("private key: {}", provisioned.private_path.display());
    println!("public key:  {}", provisioned.public_path.display());
    println!("fingerprint: {}", provisioned.fingerprint);
    Ok(())
}
