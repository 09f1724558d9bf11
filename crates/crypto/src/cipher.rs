//! Asymmetric sealing built from X25519 key agreement, HKDF-SHA256, and
//! ChaCha20-Poly1305.
//!
//! Each [`seal`] call generates a fresh ephemeral key pair and carries the
//! ephemeral public key inside the blob, so the recipient can re-derive the
//! symmetric key from their private scalar alone:
//!
//! ```text
//! ephemeral public (32) || nonce (12) || ciphertext + tag (len + 16)
//! ```

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use hkdf::Hkdf;
use sha2::Sha256;
use x25519_dalek::{PublicKey as DhPublicKey, StaticSecret};
use zeroize::Zeroizing;

use flowenv_core::errors::{Error, Result};

use crate::keys::{PrivateKey, PublicKey, KEY_SIZE};

/// Size in bytes of the derived symmetric key.
pub const SYMMETRIC_KEY_SIZE: usize = 32;
/// Size in bytes of the AEAD nonce carried in each blob.
pub const NONCE_SIZE: usize = 12;
/// Size in bytes of the ephemeral public key prefix.
pub const EPHEMERAL_PUBLIC_SIZE: usize = KEY_SIZE;
/// Size in bytes of the Poly1305 authentication tag.
pub const TAG_SIZE: usize = 16;
/// Smallest well-formed blob: the header plus the tag of an empty payload.
pub const MIN_SEALED_SIZE: usize = EPHEMERAL_PUBLIC_SIZE + NONCE_SIZE + TAG_SIZE;

/// Domain separation label for the key derivation step.
const KDF_INFO: &[u8] = b"flowenv-seal-v1";

/// Encrypt `plaintext` so that only the holder of the private half of
/// `recipient` can read it. Every call produces a different blob for the
/// same input.
pub fn seal(recipient: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut seed = Zeroizing::new([0u8; KEY_SIZE]);
    getrandom::getrandom(seed.as_mut())
        .map_err(|e| Error::crypto(format!("entropy source failure: {e}")))?;
    let ephemeral = StaticSecret::from(*seed);
    let ephemeral_public = DhPublicKey::from(&ephemeral);

    let shared = ephemeral.diffie_hellman(&DhPublicKey::from(*recipient.as_bytes()));
    if !shared.was_contributory() {
        return Err(Error::crypto("non-contributory key agreement"));
    }
    let key = derive_key(
        shared.as_bytes(),
        ephemeral_public.as_bytes(),
        recipient.as_bytes(),
    )?;

    let mut nonce = [0u8; NONCE_SIZE];
    getrandom::getrandom(&mut nonce)
        .map_err(|e| Error::crypto(format!("entropy source failure: {e}")))?;

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_ref())
        .map_err(|_| Error::crypto("invalid symmetric key length"))?;
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| Error::crypto("encryption failed"))?;

    let mut blob = Vec::with_capacity(EPHEMERAL_PUBLIC_SIZE + NONCE_SIZE + sealed.len());
    blob.extend_from_slice(ephemeral_public.as_bytes());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&sealed);
    Ok(blob)
}

/// Decrypt a blob produced by [`seal`] for the public half of `private`.
/// Fails if the blob is structurally malformed, was tampered with, or was
/// sealed for a different key.
pub fn open(private: &PrivateKey, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if blob.len() < MIN_SEALED_SIZE {
        return Err(Error::crypto(format!(
            "sealed payload too short: expected at least {MIN_SEALED_SIZE} bytes, got {}",
            blob.len()
        )));
    }
    let (header, sealed) = blob.split_at(EPHEMERAL_PUBLIC_SIZE + NONCE_SIZE);
    let (ephemeral_bytes, nonce) = header.split_at(EPHEMERAL_PUBLIC_SIZE);

    let mut ephemeral = [0u8; KEY_SIZE];
    ephemeral.copy_from_slice(ephemeral_bytes);
    let ephemeral_public = DhPublicKey::from(ephemeral);

    let secret = StaticSecret::from(*private.expose_bytes());
    let shared = secret.diffie_hellman(&ephemeral_public);
    if !shared.was_contributory() {
        return Err(Error::crypto("non-contributory key agreement"));
    }
    let recipient = private.public_key();
    let key = derive_key(
        shared.as_bytes(),
        ephemeral_public.as_bytes(),
        recipient.as_bytes(),
    )?;

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_ref())
        .map_err(|_| Error::crypto("invalid symmetric key length"))?;
    let plaintext = cipher.decrypt(Nonce::from_slice(nonce), sealed).map_err(|_| {
        Error::crypto("decryption failed: payload is corrupt or was sealed for a different key")
    })?;
    Ok(Zeroizing::new(plaintext))
}

/// Expand the raw agreement output into the symmetric key, bound to both
/// public keys involved.
fn derive_key(
    shared: &[u8],
    ephemeral: &[u8],
    recipient: &[u8],
) -> Result<Zeroizing<[u8; SYMMETRIC_KEY_SIZE]>> {
    let mut salt = Vec::with_capacity(ephemeral.len() + recipient.len());
    salt.extend_from_slice(ephemeral);
    salt.extend_from_slice(recipient);

    let hk = Hkdf::<Sha256>::new(Some(&salt), shared);
    let mut okm = Zeroizing::new([0u8; SYMMETRIC_KEY_SIZE]);
    hk.expand(KDF_INFO, okm.as_mut())
        .map_err(|_| Error::crypto("key derivation failed"))?;
    Ok(okm)
}
