use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use std::fmt;
use x25519_dalek::StaticSecret;
use zeroize::{Zeroize, Zeroizing};

use flowenv_core::constants::{PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL};
use flowenv_core::errors::{Error, Result};

/// Length in bytes of a raw scalar or curve point.
pub const KEY_SIZE: usize = 32;

/// Characters per line in the armored base64 body.
const PEM_LINE_WIDTH: usize = 64;

/// Hex characters of the public key fingerprint.
const FINGERPRINT_LEN: usize = 16;

#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct PrivateKey {
    bytes: [u8; KEY_SIZE],
}

impl PrivateKey {
    /// Generate a fresh private key from the operating system entropy source.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; KEY_SIZE];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| Error::crypto(format!("entropy source failure: {e}")))?;
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn public_key(&self) -> PublicKey {
        let secret = StaticSecret::from(self.bytes);
        let public = x25519_dalek::PublicKey::from(&secret);
        PublicKey {
            bytes: *public.as_bytes(),
        }
    }

    /// Serialize to an armored text block. The body carries the scalar
    /// followed by the derived public point so the private file is
    /// self-contained.
    pub fn to_pem(&self) -> String {
        let mut body = Zeroizing::new(Vec::with_capacity(KEY_SIZE * 2));
        body.extend_from_slice(&self.bytes);
        body.extend_from_slice(self.public_key().as_bytes());
        armor(PRIVATE_KEY_LABEL, &body)
    }

    /// Parse an armored private key. The embedded public point must match
    /// the one derived from the scalar.
    pub fn from_pem(text: &str) -> Result<Self> {
        let body = Zeroizing::new(unarmor(PRIVATE_KEY_LABEL, text)?);
        if body.len() != KEY_SIZE * 2 {
            return Err(Error::key_format(format!(
                "invalid private key length: expected {} bytes, got {}",
                KEY_SIZE * 2,
                body.len()
            )));
        }
        let mut scalar = [0u8; KEY_SIZE];
        scalar.copy_from_slice(&body[..KEY_SIZE]);
        let key = Self { bytes: scalar };
        if key.public_key().as_bytes()[..] != body[KEY_SIZE..] {
            return Err(Error::key_format(
                "embedded public key does not match the private scalar",
            ));
        }
        Ok(key)
    }

    pub fn expose_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; KEY_SIZE],
}

impl PublicKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes)
    }

    pub fn to_pem(&self) -> String {
        armor(PUBLIC_KEY_LABEL, &self.bytes)
    }

    pub fn from_pem(text: &str) -> Result<Self> {
        let body = unarmor(PUBLIC_KEY_LABEL, text)?;
        if body.len() != KEY_SIZE {
            return Err(Error::key_format(format!(
                "invalid public key length: expected {KEY_SIZE} bytes, got {}",
                body.len()
            )));
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&body);
        Ok(Self { bytes })
    }

    /// Short SHA-256 fingerprint, suitable for display next to key paths.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes);
        let mut hex = hex::encode(digest);
        hex.truncate(FINGERPRINT_LEN);
        hex
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b64 = self.to_base64();
        let prefix = if b64.len() >= 8 { &b64[..8] } else { &b64 };
        f.debug_struct("PublicKey")
            .field("prefix", &format!("{prefix}..."))
            .finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

#[derive(Clone)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    pub fn generate() -> Result<Self> {
        let private = PrivateKey::generate()?;
        let public = private.public_key();
        Ok(Self { private, public })
    }

    pub fn from_private_key(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &self.private)
            .field("public", &self.public)
            .finish()
    }
}

fn armor(label: &str, body: &[u8]) -> String {
    let encoded = STANDARD.encode(body);
    let mut pem = String::with_capacity(encoded.len() + label.len() * 2 + 40);
    pem.push_str("-----BEGIN ");
    pem.push_str(label);
    pem.push_str("-----\n");
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(PEM_LINE_WIDTH));
        pem.push_str(line);
        pem.push('\n');
        rest = tail;
    }
    pem.push_str("-----END ");
    pem.push_str(label);
    pem.push_str("-----\n");
    pem
}

fn unarmor(label: &str, text: &str) -> Result<Vec<u8>> {
    let begin = format!("-----BEGIN {label}-----");
    let end = format!("-----END {label}-----");
    let mut body = String::new();
    let mut inside = false;
    let mut complete = false;
    for line in text.lines() {
        let line = line.trim();
        if line == begin {
            inside = true;
        } else if line == end {
            complete = inside;
            break;
        } else if inside {
            body.push_str(line);
        }
    }
    if !complete {
        return Err(Error::key_format(format!("missing '{label}' armor")));
    }
    if body.is_empty() {
        return Err(Error::key_format(format!("empty '{label}' body")));
    }
    STANDARD
        .decode(body.as_bytes())
        .map_err(|e| Error::key_format(format!("invalid base64 in '{label}' body: {e}")))
}
