//! Key pair management and sealing primitives for `flowenv`.
//!
//! ## Key Components
//!
//! - **`keys`**: X25519 key pair types with armored serialization and
//!   redacted rendering of private material.
//! - **`cipher`**: the `seal`/`open` hybrid encryption primitive.
//! - **`provision`**: one-shot generation of a key pair to disk.
//! - **`encryptor`**: string and file encryption against a public key.

pub mod cipher;
pub mod encryptor;
pub mod keys;
pub mod provision;

pub use self::{
    encryptor::{EncryptOutcome, SecretEncryptor},
    keys::{KeyPair, PrivateKey, PublicKey},
    provision::{provision_key_pair, ProvisionedKeyPair},
};
