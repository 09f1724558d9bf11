//! Secret resolution and argument ingestion for `flowenv`.
//!
//! This crate handles recognition and decryption of encrypted values inside
//! workflow configuration, and the `key=value` overlay supplied on the
//! command line.

pub mod context;
pub mod overlay;

pub use context::SecureContext;
pub use overlay::ArgEnv;
