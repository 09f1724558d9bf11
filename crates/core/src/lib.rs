//! Core domain types, errors, and constants for the `flowenv` application.
//!
//! This crate establishes the foundational data structures and error handling
//! mechanisms used throughout the entire codebase. It aims to provide clear,
//! type-safe, and consistent building blocks.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`types`**: Contains domain-specific newtype wrappers like
//!   `EnvironmentVariables` to enforce invariants at the type level.
//! - **`constants`**: A collection of shared, static constants such as the
//!   encrypted token framing and key file naming conventions.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
