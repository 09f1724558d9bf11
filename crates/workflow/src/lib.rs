//! Workflow definitions and step execution for `flowenv`.
//!
//! A workflow is an ordered list of shell steps with layered environment
//! maps. The engine resolves encrypted values through
//! [`flowenv_env::SecureContext`] at execution time, so secrets live
//! encrypted in the YAML file and in version control.

pub mod definition;
pub mod engine;

pub use definition::{Step, Workflow};
pub use engine::execute;
