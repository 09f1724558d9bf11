use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use flowenv_core::errors::{Error, Result};

/// A workflow pipeline parsed from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub name: Option<String>,
    /// Variables shared by every step. Values may be encrypted tokens.
    #[serde(default)]
    pub env: IndexMap<String, String>,
    pub steps: Vec<Step>,
}

/// One step of a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    /// Shell command line, executed with `sh -c`.
    pub run: String,
    /// Step-specific variables, layered over the workflow-level ones.
    #[serde(default)]
    pub env: IndexMap<String, String>,
}

impl Workflow {
    /// Load and parse a workflow file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, "read", e))?;
        serde_yaml::from_str(&text).map_err(|e| Error::workflow_parse(path, e.to_string()))
    }
}
