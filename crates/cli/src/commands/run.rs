use std::path::Path;

use flowenv_core::Result;
use flowenv_env::{ArgEnv, SecureContext};
use flowenv_workflow::Workflow;

use crate::validate;

pub async fn execute(workflow_path: &Path, args: &[String], private: Option<&Path>) -> Result<()> {
    validate::require_file(workflow_path, "workflow file")?;
    validate::require_arg_tokens(args)?;

    let context = match private {
        Some(path) => {
            validate::require_file(path, "private key")?;
            SecureContext::with_key_file(path)?
        }
        None => SecureContext::new(),
    };

    let overlay = ArgEnv::from_tokens(args);
    let workflow = Workflow::from_file(workflow_path)?;
    flowenv_workflow::execute(&workflow, &context, &overlay).await
}
