use tokio::process::Command;
use tracing::{error, info};

use flowenv_core::constants::DEFAULT_SHELL;
use flowenv_core::errors::{Error, Result};
use flowenv_core::types::EnvironmentVariables;
use flowenv_env::{ArgEnv, SecureContext};

use crate::definition::{Step, Workflow};

/// Execute the steps of `workflow` in order, aborting on the first failure.
///
/// The environment seen by each step is composed from least to most
/// specific: the ambient process environment, the command-line overlay, the
/// workflow-level env map, then the step's own env map. Every value supplied
/// for the run passes through the secret resolution context, so encrypted
/// tokens decrypt transparently while plain values flow through untouched.
/// The inherited ambient environment is not resolved.
pub async fn execute(workflow: &Workflow, ctx: &SecureContext, overlay: &ArgEnv) -> Result<()> {
    let display_name = workflow.name.as_deref().unwrap_or("workflow");
    info!(workflow = %display_name, steps = workflow.steps.len(), "starting workflow");

    let mut base = EnvironmentVariables::from_process();
    for (key, value) in overlay.iter() {
        base.insert(key, ctx.resolve(value)?);
    }
    for (key, value) in &workflow.env {
        base.insert(key.clone(), ctx.resolve(value)?);
    }

    for step in &workflow.steps {
        run_step(step, ctx, &base).await?;
    }

    info!(workflow = %display_name, "workflow finished");
    Ok(())
}

async fn run_step(step: &Step, ctx: &SecureContext, base: &EnvironmentVariables) -> Result<()> {
    let mut env = base.clone();
    for (key, value) in &step.env {
        env.insert(key.clone(), ctx.resolve(value)?);
    }

    info!(step = %step.name, "running step");
    let status = Command::new(DEFAULT_SHELL)
        .arg("-c")
        .arg(&step.run)
        .env_clear()
        .envs(env.iter())
        .status()
        .await
        .map_err(|e| Error::io(DEFAULT_SHELL, "spawn", e))?;

    if status.success() {
        info!(step = %step.name, "step finished");
        Ok(())
    } else {
        error!(step = %step.name, code = ?status.code(), "step failed");
        Err(Error::step_failed(&step.name, status.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowenv_crypto::{KeyPair, SecretEncryptor};
    use indexmap::IndexMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn step(name: &str, run: String) -> Step {
        Step {
            name: name.to_string(),
            run,
            env: IndexMap::new(),
        }
    }

    fn write_var_to(var: &str, path: &Path) -> String {
        format!("printf '%s' \"${var}\" > '{}'", path.display())
    }

    #[tokio::test]
    async fn step_sees_resolved_secret_values() {
        let pair = KeyPair::generate().unwrap();
        let ctx = SecureContext::with_private_key(pair.private_key().clone());
        let token = SecretEncryptor::new(*pair.public_key())
            .encrypt_str("wf-secret")
            .unwrap();

        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let workflow = Workflow {
            name: Some("secrets".to_string()),
            env: IndexMap::from([("SECRET".to_string(), token)]),
            steps: vec![step("emit", write_var_to("SECRET", &out))],
        };

        execute(&workflow, &ctx, &ArgEnv::new()).await.unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "wf-secret");
    }

    #[tokio::test]
    async fn overlay_values_reach_steps_and_resolve() {
        let pair = KeyPair::generate().unwrap();
        let ctx = SecureContext::with_private_key(pair.private_key().clone());
        let token = SecretEncryptor::new(*pair.public_key())
            .encrypt_str("from-args")
            .unwrap();

        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let overlay = ArgEnv::from_tokens([format!("ARG_SECRET={token}")]);
        let workflow = Workflow {
            name: None,
            env: IndexMap::new(),
            steps: vec![step("emit", write_var_to("ARG_SECRET", &out))],
        };

        execute(&workflow, &ctx, &overlay).await.unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "from-args");
    }

    #[tokio::test]
    async fn more_specific_layers_win() {
        let ctx = SecureContext::new();
        let overlay = ArgEnv::from_tokens(["LAYER=overlay"]);

        let dir = TempDir::new().unwrap();
        let from_workflow = dir.path().join("workflow.txt");
        let from_step = dir.path().join("step.txt");

        let mut shadowing = step("shadow", write_var_to("LAYER", &from_step));
        shadowing.env.insert("LAYER".to_string(), "step".to_string());

        let workflow = Workflow {
            name: None,
            env: IndexMap::from([("LAYER".to_string(), "workflow".to_string())]),
            steps: vec![
                step("plain", write_var_to("LAYER", &from_workflow)),
                shadowing,
            ],
        };

        execute(&workflow, &ctx, &overlay).await.unwrap();
        assert_eq!(fs::read_to_string(&from_workflow).unwrap(), "workflow");
        assert_eq!(fs::read_to_string(&from_step).unwrap(), "step");
    }

    #[tokio::test]
    async fn first_failing_step_aborts_the_run() {
        let ctx = SecureContext::new();
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("marker.txt");

        let workflow = Workflow {
            name: None,
            env: IndexMap::new(),
            steps: vec![
                step("boom", "exit 3".to_string()),
                step("never", format!("touch '{}'", marker.display())),
            ],
        };

        let err = execute(&workflow, &ctx, &ArgEnv::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::StepFailed {
                code: Some(3),
                ..
            }
        ));
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn unresolvable_value_fails_before_any_step_runs() {
        let keyless = SecureContext::new();
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("marker.txt");

        let workflow = Workflow {
            name: None,
            env: IndexMap::from([("SECRET".to_string(), "ENC(eA==)".to_string())]),
            steps: vec![step("never", format!("touch '{}'", marker.display()))],
        };

        let err = execute(&workflow, &keyless, &ArgEnv::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingPrivateKey));
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn empty_step_list_is_a_successful_run() {
        let workflow = Workflow {
            name: Some("noop".to_string()),
            env: IndexMap::new(),
            steps: Vec::new(),
        };
        execute(&workflow, &SecureContext::new(), &ArgEnv::new())
            .await
            .unwrap();
    }
}
