//! Operator access to saved deploy checkpoints.

use serde_json::{Map, Value};

use crate::app::DeployContext;
use crate::domain::AppError;

/// What a resumed deploy would start from.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDeploy {
    pub command_index: Value,
    pub environment: Value,
}

/// Interpret a CLI value as JSON, or as a plain string when it is not JSON.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Save a command index together with an environment snapshot built from
/// `settings`. The snapshot always carries the environment name.
pub fn save(
    ctx: &DeployContext,
    environment: &str,
    command_index: &str,
    settings: &[(String, String)],
) -> Result<SavedDeploy, AppError> {
    let mut snapshot = Map::new();
    snapshot.insert("environment".to_string(), Value::String(environment.to_string()));
    for (key, value) in settings {
        snapshot.insert(key.clone(), parse_value(value));
    }

    let saved = SavedDeploy {
        command_index: parse_value(command_index),
        environment: Value::Object(snapshot),
    };
    ctx.checkpoints().save_deploy_state(environment, &saved.command_index, &saved.environment)?;
    Ok(saved)
}

pub fn show(ctx: &DeployContext, environment: &str) -> Result<SavedDeploy, AppError> {
    let store = ctx.checkpoints();
    Ok(SavedDeploy {
        command_index: store.load_checkpoint(environment)?,
        environment: store.load_environment_snapshot(environment)?,
    })
}

pub fn clear(ctx: &DeployContext, environment: &str) -> Result<(), AppError> {
    ctx.checkpoints().clear(environment)
}
