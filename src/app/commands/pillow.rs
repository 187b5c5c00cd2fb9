use serde_yaml::Mapping;

use crate::app::DeployContext;
use crate::domain::configuration::paths;
use crate::domain::{AppError, load_pillow_config};

/// Pillow overlay for `environment`, if the project has one.
pub fn show(ctx: &DeployContext, environment: &str) -> Result<Option<Mapping>, AppError> {
    load_pillow_config(ctx.root(), environment)
}

/// Pillow overlay for `environment`; an absent file is `ConfigurationMissing`.
pub fn require(ctx: &DeployContext, environment: &str) -> Result<Mapping, AppError> {
    show(ctx, environment)?.ok_or_else(|| {
        AppError::ConfigurationMissing(
            paths::pillow_config(ctx.root(), environment).display().to_string(),
        )
    })
}

/// Render a pillow mapping for the terminal.
pub fn render(mapping: &Mapping) -> Result<String, AppError> {
    Ok(serde_yaml::to_string(mapping)?)
}
