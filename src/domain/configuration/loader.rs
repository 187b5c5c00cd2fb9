//! Deploy and pillow configuration loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::Mapping;

use super::deploy_config::{DeployConfig, parse_config_content};
use super::paths;
use crate::domain::AppError;

/// Load `<root>/deploy.toml`, falling back to defaults when it is absent.
pub fn load_deploy_config(root: &Path) -> Result<DeployConfig, AppError> {
    let path = paths::deploy_config(root);
    match fs::read_to_string(&path) {
        Ok(content) => parse_config_content(&path.display().to_string(), &content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(DeployConfig::default()),
        Err(err) => Err(err.into()),
    }
}

/// Load the pillow overlay for `environment`.
///
/// Returns `Ok(None)` when `<root>/pillows/<environment>.yml` does not exist;
/// callers treat that as "no extra pillow config". An empty file yields an
/// empty mapping. Any parse failure, or a document whose top level is not a
/// mapping, is `ConfigurationInvalid`.
pub fn load_pillow_config(root: &Path, environment: &str) -> Result<Option<Mapping>, AppError> {
    let path = paths::pillow_config(root, environment);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    parse_pillow_content(&path.display().to_string(), &content).map(Some)
}

fn parse_pillow_content(path: &str, content: &str) -> Result<Mapping, AppError> {
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| AppError::invalid_config(path, e))?;
    match value {
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        serde_yaml::Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::invalid_config(path, "top-level value must be a mapping")),
    }
}
