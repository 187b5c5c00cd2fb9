//! Resumable deploy state kept in `<root>/<environment>_<suffix>` files.
//!
//! Each file is a JSON envelope:
//! `{"format": 1, "environment": "...", "saved_at": "...", "value": ...}`.
//! There is no locking; two processes deploying the same environment race.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::configuration::paths;
use crate::domain::{AppError, DeploySettings};

const FORMAT_VERSION: u32 = 1;
const CHECKPOINT: &str = "checkpoint";
const ENVIRONMENT: &str = "environment";

#[derive(Serialize)]
struct EnvelopeRef<'a, T: ?Sized> {
    format: u32,
    environment: &'a str,
    saved_at: String,
    value: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    format: u32,
    environment: String,
    #[allow(dead_code)]
    saved_at: String,
    value: serde_json::Value,
}

/// Filesystem-backed checkpoint store rooted at the project directory.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    root: PathBuf,
    checkpoint_suffix: String,
    environment_suffix: String,
}

impl CheckpointStore {
    pub fn new(root: PathBuf, settings: &DeploySettings) -> Self {
        Self {
            root,
            checkpoint_suffix: settings.checkpoint_suffix.clone(),
            environment_suffix: settings.environment_suffix.clone(),
        }
    }

    pub fn checkpoint_path(&self, environment: &str) -> PathBuf {
        paths::checkpoint_file(&self.root, environment, &self.checkpoint_suffix)
    }

    pub fn environment_path(&self, environment: &str) -> PathBuf {
        paths::checkpoint_file(&self.root, environment, &self.environment_suffix)
    }

    /// Overwrite the command-index checkpoint for `environment`.
    pub fn save_checkpoint<T: Serialize + ?Sized>(
        &self,
        environment: &str,
        command_index: &T,
    ) -> Result<(), AppError> {
        write_envelope(&self.checkpoint_path(environment), environment, command_index)
    }

    /// Overwrite the environment snapshot for `environment`.
    pub fn save_environment_snapshot<T: Serialize + ?Sized>(
        &self,
        environment: &str,
        state: &T,
    ) -> Result<(), AppError> {
        write_envelope(&self.environment_path(environment), environment, state)
    }

    /// Save both halves of the deploy state.
    pub fn save_deploy_state<I, S>(
        &self,
        environment: &str,
        command_index: &I,
        state: &S,
    ) -> Result<(), AppError>
    where
        I: Serialize + ?Sized,
        S: Serialize + ?Sized,
    {
        self.save_checkpoint(environment, command_index)?;
        self.save_environment_snapshot(environment, state)
    }

    pub fn load_checkpoint<T: DeserializeOwned>(&self, environment: &str) -> Result<T, AppError> {
        read_envelope(&self.checkpoint_path(environment), environment, CHECKPOINT)
    }

    pub fn load_environment_snapshot<T: DeserializeOwned>(
        &self,
        environment: &str,
    ) -> Result<T, AppError> {
        read_envelope(&self.environment_path(environment), environment, ENVIRONMENT)
    }

    /// Whether a command-index checkpoint exists for `environment`.
    pub fn has_checkpoint(&self, environment: &str) -> bool {
        self.checkpoint_path(environment).is_file()
    }

    /// Remove both files. Files that are already gone are ignored.
    pub fn clear(&self, environment: &str) -> Result<(), AppError> {
        for path in [self.checkpoint_path(environment), self.environment_path(environment)] {
            match fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed deploy checkpoint"),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

fn write_envelope<T: Serialize + ?Sized>(
    path: &Path,
    environment: &str,
    value: &T,
) -> Result<(), AppError> {
    let envelope = EnvelopeRef {
        format: FORMAT_VERSION,
        environment,
        saved_at: Utc::now().to_rfc3339(),
        value,
    };
    let content = serde_json::to_string_pretty(&envelope)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, content)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    tracing::debug!(path = %path.display(), "saved deploy checkpoint");
    Ok(())
}

fn read_envelope<T: DeserializeOwned>(
    path: &Path,
    environment: &str,
    what: &'static str,
) -> Result<T, AppError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(AppError::CheckpointMissing { environment: environment.to_string(), what });
        }
        Err(err) => return Err(err.into()),
    };

    let corrupt = |details: String| AppError::CheckpointCorrupt {
        environment: environment.to_string(),
        what,
        details,
    };

    let envelope: Envelope = serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
    if envelope.format != FORMAT_VERSION {
        return Err(corrupt(format!("unsupported format version {}", envelope.format)));
    }
    if envelope.environment != environment {
        return Err(corrupt(format!("file belongs to '{}'", envelope.environment)));
    }
    serde_json::from_value(envelope.value).map_err(|e| corrupt(e.to_string()))
}
