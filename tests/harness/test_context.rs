//! Shared testing harness for `deployctl` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated project root for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
}

impl TestContext {
    /// Create a new isolated project root.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Path to the project root.
    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `deployctl` binary against this root.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("deployctl").expect("Failed to locate deployctl binary");
        cmd.current_dir(self.root())
            .env("DEPLOYCTL_ROOT", self.root())
            .env_remove("DEPLOYCTL_GITHUB_TOKEN")
            .env("RUST_LOG", "off");
        cmd
    }

    /// Write `deploy.toml`.
    pub(crate) fn write_deploy_config(&self, content: &str) {
        fs::write(self.root().join("deploy.toml"), content).expect("Failed to write deploy.toml");
    }

    /// Write `pillows/<env>.yml`.
    pub(crate) fn write_pillow(&self, env: &str, content: &str) {
        let dir = self.root().join("pillows");
        fs::create_dir_all(&dir).expect("Failed to create pillows directory");
        fs::write(dir.join(format!("{}.yml", env)), content).expect("Failed to write pillow");
    }

    /// Path of a checkpoint file with the default suffix.
    pub(crate) fn checkpoint_path(&self, env: &str) -> PathBuf {
        self.root().join(format!("{}_deploy_checkpoint", env))
    }

    /// Path of an environment snapshot file with the default suffix.
    pub(crate) fn environment_path(&self, env: &str) -> PathBuf {
        self.root().join(format!("{}_deploy_env", env))
    }

    /// Read a file under the root.
    pub(crate) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).expect("Failed to read file")
    }
}
