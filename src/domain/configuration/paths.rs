use std::path::{Path, PathBuf};

pub const ROOT_ENV_VAR: &str = "DEPLOYCTL_ROOT";
pub const PILLOWS_DIR: &str = "pillows";

/// `deploy.toml`
pub fn deploy_config(root: &Path) -> PathBuf {
    root.join("deploy.toml")
}

/// `pillows/<environment>.yml`
pub fn pillow_config(root: &Path, environment: &str) -> PathBuf {
    root.join(PILLOWS_DIR).join(format!("{}.yml", environment))
}

/// `<environment>_<suffix>`
pub fn checkpoint_file(root: &Path, environment: &str, suffix: &str) -> PathBuf {
    root.join(format!("{}_{}", environment, suffix))
}

/// Project root: `$DEPLOYCTL_ROOT`, else the current directory.
pub fn project_root() -> std::io::Result<PathBuf> {
    match std::env::var_os(ROOT_ENV_VAR) {
        Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
        _ => std::env::current_dir(),
    }
}
