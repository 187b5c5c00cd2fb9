pub mod deploy_config;
pub mod loader;
pub mod paths;

pub use deploy_config::{DeployConfig, DeploySettings, GitHubConfig, parse_config_content};
pub use loader::{load_deploy_config, load_pillow_config};
