pub mod configuration;
pub mod credentials;
pub mod error;
pub mod install_command;
pub mod release;

pub use configuration::{
    DeployConfig, DeploySettings, GitHubConfig, load_deploy_config, load_pillow_config,
    parse_config_content,
};
pub use credentials::{Credentials, resolve_credentials};
pub use error::AppError;
pub use install_command::{BowerCommand, PipInstall, build_frontend_command, build_install_command};
pub use release::DeployMetadata;
