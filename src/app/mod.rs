pub mod cli;
pub mod commands;
pub mod context;
pub mod diagnostics;
pub mod timing;

pub use context::DeployContext;
