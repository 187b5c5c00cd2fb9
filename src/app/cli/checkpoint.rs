use clap::Subcommand;

use crate::app::DeployContext;
use crate::app::commands::checkpoint;
use crate::domain::AppError;

#[derive(Subcommand)]
pub enum CheckpointCommands {
    /// Save the resume position and environment snapshot
    Save {
        /// Environment name
        env: String,
        /// Command index (JSON, or a plain string)
        index: String,
        /// Snapshot entries as key=value (value parsed as JSON when possible)
        #[arg(long = "set", value_parser = super::parse_key_value)]
        settings: Vec<(String, String)>,
    },
    /// Show the saved checkpoint for an environment
    Show {
        /// Environment name
        env: String,
    },
    /// Remove the saved checkpoint for an environment
    Clear {
        /// Environment name
        env: String,
    },
}

pub fn run_checkpoint(command: CheckpointCommands) -> Result<(), AppError> {
    let ctx = DeployContext::current()?;
    match command {
        CheckpointCommands::Save { env, index, settings } => {
            let saved = checkpoint::save(&ctx, &env, &index, &settings)?;
            println!("✅ Saved checkpoint {} for {}", saved.command_index, env);
        }
        CheckpointCommands::Show { env } => {
            let saved = checkpoint::show(&ctx, &env)?;
            println!("command_index: {}", saved.command_index);
            println!("environment: {}", serde_json::to_string_pretty(&saved.environment)?);
        }
        CheckpointCommands::Clear { env } => {
            checkpoint::clear(&ctx, &env)?;
            println!("✅ Cleared checkpoint for {}", env);
        }
    }
    Ok(())
}
