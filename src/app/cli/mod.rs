//! CLI Adapter.

mod checkpoint;

use std::io::ErrorKind;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::adapters::TerminalPrompt;
use crate::app::DeployContext;
use crate::app::commands::{pillow, tag};
use crate::app::timing::run_timed;
use crate::domain::AppError;
use crate::domain::install_command::{BowerCommand, PipInstall};

#[derive(Parser)]
#[command(name = "deployctl")]
#[command(version)]
#[command(
    about = "Deploy helpers: release tags, resumable checkpoints, pillow config, install commands",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tag the deployed commit and print the diff link
    #[clap(visible_alias = "t")]
    Tag {
        /// Branch, tag or sha being deployed
        #[arg(short, long)]
        branch: String,
        /// Target environment
        #[arg(short, long)]
        env: String,
    },
    /// Print the pillow config for an environment
    #[clap(visible_alias = "p")]
    Pillow {
        /// Environment name
        env: String,
        /// Fail when the environment has no pillow file
        #[arg(long)]
        require: bool,
    },
    /// Manage resumable deploy checkpoints
    #[clap(visible_alias = "cp")]
    Checkpoint {
        #[command(subcommand)]
        command: checkpoint::CheckpointCommands,
    },
    /// Print a pip install command line
    PipCommand {
        /// Text placed before the pip invocation
        #[arg(long, default_value = "")]
        prefix: String,
        /// Requirement file (repeatable, order kept)
        #[arg(short = 'r', long = "requirement")]
        requirements: Vec<String>,
        /// Socket timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Pass --quiet to pip
        #[arg(short, long)]
        quiet: bool,
        /// Proxy URL
        #[arg(long)]
        proxy: Option<String>,
    },
    /// Print a bower command line
    BowerCommand {
        /// Bower subcommand, e.g. install or prune
        command: String,
        /// Leave out --production
        #[arg(long)]
        no_production: bool,
        /// Config override as key=value (repeatable, order kept)
        #[arg(long = "config", value_parser = parse_key_value)]
        config: Vec<(String, String)>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Tag { branch, env } => run_tag(&branch, &env),
        Commands::Pillow { env, require } => run_pillow(&env, require),
        Commands::Checkpoint { command } => checkpoint::run_checkpoint(command),
        Commands::PipCommand { prefix, requirements, timeout, quiet, proxy } => {
            let command =
                PipInstall { prefix, requirements, timeout: timeout.map(Duration::from_secs), quiet, proxy };
            println!("{}", command);
            Ok(())
        }
        Commands::BowerCommand { command, no_production, config } => {
            println!("{}", BowerCommand::new(command).production(!no_production).config(config));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

/// sysexits-style status for a failed command.
fn exit_code(err: &AppError) -> i32 {
    match err.kind() {
        ErrorKind::InvalidData => 65,
        ErrorKind::NotFound => 66,
        ErrorKind::AlreadyExists => 73,
        ErrorKind::PermissionDenied => 77,
        _ => 1,
    }
}

fn run_tag(branch: &str, env: &str) -> Result<(), AppError> {
    let ctx = DeployContext::current()?;
    let github = ctx.github_client(&TerminalPrompt)?;
    let mut metadata = tag::deploy_metadata(&ctx, branch, env)?;

    let timing_log = ctx.timing_log();
    let outcome =
        run_timed(timing_log.as_ref(), "tag_commit", || tag::execute(&ctx, &github, &mut metadata))?;

    println!("✅ Tagged {} as {}", outcome.deploy_ref, outcome.deploy_tag);
    match &outcome.previous_tag {
        Some(previous) => println!("Previous deploy: {}", previous),
        None => println!("Previous deploy: none found"),
    }
    println!("{}", outcome.diff_url);
    Ok(())
}

fn run_pillow(env: &str, require: bool) -> Result<(), AppError> {
    let ctx = DeployContext::current()?;
    if require {
        print!("{}", pillow::render(&pillow::require(&ctx, env)?)?);
        return Ok(());
    }
    match pillow::show(&ctx, env)? {
        Some(mapping) => print!("{}", pillow::render(&mapping)?),
        None => println!("No pillow config for {}", env),
    }
    Ok(())
}

pub(crate) fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}
