use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::commands;
use crate::config::CONFIG_FILE_NAME;

/// Rollguard - keep load balancer health checks from outrunning the orchestrator
#[derive(Parser)]
#[command(name = "rollguard")]
#[command(version, disable_version_flag = true)]
#[command(about = "Rollguard - health check timing for rolling deployments")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show version
    #[arg(long, global = true)]
    pub version: bool,

    /// Show verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Path to rollguard.toml
    #[arg(
        short = 'c',
        long,
        global = true,
        env = "ROLLGUARD_CONFIG",
        default_value = CONFIG_FILE_NAME
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter rollguard.toml
    Init {
        /// Overwrite an existing rollguard.toml
        #[arg(long)]
        force: bool,

        /// Service name (defaults to the current directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Check health check timing for every environment
    Check {
        /// Only check this environment
        #[arg(long)]
        env: Option<String>,
    },

    /// Print the derived health check configuration as JSON
    Render {
        /// Environment to render (required when several are configured)
        #[arg(long)]
        env: Option<String>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        if self.version {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        let Some(command) = self.command else {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        };

        match command {
            Commands::Init { force, name } => commands::init::run(&self.config, force, name),
            Commands::Check { env } => commands::check::run(&self.config, env.as_deref()),
            Commands::Render { env, compact } => {
                commands::render::run(&self.config, env.as_deref(), compact)
            }
        }
    }
}
