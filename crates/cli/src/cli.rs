use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{apply_command, list_command, options_command, validate_command};
use crate::utils::load_config;

#[derive(Parser, Debug)]
#[command(name = "pathcopy")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Config file to use instead of searching for pathcopy.json
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available commands
    #[command(visible_alias = "ls")]
    List,
    /// Validate configured commands
    Validate {
        /// Only validate this command (id or description)
        #[arg(short, long)]
        plugin: Option<String>,
    },
    /// Transform paths with a command
    #[command(visible_alias = "a")]
    Apply {
        /// Command to apply (id or description)
        #[arg(short, long)]
        plugin: String,

        /// Paths to transform
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print the launch command instead of executing it
        #[arg(short, long, conflicts_with = "execute")]
        dry_run: bool,

        /// Launch the executable configured by the command
        #[arg(short, long)]
        execute: bool,
    },
    /// Show the options a command's pipeline sets
    Options {
        /// Command to inspect (id or description)
        #[arg(short, long)]
        plugin: String,
    },
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        match self.command {
            Commands::List => list_command(&config),
            Commands::Validate { plugin } => validate_command(&config, plugin.as_deref()),
            Commands::Apply {
                plugin,
                paths,
                dry_run,
                execute,
            } => apply_command(&config, &plugin, &paths, dry_run, execute),
            Commands::Options { plugin } => options_command(&config, &plugin),
        }
    }
}
