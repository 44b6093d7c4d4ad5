//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translatable strings from source files
//! - `compare`: Check that sibling catalogs carry every key of a reference
//! - `init`: Initialize xtract configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Compare(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// File glob patterns to scan (relative to the working directory)
    #[arg(required = true, value_name = "PATTERNS")]
    pub patterns: Vec<String>,

    /// Target function, as 'pkg.Func' or 'path.to/some/pkg.Func' (overrides config file)
    #[arg(long, value_name = "FUNC")]
    pub func: Option<String>,

    /// Output template; '{string}' is replaced by each phrase (overrides config file)
    #[arg(long, value_name = "TEXT", conflicts_with = "json")]
    pub template: Option<String>,

    /// Write a JSON catalog instead of templated text
    #[arg(short, long)]
    pub json: bool,

    /// Native language name stored in the JSON catalog
    #[arg(long, value_name = "NAME", requires = "json")]
    pub native_name: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CompareCommand {
    /// Reference catalog; every other .json file in its directory is checked against it
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract strings passed to the target function
    Extract(ExtractCommand),
    /// Verify that all catalogs next to REFERENCE contain its keys
    Compare(CompareCommand),
    /// Initialize a new .xtractrc.json configuration file
    Init,
}
