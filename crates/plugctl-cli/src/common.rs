//! Common types and utilities shared across commands

use clap::Parser;
use plugctl_config::Paths;
use std::path::PathBuf;

use crate::errors::CliError;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        env = "PLUGCTL_ROOT",
        help = "Root directory holding receipts and the plugin index"
    )]
    pub root: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Directory layout selected by `--root`, or discovered from the environment
    pub fn paths(&self) -> Result<Paths, CliError> {
        match &self.root {
            Some(root) => Ok(Paths::new(root.clone())),
            None => Ok(Paths::discover()?),
        }
    }
}
