//! Command implementations.

pub mod config;
pub mod generate;
pub mod inspect;
pub mod keypair;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Verbose output
    pub verbose: bool,

    /// Disable colors
    pub no_color: bool,

    /// Settings from the config file
    pub config: Config,
}

impl Context {
    /// Print a structured rendering if one was requested.
    ///
    /// Returns `false` when the command should print its pretty form.
    pub fn emit<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<bool> {
        match self.output_format.render(value)? {
            Some(text) => {
                println!("{text}");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
