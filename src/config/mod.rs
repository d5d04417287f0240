pub mod response_file;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "survey-form")]
#[command(about = "Fill in and submit the developer survey from the terminal")]
pub struct CliConfig {
    /// Path to the survey TOML configuration (optional)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Validate and submit a pre-filled response (.json or .toml) instead of editing interactively
    #[arg(short, long)]
    pub response: Option<String>,

    /// Read session commands from a file instead of stdin
    #[arg(short, long, conflicts_with = "response")]
    pub script: Option<String>,

    /// Also print the submitted record as JSON
    #[arg(long)]
    pub echo_json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Input mode chosen from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    Response(String),
    Script(String),
    Interactive,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn mode(&self) -> RunMode {
        match (&self.response, &self.script) {
            (Some(path), _) => RunMode::Response(path.clone()),
            (None, Some(path)) => RunMode::Script(path.clone()),
            (None, None) => RunMode::Interactive,
        }
    }
}
