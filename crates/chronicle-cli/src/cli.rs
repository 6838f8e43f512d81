use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(
    name = "chronicle",
    about = "Chronicle: a current value and its newest-first history",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format; overrides the config file.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store and return values without deep copies; overrides the config file.
    #[arg(long, global = true)]
    pub shared: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a history from EVENTS (oldest first) and print it newest first
    Replay(ReplayArgs),
    /// Build an error carrying EVENTS as its history and exit with it
    Fail(FailArgs),
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Events in the order they happened; the first is the initial value.
    #[arg(required = true)]
    pub events: Vec<String>,
    /// Report whether the history includes this value (repeatable).
    #[arg(long = "probe")]
    pub probes: Vec<String>,
    /// Rewrite every event after replaying.
    #[arg(long)]
    pub transform: Option<Transform>,
    /// Compare probes without regard to ASCII case.
    #[arg(long)]
    pub ignore_case: bool,
}

#[derive(Args)]
pub struct FailArgs {
    /// Events in the order they happened; the first is the initial value.
    #[arg(required = true)]
    pub events: Vec<String>,
    #[arg(short, long)]
    pub message: String,
    /// Underlying cause attached to the error.
    #[arg(long)]
    pub cause: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Transform {
    Upper,
    Lower,
    Trim,
    Reverse,
}

impl Transform {
    pub fn apply(self, event: &str) -> String {
        match self {
            Self::Upper => event.to_uppercase(),
            Self::Lower => event.to_lowercase(),
            Self::Trim => event.trim().to_string(),
            Self::Reverse => event.chars().rev().collect(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Trim => "trim",
            Self::Reverse => "reverse",
        }
    }
}
