use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use chronicle_core::ChronicleConfig;
use chronicle_types::Isolation;

use crate::cli::{Cli, OutputFormat};

/// Settings read from `--config` and overridden by command-line flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub format: OutputFormat,
    pub chronicle: ChronicleConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load the configured file, if any, then apply command-line overrides.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(format) = cli.format {
            config.format = format;
        }
        if cli.shared {
            config.chronicle.isolation = Isolation::Shared;
        }
        Ok(config)
    }
}
