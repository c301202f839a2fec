//! `docsite show` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use docsite_config::{CliSettings, SiteConfig};

use crate::error::CliError;

/// Serialization format for `show`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Site URL (overrides config).
    #[arg(long, env = "DOCSITE_URL")]
    url: Option<String>,

    /// Base URL (overrides config).
    #[arg(long, env = "DOCSITE_BASE_URL")]
    base_url: Option<String>,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            url: self.url,
            base_url: self.base_url,
        };
        let config = SiteConfig::load(self.config.as_deref(), Some(&cli_settings))?;

        let rendered = render(&config, self.format)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Serialize a configuration, newline-terminated.
fn render(config: &SiteConfig, format: OutputFormat) -> Result<String, CliError> {
    let mut rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| CliError::Serialize(e.to_string()))?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(config).map_err(|e| CliError::Serialize(e.to_string()))?
        }
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
