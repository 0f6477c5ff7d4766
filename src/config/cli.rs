use crate::config::toml_config::AppConfig;
use crate::domain::model::DisplayUnit;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "weather-lookup")]
#[command(about = "Current weather and 7-day forecast for a city, via Open-Meteo")]
pub struct CliConfig {
    #[arg(help = "City to look up; defaults to the last successful search")]
    pub query: Vec<String>,

    #[arg(short, long, help = "Show temperatures in Fahrenheit")]
    pub fahrenheit: bool,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Where to remember the last searched city")]
    pub state_file: Option<String>,

    #[arg(short, long, help = "Read searches from stdin (:f / :c switch units, :q quits)")]
    pub interactive: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Query words joined with single spaces, or `None` when nothing was given.
    pub fn query(&self) -> Option<String> {
        let joined = self.query.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Loads the configuration file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if self.fahrenheit {
            config.display.unit = DisplayUnit::Fahrenheit;
        }
        if let Some(state_file) = &self.state_file {
            config.storage.state_file = state_file.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(state_file) = &self.state_file {
            validation::validate_path("--state-file", state_file)?;
        }
        Ok(())
    }
}
