use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use weather_core::{BackendConfig, BackendId, Config, backend_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "metweather", version, about = "Weather forecasts from MET Norway")]
pub struct Cli {
    /// Log request URLs and raw provider responses.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure settings for a specific backend.
    Configure {
        /// Backend short name, e.g. "yr".
        backend: String,
    },

    /// Show current conditions and a forecast for a location.
    Show {
        /// "lat,lon", a postal code, or a place name.
        #[arg(allow_hyphen_values = true)]
        location: String,

        /// Number of forecast days; 0 shows current conditions only.
        #[arg(long, default_value_t = 3)]
        days: usize,

        /// Backend to use instead of the configured default.
        #[arg(long)]
        backend: Option<String>,

        /// Print the normalized data as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        config.debug |= self.debug;

        match self.command {
            Command::Configure { backend } => configure(&mut config, &backend),
            Command::Show { location, days, backend, json } => {
                let id = match backend {
                    Some(name) => BackendId::try_from(name.as_str())?,
                    None => config.default_backend_id()?,
                };
                tracing::debug!(%id, %location, days, "selected backend");
                if let Some(hint) = unconfigured_hint(&config, id) {
                    tracing::warn!("{hint}");
                }
                let backend = backend_from_config(id, &config)?;

                let data = backend
                    .fetch(&location, days)
                    .await
                    .with_context(|| format!("Failed to fetch weather for '{location}' from {id}"))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    print!("{}", render::render(&data));
                }
                Ok(())
            }
        }
    }
}

fn configure(config: &mut Config, backend: &str) -> anyhow::Result<()> {
    let id = BackendId::try_from(backend)?;
    let existing = config.backend_config(id).cloned().unwrap_or_default();

    let user_agent = Text::new("User-Agent contact string (app name and email or URL):")
        .with_initial_value(existing.user_agent.as_deref().unwrap_or_default())
        .prompt()?;
    let geonames = Text::new("GeoNames username for place-name lookup (empty to skip):")
        .with_initial_value(existing.geonames_username.as_deref().unwrap_or_default())
        .prompt()?;

    let settings = BackendConfig {
        user_agent: non_empty(user_agent),
        geonames_username: non_empty(geonames),
        base_url: existing.base_url,
    };
    config.upsert_backend_config(id, settings);
    config.set_default_backend(id);
    config.save()?;

    println!("Saved {id} settings to {}", Config::config_file_path()?.display());
    Ok(())
}

fn unconfigured_hint(config: &Config, id: BackendId) -> Option<String> {
    (!config.is_backend_configured(id))
        .then(|| format!("No settings for {id}, using defaults. Run `metweather configure {id}` to set a contact User-Agent."))
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
