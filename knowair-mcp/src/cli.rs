use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, Select};
use serde_json::{Map, Value, json};

use knowair_core::{Config, Lang, TOKEN_ENV, WeatherService};

use crate::mcp::{server, tools};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "knowair", version, about = "Caiyun weather MCP server")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the weather tools over MCP stdio (default).
    Serve,

    /// Interactively set the API token and language.
    Configure {
        /// Language to store without prompting, e.g. "en_US".
        #[arg(long)]
        lang: Option<String>,
    },

    /// Run one tool and print its report.
    Show {
        /// Tool name, e.g. "get_realtime_weather".
        tool: String,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long)]
        hours: Option<u32>,

        #[arg(long)]
        days: Option<u32>,

        /// Include life indices where the tool supports them.
        #[arg(long)]
        life_index: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => {
                let config = Config::load_from(&path)?;
                if !config.has_token() {
                    tracing::warn!(
                        "no API token configured; set {TOKEN_ENV} or run `knowair configure`"
                    );
                }
                let service = WeatherService::from_config(config)?;
                server::serve_stdio(service).await?;
            }
            Command::Configure { lang } => configure(&path, lang.as_deref())?,
            Command::Show {
                tool,
                lng,
                lat,
                hours,
                days,
                life_index,
            } => {
                let config = Config::load_from(&path)?;
                let service = WeatherService::from_config(config)?;

                let mut args = Map::new();
                args.insert("lng".into(), json!(lng));
                args.insert("lat".into(), json!(lat));
                if let Some(hours) = hours {
                    args.insert("hours".into(), json!(hours));
                }
                if let Some(days) = days {
                    args.insert("days".into(), json!(days));
                }
                if life_index {
                    args.insert("include_life_index".into(), json!(true));
                }

                let result = tools::call_tool(&service, &tool, &Value::Object(args)).await;
                let text = result.joined_text();
                if result.is_error {
                    bail!(text);
                }
                println!("{text}");
            }
        }

        Ok(())
    }
}

/// Update the config file in place. The environment token is never written
/// to disk.
fn configure(path: &Path, lang: Option<&str>) -> anyhow::Result<()> {
    let mut config = Config::read_file(path)?;

    let token = Password::new("Caiyun API token:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current token")
        .prompt()
        .context("Failed to read API token")?;
    if !token.trim().is_empty() {
        config.api_token = Some(token.trim().to_string());
    }

    config.lang = match lang {
        Some(lang) => Lang::try_from(lang)?,
        None => {
            let start = Lang::all()
                .iter()
                .position(|l| *l == config.lang)
                .unwrap_or(0);
            Select::new("Language:", Lang::all().to_vec())
                .with_starting_cursor(start)
                .prompt()
                .context("Failed to read language")?
        }
    };

    config.save_to(path)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
