//! Config command - view and change client settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use myflix_core::adapters::http::parse_base_url;
use myflix_core::config::{BaseUrlSource, Config};

use super::get_data_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Point the client at another API server
    SetUrl {
        /// Base URL, e.g. http://localhost:8080
        url: String,
    },
    /// Restore default settings
    Reset,
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir()?;
    let mut config = Config::load(&data_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            if json {
                return output::print_json(&serde_json::json!({
                    "dataDir": data_dir.display().to_string(),
                    "baseUrl": config.base_url,
                    "baseUrlSource": config.base_url_source,
                    "timeoutSecs": config.timeout_secs,
                }));
            }

            let source = match config.base_url_source {
                BaseUrlSource::Default => "default",
                BaseUrlSource::Settings => "settings.json",
                BaseUrlSource::Env => "MYFLIX_API_URL",
            };
            let timeout = if config.timeout_secs == 0 {
                "disabled".to_string()
            } else {
                format!("{}s", config.timeout_secs)
            };

            let mut table = output::create_table();
            let base_url = format!("{} ({})", config.base_url, source);
            table.add_row(vec!["Data directory".to_string(), data_dir.display().to_string()]);
            table.add_row(vec!["API base URL".to_string(), base_url]);
            table.add_row(vec!["Request timeout".to_string(), timeout]);
            println!("{}", table);
            Ok(())
        }
        ConfigCommands::SetUrl { url } => {
            parse_base_url(&url)?;
            config.set_base_url(&url);
            config.save(&data_dir)?;

            output::success(&format!("API base URL set to {}", url.trim().trim_end_matches('/')));
            if config.base_url_source == BaseUrlSource::Env {
                output::warning("MYFLIX_API_URL is set and takes precedence over this setting.");
            }
            println!("{}", "Log in again if the new server does not know your session.".dimmed());
            Ok(())
        }
        ConfigCommands::Reset => {
            config.reset();
            config.save(&data_dir)?;
            output::success("Settings restored to defaults.");
            Ok(())
        }
    }
}
