//! Configuration for the tasklist server and its command-line client.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). A missing file means defaults. After the file is read,
//! a `.env` file (if any) is loaded and these variables take precedence:
//!
//! | Variable            | Setting                  |
//! |---------------------|--------------------------|
//! | `TASKLIST_HOST`     | `server.host`            |
//! | `TASKLIST_PORT`     | `server.port`            |
//! | `TASKLIST_DATABASE` | `server.database`        |
//! | `TASKLIST_URL`      | `client.base_url`        |
//!
//! ```rust,no_run
//! use tasklist::libs::config::Config;
//!
//! let config = Config::load()?;
//! println!("serving on {}", config.server_settings().address());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Where the HTTP server listens and which database file it serves.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Database file; `None` uses `tasklist.db` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// Where the command-line front-end sends its requests.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: None,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
            _ => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT),
        }
    }
}

impl Config {
    /// Reads `config.json`, returning defaults when it does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Reads the file and applies `.env` and environment overrides.
    pub fn load() -> Result<Config> {
        let _ = dotenv::dotenv();
        Self::read()?.with_env_overrides()
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn with_env_overrides(mut self) -> Result<Config> {
        let mut server = self.server_settings();
        let mut server_changed = false;

        if let Ok(host) = env::var("TASKLIST_HOST") {
            server.host = host;
            server_changed = true;
        }
        if let Ok(port) = env::var("TASKLIST_PORT") {
            server.port = port.trim().parse().map_err(|_| msg_error_anyhow!(Message::InvalidPort(port.clone())))?;
            server_changed = true;
        }
        if let Ok(database) = env::var("TASKLIST_DATABASE") {
            server.database = Some(database);
            server_changed = true;
        }
        if server_changed {
            self.server = Some(server);
        }

        if let Ok(base_url) = env::var("TASKLIST_URL") {
            self.client = Some(ClientConfig { base_url });
        }

        Ok(self)
    }

    pub fn server_settings(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn client_settings(&self) -> ClientConfig {
        self.client.clone().unwrap_or_default()
    }

    /// Interactive setup: pick sections, then answer prompts pre-filled with current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [Message::ConfigModuleServer.to_string(), Message::ConfigModuleClient.to_string()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for selection in selected {
            match selection {
                0 => {
                    let default = config.server_settings();
                    msg_print!(Message::ConfigModuleServer);
                    let database: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptServerDatabase.to_string())
                        .default(default.database.clone().unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;

                    config.server = Some(ServerConfig {
                        host: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerHost.to_string())
                            .default(default.host)
                            .interact_text()?,
                        port: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerPort.to_string())
                            .default(default.port)
                            .interact_text()?,
                        database: if database.trim().is_empty() { None } else { Some(database) },
                    });
                }
                1 => {
                    let default = config.client_settings();
                    msg_print!(Message::ConfigModuleClient);
                    config.client = Some(ClientConfig {
                        base_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptClientUrl.to_string())
                            .default(default.base_url)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
