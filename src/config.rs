use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Start with the demonstration dataset instead of empty collections
    pub load_seed_data: bool,
    /// Origin of the browser front-end allowed to call the API; any origin when unset
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            load_seed_data: true,
            allowed_origin: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config` file and the environment.
    ///
    /// Environment keys use the `FACTORY_` prefix and `__` between sections, e.g.
    /// `FACTORY_SERVER__PORT=8080` or `FACTORY_CONSOLE__LOAD_SEED_DATA=false`.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name("config").required(false));

        config = config.add_source(
            config::Environment::with_prefix("FACTORY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
