use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
}

impl Settings {
    /// Defaults, then an optional `trivia.toml`, then `TRIVIA_*` variables
    /// (a `.env` file is honoured).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::with_defaults()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("bind_address", "0.0.0.0:8080")?
            .set_default("max_connections", 5)
    }
}
