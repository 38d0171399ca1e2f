use crate::error::ConfigError;
use std::env;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DatabaseSettings, LoggingSettings, ServerSettings};
pub use telemetry::init_tracing;

/// Loads the application configuration from `config.toml` and the environment.
///
/// Sources, lowest priority first: built-in defaults, the optional `config.toml`
/// file, `COSMIC__*` environment variables (e.g. `COSMIC__SERVER__PORT`), and
/// finally `DATABASE_URL` (or the older `DB_URI`).
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Same as [`load_config`] but reads the file at `path`. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let database_url = env::var("DATABASE_URL").or_else(|_| env::var("DB_URI")).ok();

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("COSMIC")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", database_url)?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
