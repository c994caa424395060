use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Prefix for environment variable overrides, e.g. `CADENCE_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "CADENCE";

/// Optional TOML file read from the working directory.
pub const CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub recurrence: RecurrenceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Defaults applied when a rule is built without explicit values.
#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceConfig {
    pub default_period: u32,
    pub completion_relative: bool,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `cadence.toml`. Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building or deserializing the configuration fails,
    /// or if the loaded values do not pass [`Settings::validate`].
    pub fn load() -> CoreResult<Self> {
        let settings = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("recurrence.default_period", 1)?
            .set_default("recurrence.completion_relative", false)?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but make no sense.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` if the default period is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.recurrence.default_period == 0 {
            return Err(CoreError::ValidationError(
                "recurrence.default_period must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            recurrence: RecurrenceConfig {
                default_period: 1,
                completion_relative: false,
            },
        }
    }
}

/// ## Summary
/// Loads configuration from a `.env` file, environment variables and
/// `cadence.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    if let Err(err) = dotenvy::dotenv() {
        tracing::trace!(error = %err, "No .env file loaded");
    }

    Settings::load()
}
