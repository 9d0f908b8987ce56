use super::types::OperatorSettings;
use anyhow::{Context, Result};
use config::{Config, Environment, File};

/// Environment variable prefix, e.g. `GKE_LIFECYCLE__BACKOFF__STEPS=5`
pub const ENV_PREFIX: &str = "GKE_LIFECYCLE";

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    config_file: Option<String>,
    load_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: false,
        }
    }

    /// Load configuration from file
    pub fn load_from_file(mut self, path: Option<&str>) -> Self {
        self.config_file = path.map(String::from);
        self
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<OperatorSettings> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&OperatorSettings::default())?);

        if let Some(config_path) = &self.config_file {
            builder = builder.add_source(File::with_name(config_path).required(true));
        } else {
            // Try to load from standard locations
            builder = builder
                .add_source(File::with_name("gke-lifecycle").required(false))
                .add_source(File::with_name("config/gke-lifecycle").required(false));
        }

        if self.load_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings: OperatorSettings = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // Reject unusable schedules at load time rather than on first delete
        settings.backoff.to_policy()?;

        Ok(settings)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
