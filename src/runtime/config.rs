use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config/herd.toml";
pub const ENV_PREFIX: &str = "HERD";

/// Runtime settings, loaded once at startup and passed to
/// [`HerdSystem::start`](super::HerdSystem::start).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HerdConfig {
    /// Requests that may queue in the actor mailbox before senders wait.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Working directory handed to the breeding simulation.
    #[serde(default = "default_simulation_data_dir")]
    pub simulation_data_dir: PathBuf,
}

fn default_mailbox_capacity() -> usize {
    32
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_simulation_data_dir() -> PathBuf {
    PathBuf::from("data/simulation")
}

impl Default for HerdConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_mailbox_capacity(),
            log_filter: default_log_filter(),
            simulation_data_dir: default_simulation_data_dir(),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

impl HerdConfig {
    /// Loads `config/herd.toml` (optional) overlaid with `HERD__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(environment());

        match Self::build(builder) {
            Ok(config) => Ok(config),
            Err(err) if std::path::Path::new(path).exists() => {
                tracing::warn!(path, error = %err, "Config file unusable, falling back to env");
                Self::build(Config::builder().add_source(environment())).map_err(|env_err| {
                    ConfigError::Message(format!(
                        "Failed to load configuration from file and env: {err}, then env-only error: {env_err}"
                    ))
                })
            }
            Err(err) => Err(err),
        }
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config = builder.build()?.try_deserialize::<HerdConfig>()?;
        if config.mailbox_capacity == 0 {
            return Err(ConfigError::Message(
                "mailbox_capacity must be at least 1".into(),
            ));
        }
        Ok(config)
    }
}
