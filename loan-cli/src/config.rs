//! File configuration for the `home-online` host.
//!
//! Values are resolved in this order, later overriding earlier:
//! 1. Built-in defaults
//! 2. `home-online.toml` in the working directory, or the file named by
//!    `--config`
//! 3. CLI flags
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "home-online.db"
//!
//! [logging]
//! level = "info"
//! file = "home-online.log"
//!
//! [wizard]
//! session_key = "loan-application"
//! ```

use std::path::{Path, PathBuf};

use loan_core::store::StoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "home-online.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub store: StoreSection,
    pub logging: LoggingConfig,
    pub wizard: WizardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "home-online.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Append log records here as well as to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WizardConfig {
    pub session_key: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            session_key: "loan-application".to_string(),
        }
    }
}

/// CLI flags that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub backend: Option<String>,
    pub connection_string: Option<String>,
    pub session_key: Option<String>,
}

impl AppConfig {
    pub fn from_toml(
        content: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content, path)
    }

    /// Load `explicit` if given. Otherwise load [`DEFAULT_CONFIG_FILE`] when
    /// it exists, and fall back to defaults when it does not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn apply(
        mut self,
        overrides: Overrides,
    ) -> Self {
        if let Some(backend) = overrides.backend {
            self.store.backend = backend;
        }
        if let Some(connection_string) = overrides.connection_string {
            self.store.connection_string = connection_string;
        }
        if let Some(session_key) = overrides.session_key {
            self.wizard.session_key = session_key;
        }
        self
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store.backend.clone(),
            connection_string: self.store.connection_string.clone(),
        }
    }
}
