//! Harness settings file management.
//!
//! Both directories the helper touches can be pinned in a small TOML file;
//! anything left unset falls back to the environment. Tests that share one
//! serving process typically rely on `MODEL_LOG_DIR` alone and never write a
//! settings file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Result, StateError};

/// Environment variable naming the directory for counter and delay files.
pub const STATE_DIR_ENV: &str = "MODEL_LOG_DIR";

/// Default settings file content.
const DEFAULT_CONFIG: &str = r#"# model-state-helper settings
# All values are optional.

[paths]
# Directory holding counter and delay files.
# Falls back to the MODEL_LOG_DIR environment variable when unset.
# state_dir = "/shared/logs"

# Model repository root (the directory containing config.pbtxt).
# model_dir = "/models/instance_init_del"
"#;

/// Path settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory for counter and delay files.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Model repository root.
    #[serde(default)]
    pub model_dir: Option<PathBuf>,
}

/// Harness configuration.
///
/// The default value leaves every path unset, which means pure environment
/// resolution.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HarnessConfig {
    /// Path settings.
    #[serde(default)]
    pub paths: PathConfig,
}

impl HarnessConfig {
    /// Load configuration from a specific file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            StateError::io(format!("failed to read settings file: {}", path.display()), e)
        })?;

        toml::from_str(&content)
            .map_err(|e| StateError::config(format!("failed to parse settings file: {e}")))
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StateError::config(format!("failed to serialize settings: {e}")))?;

        fs::write(path, content).map_err(|e| {
            StateError::io(format!("failed to write settings file: {}", path.display()), e)
        })?;

        tracing::info!(path = %path.display(), "settings saved");

        Ok(())
    }

    /// Resolve the state directory: the explicit setting when present, else
    /// the `MODEL_LOG_DIR` environment variable.
    ///
    /// # Errors
    /// Returns [`StateError::MissingEnv`] when neither is available.
    pub fn state_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.paths.state_dir {
            return Ok(dir.clone());
        }
        state_dir_from_env()
    }

    /// Resolve the model repository root.
    ///
    /// # Errors
    /// Returns a configuration error when no model directory is set; unlike
    /// the state directory there is no environment fallback for it.
    pub fn model_dir(&self) -> Result<PathBuf> {
        self.paths
            .model_dir
            .clone()
            .ok_or_else(|| StateError::config("no model_dir set under [paths]"))
    }
}

/// Write the default settings template to `path` if nothing is there yet.
///
/// # Errors
/// Returns error if the file cannot be created.
pub fn ensure_settings_exist(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::write(path, DEFAULT_CONFIG).map_err(|e| {
            StateError::io(
                format!("failed to create default settings: {}", path.display()),
                e,
            )
        })?;

        tracing::info!(path = %path.display(), "created default settings");
    }

    Ok(())
}

/// Read the state directory from the environment.
pub(crate) fn state_dir_from_env() -> Result<PathBuf> {
    env::var_os(STATE_DIR_ENV)
        .map(PathBuf::from)
        .ok_or(StateError::MissingEnv {
            name: STATE_DIR_ENV,
        })
}
