//! Configuration storage.
//!
//! The only persisted setting is the telemetry opt-in flag, kept in
//! `telemetry.json` under the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Telemetry config file name.
const TELEMETRY_FILE: &str = "telemetry.json";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "CPF_CONFIG_DIR";

/// Get the config directory path.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("io", "aquarela", "cpf")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CliError::ConfigDirUnavailable.into())
}

/// Telemetry settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether anonymous usage reporting is enabled.
    #[serde(default)]
    pub enabled: bool,
}

impl TelemetryConfig {
    /// Load the config from `dir`.
    ///
    /// A missing file yields the default (disabled) config, which is written
    /// back so the file exists for later edits.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(TELEMETRY_FILE);

        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to(dir) {
                tracing::debug!(error = %e, path = %path.display(), "could not write default config");
            }
            return Ok(config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save the config to `dir`, creating it if needed.
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = dir.join(TELEMETRY_FILE);
        let contents = serde_json::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
        }

        Ok(())
    }
}
