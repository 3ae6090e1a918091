//! Data directory resolution and the optional TOML config file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use wagebook_advice::gemini::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
use wagebook_core::DEFAULT_HOURLY_RATE;

pub const HOME_ENV: &str = "WAGEBOOK_HOME";
pub const CONFIG_ENV: &str = "WAGEBOOK_CONFIG";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rate pre-filled for a blank day when nothing better is known.
    pub fallback_rate: f64,
    pub advice: AdviceSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_rate: DEFAULT_HOURLY_RATE,
            advice: AdviceSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdviceSettings {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 30,
        }
    }
}

impl AdviceSettings {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load the config file.
    ///
    /// An explicit path (flag or `WAGEBOOK_CONFIG`) must exist. The implicit
    /// `<data_dir>/config.toml` is optional.
    pub fn load(explicit: Option<&Path>, data_dir: &Path) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let (path, required) = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => (path, true),
            None => (data_dir.join(CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                bail!("config file not found: {}", path.display());
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if !config.fallback_rate.is_finite() || config.fallback_rate < 0.0 {
            bail!("fallback_rate must be a non-negative number");
        }
        Ok(config)
    }
}

/// `--data-dir`, else `$WAGEBOOK_HOME`, else `$HOME/.wagebook`.
pub fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME")
        .filter(|d| !d.is_empty())
        .with_context(|| format!("cannot locate a data directory: set {HOME_ENV} or pass --data-dir"))?;
    Ok(PathBuf::from(home).join(".wagebook"))
}
