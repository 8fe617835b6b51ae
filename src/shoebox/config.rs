use crate::error::{Result, ShoeboxError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_REFRESH_SECS: u64 = 60;

/// Configuration for shoebox, stored in the data directory as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShoeboxConfig {
    /// Seconds between scheduled to-do view refreshes.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

impl Default for ShoeboxConfig {
    fn default() -> Self {
        Self {
            refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl ShoeboxConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShoeboxError::Io)?;
        let config: ShoeboxConfig =
            serde_json::from_str(&content).map_err(ShoeboxError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ShoeboxError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ShoeboxError::Serialization)?;
        fs::write(config_path, content).map_err(ShoeboxError::Io)?;
        Ok(())
    }

    /// The refresh interval as a [`Duration`], for the refresh timer.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ShoeboxConfig::default();
        assert_eq!(config.refresh_secs, 60);
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = ShoeboxConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, ShoeboxConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();

        let config = ShoeboxConfig { refresh_secs: 15 };
        config.save(dir.path()).unwrap();

        let loaded = ShoeboxConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.refresh_secs, 15);
    }

    #[test]
    fn test_missing_field_falls_back_to_default() {
        let config: ShoeboxConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.refresh_secs, 60);
    }
}
