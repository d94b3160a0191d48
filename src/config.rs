// Configuration module for softshelf
// This module handles loading and parsing configuration from ~/.config/softshelf/config.toml

mod types;

pub use types::{Config, LazyConfig, ScrollConfig, SearchConfig, TimingConfig};

use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/softshelf/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> ConfigResult {
    #[cfg(debug_assertions)]
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        #[cfg(debug_assertions)]
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            #[cfg(debug_assertions)]
            log::debug!("Config parsed successfully: {:?}", config.timing);
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/softshelf/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("softshelf")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(&dir.path().join("config.toml"));
        assert!(result.warning.is_none());
        assert_eq!(result.config.timing.scroll_throttle_ms, 100);
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[timing]\nsearch_debounce_ms = 120\n").unwrap();

        let result = load_config_from(&path);
        assert!(result.warning.is_none());
        assert_eq!(result.config.timing.search_debounce_ms, 120);
        assert_eq!(result.config.timing.scroll_throttle_ms, 100);
    }

    #[test]
    fn test_malformed_file_warns_and_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[timing\nsearch_debounce_ms = 120\n").unwrap();

        let result = load_config_from(&path);
        let warning = result.warning.expect("malformed config should warn");
        assert!(warning.starts_with("Invalid config"));
        assert_eq!(result.config.timing.search_debounce_ms, 300);
    }

    #[test]
    fn test_config_path_ends_with_softshelf() {
        let path = get_config_path();
        let path_str = path.to_string_lossy();
        assert!(
            path_str.ends_with("softshelf/config.toml")
                || path_str.ends_with("softshelf\\config.toml"),
            "unexpected config path: {}",
            path_str
        );
    }
}
