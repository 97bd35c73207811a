/// Application configuration
///
/// Pixabay requires an API key per account, so the key has to come from
/// the user: either the `PIXSEEK_API_KEY` environment variable or the
/// JSON config file in the platform config directory. On first run a
/// template file is written so the user only has to paste their key in.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::client::DEFAULT_ENDPOINT;
use crate::state::session::DEFAULT_PER_PAGE;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "PIXSEEK_API_KEY";

/// Pixabay rejects per_page values outside this range
const PER_PAGE_MIN: u32 = 3;
const PER_PAGE_MAX: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Pixabay API key (https://pixabay.com/api/docs/)
    #[serde(default)]
    pub api_key: String,
    /// Results per page / grid fill per fetch
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Search endpoint; only changed for testing
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            per_page: default_per_page(),
            endpoint: default_endpoint(),
        }
    }
}

impl Config {
    /// Where the config file is stored
    /// Returns ~/.config/pixseek/config.json on Linux
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user config directory");

        path.push("pixseek");
        path.push("config.json");
        path
    }

    /// Load the configuration from disk and environment.
    ///
    /// Fails with an actionable message when no API key can be found;
    /// a missing config file is replaced with a template first so the
    /// message points at a real file.
    pub fn load() -> Result<Self, String> {
        let path = Self::config_path();

        let mut config = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .map_err(|error| format!("Could not read {}: {}", path.display(), error))?;
            Self::from_json(&json)
                .map_err(|error| format!("Could not parse {}: {}", path.display(), error))?
        } else {
            let template = Config::default();
            template.write_template(&path);
            template
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_key = key.trim().to_string();
            }
        }

        if config.api_key.is_empty() {
            return Err(format!(
                "No Pixabay API key configured. Paste yours into {} or set {}. \
                 Keys are free at https://pixabay.com/api/docs/",
                path.display(),
                API_KEY_ENV,
            ));
        }

        config.per_page = config.per_page.clamp(PER_PAGE_MIN, PER_PAGE_MAX);

        Ok(config)
    }

    /// Best-effort write of a starter config file
    fn write_template(&self, path: &std::path::Path) {
        if let Some(parent) = path.parent() {
            if let Err(error) = std::fs::create_dir_all(parent) {
                eprintln!("⚠️  Could not create {}: {}", parent.display(), error);
                return;
            }
        }

        match self.to_json() {
            Ok(json) => {
                if let Err(error) = std::fs::write(path, json) {
                    eprintln!("⚠️  Could not write {}: {}", path.display(), error);
                } else {
                    println!("📝 Wrote config template to {}", path.display());
                }
            }
            Err(error) => eprintln!("⚠️  Could not serialize config template: {}", error),
        }
    }

    /// Convert to a pretty JSON string for the config file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from a JSON string (from the config file)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = Config::from_json(r#"{ "api_key": "abc123" }"#).unwrap();

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config {
            api_key: "abc123".to_string(),
            per_page: 24,
            endpoint: "http://localhost:9000/api/".to_string(),
        };

        let json = config.to_json().unwrap();
        let restored = Config::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_per_page_clamping() {
        assert_eq!(1u32.clamp(PER_PAGE_MIN, PER_PAGE_MAX), PER_PAGE_MIN);
        assert_eq!(12u32.clamp(PER_PAGE_MIN, PER_PAGE_MAX), 12);
        assert_eq!(1000u32.clamp(PER_PAGE_MIN, PER_PAGE_MAX), PER_PAGE_MAX);
    }
}
