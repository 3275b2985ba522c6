use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL;
use crate::chunk::DEFAULT_MAX_CHARS;
use crate::fetch::DEFAULT_LANGUAGES;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl_secs: Option<u64>,
    pub max_chars: Option<usize>,
    pub languages: Option<Vec<String>>,
}

impl Config {
    /// Load config from ~/.config/ytchunk/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TTL)
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars.unwrap_or(DEFAULT_MAX_CHARS)
    }

    pub fn languages(&self) -> Vec<String> {
        match &self.languages {
            Some(langs) if !langs.is_empty() => langs.clone(),
            _ => DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytchunk")
        .join("config.toml")
}

/// `cache/` beside the executable, or the platform cache dir if the
/// executable path can't be resolved.
pub fn default_cache_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("cache")))
        .unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from(".cache"))
                .join("ytchunk")
                .join("transcripts")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
cache_dir = "/tmp/ytchunk"
cache_ttl_secs = 3600
max_chars = 2000
languages = ["de", "en"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/ytchunk"));
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.max_chars(), 2000);
        assert_eq!(config.languages(), vec!["de", "en"]);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.cache_dir.is_none());
        assert_eq!(config.cache_ttl(), DEFAULT_TTL);
        assert_eq!(config.max_chars(), DEFAULT_MAX_CHARS);
        assert_eq!(config.languages(), vec!["en"]);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(r#"max_chars = 500"#).unwrap();
        assert_eq!(config.max_chars(), 500);
        assert!(config.languages.is_none());
    }

    #[test]
    fn test_empty_language_list_uses_default() {
        let config: Config = toml::from_str(r#"languages = []"#).unwrap();
        assert_eq!(config.languages(), vec!["en"]);
    }

    #[test]
    fn test_default_cache_dir_named_cache() {
        assert!(default_cache_dir().ends_with("cache") || default_cache_dir().ends_with("transcripts"));
    }
}
