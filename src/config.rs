use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::settings::DEFAULT_LANGUAGE;
use crate::store::json_store::default_data_dir;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configured languages; the first one is the base language.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub words_url: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "es".to_string(), "ru".to_string()]
}
fn default_tick_rate_ms() -> u64 {
    100
}
fn default_log_filter() -> String {
    "info".to_string()
}
fn default_theme() -> String {
    "midnight".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            tick_rate_ms: default_tick_rate_ms(),
            log_filter: default_log_filter(),
            data_dir: None,
            words_url: None,
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.normalize_languages();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cuecard")
    }

    /// Where settings, solved words and the log live.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn base_language(&self) -> &str {
        self.languages
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Trim and dedupe language codes, keeping first occurrences. An empty
    /// list falls back to the defaults.
    pub fn normalize_languages(&mut self) {
        let mut seen = Vec::with_capacity(self.languages.len());
        for lang in &self.languages {
            let lang = lang.trim().to_lowercase();
            if !lang.is_empty() && !seen.contains(&lang) {
                seen.push(lang);
            }
        }
        self.languages = if seen.is_empty() {
            default_languages()
        } else {
            seen
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_language(), "en");
        assert_eq!(config.tick_rate_ms, 100);
        assert!(config.words_url.is_none());
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
languages = ["ru", "en"]
log_filter = "cuecard=debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_language(), "ru");
        assert_eq!(config.log_filter, "cuecard=debug");
        assert_eq!(config.theme, "midnight");
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            languages: vec!["es".into(), "en".into()],
            data_dir: Some(dir.path().join("data")),
            words_url: Some("https://example.org/words".into()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "languages = 3").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_normalize_languages_dedupes_and_trims() {
        let mut config = Config {
            languages: vec![" EN".into(), "es".into(), "en".into(), "".into()],
            ..Config::default()
        };
        config.normalize_languages();
        assert_eq!(config.languages, vec!["en", "es"]);
    }

    #[test]
    fn test_normalize_languages_empty_resets() {
        let mut config = Config {
            languages: Vec::new(),
            ..Config::default()
        };
        config.normalize_languages();
        assert_eq!(config.languages, default_languages());
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/cuecard-test")),
            ..Config::default()
        };
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/cuecard-test"));
        assert!(Config::default().data_dir().ends_with("cuecard"));
    }
}
