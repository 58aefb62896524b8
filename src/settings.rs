use std::collections::BTreeSet;
use std::rc::Rc;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::engine::word::CategoryId;
use crate::store::KeyValueStore;
use crate::store::schema::SETTINGS_KEY;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_SECOND_LANGUAGE: &str = "es";
pub const DEFAULT_CATEGORY: &str = "easy";
pub const DEFAULT_TIMER_MINUTES: u32 = 1;
pub const MAX_TIMER_MINUTES: u32 = 60;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Narrator,
    Guesser,
}

impl Role {
    pub fn toggled(self) -> Self {
        match self {
            Role::Narrator => Role::Guesser,
            Role::Guesser => Role::Narrator,
        }
    }

    /// Only the narrator sees the word, the timer and the controls.
    pub fn is_narrator(self) -> bool {
        self == Role::Narrator
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Narrator => "narrator",
            Role::Guesser => "guesser",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub language: String,
    pub second_language_enabled: bool,
    pub second_language: String,
    pub timer_enabled: bool,
    pub timer_minutes: u32,
    pub enabled_categories: BTreeSet<CategoryId>,
    pub role: Role,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            second_language_enabled: false,
            second_language: DEFAULT_SECOND_LANGUAGE.to_string(),
            timer_enabled: false,
            timer_minutes: DEFAULT_TIMER_MINUTES,
            enabled_categories: [CategoryId::new(DEFAULT_CATEGORY)].into_iter().collect(),
            role: Role::Narrator,
        }
    }
}

impl Settings {
    /// Build settings from a stored JSON value. Every field that is missing
    /// or malformed falls back to its default on its own; anything that is
    /// not an object yields all defaults.
    pub fn from_json(value: &Value) -> Self {
        let defaults = Settings::default();
        let Some(map) = value.as_object() else {
            debug!("settings blob is not an object, using defaults");
            return defaults;
        };

        Self {
            language: field(map, "language")
                .filter(|l: &String| !l.trim().is_empty())
                .unwrap_or(defaults.language),
            second_language_enabled: field(map, "secondLanguageEnabled")
                .unwrap_or(defaults.second_language_enabled),
            second_language: field(map, "secondLanguage")
                .filter(|l: &String| !l.trim().is_empty())
                .unwrap_or(defaults.second_language),
            timer_enabled: field(map, "timerEnabled").unwrap_or(defaults.timer_enabled),
            timer_minutes: field(map, "timerMinutes")
                .filter(|m: &u32| valid_minutes(*m))
                .unwrap_or(defaults.timer_minutes),
            enabled_categories: field(map, "enabledCategories")
                .unwrap_or(defaults.enabled_categories),
            role: field(map, "role").unwrap_or(defaults.role),
        }
    }

    /// Reset languages that are not among `languages` to the defaults.
    pub fn normalize(&mut self, languages: &[String]) {
        let known = |lang: &str| languages.iter().any(|l| l == lang);
        if !known(&self.language) {
            debug!(language = %self.language, "unknown language, resetting");
            self.language = fallback_language(languages, DEFAULT_LANGUAGE);
        }
        if !known(&self.second_language) {
            debug!(language = %self.second_language, "unknown second language, resetting");
            self.second_language = fallback_language(languages, DEFAULT_SECOND_LANGUAGE);
        }
    }

    pub fn timer_seconds(&self) -> u32 {
        self.timer_minutes.saturating_mul(60)
    }
}

pub fn valid_minutes(minutes: u32) -> bool {
    (1..=MAX_TIMER_MINUTES).contains(&minutes)
}

fn fallback_language(languages: &[String], preferred: &str) -> String {
    if languages.iter().any(|l| l == preferred) {
        preferred.to_string()
    } else {
        languages
            .first()
            .cloned()
            .unwrap_or_else(|| preferred.to_string())
    }
}

fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(key, error = %err, "invalid setting replaced with default");
            None
        }
    }
}

/// Sole reader and writer of the `settings` key.
pub struct SettingsStore {
    store: Rc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Never fails: a missing or corrupt blob yields defaults.
    pub fn load(&self) -> Settings {
        let Some(raw) = self.store.get(SETTINGS_KEY) else {
            return Settings::default();
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Settings::from_json(&value),
            Err(err) => {
                warn!(error = %err, "settings unreadable, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        self.store.put(SETTINGS_KEY, &json)
    }
}
