use std::fmt;

use icu_normalizer::ComposingNormalizerBorrowed;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
}

impl Category {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: CategoryId::new(id),
            label: label.to_string(),
        }
    }
}

/// Canonical identity of a target word: its category plus its text in the
/// base language. The same logical word shown in any language maps to one id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordId {
    category: CategoryId,
    text: String,
}

impl WordId {
    pub fn new(category: CategoryId, base_text: &str) -> Self {
        Self {
            category,
            text: normalize_text(base_text),
        }
    }

    pub fn category(&self) -> &CategoryId {
        &self.category
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Re-apply normalization to an id that came from outside (persisted data).
    pub fn normalized(self) -> Self {
        Self::new(self.category, &self.text)
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.text)
    }
}

/// NFC so that composed and decomposed spellings compare equal.
fn normalize_text(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text.trim())
        .into_owned()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetWord {
    pub text: String,
    pub language: String,
    pub category: CategoryId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_with_same_category_and_text_are_equal() {
        let a = WordId::new(CategoryId::new("easy"), "Apple");
        let b = WordId::new(CategoryId::new("easy"), "Apple");
        assert_eq!(a, b);
    }

    #[test]
    fn ids_differ_across_categories() {
        let a = WordId::new(CategoryId::new("easy"), "Apple");
        let b = WordId::new(CategoryId::new("hard"), "Apple");
        assert_ne!(a, b);
    }

    #[test]
    fn decomposed_text_normalizes_to_composed() {
        // "Filosofía" with a combining acute accent
        let decomposed = WordId::new(CategoryId::new("hard"), "Filosofi\u{0301}a");
        let composed = WordId::new(CategoryId::new("hard"), "Filosofía");
        assert_eq!(decomposed, composed);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let id = WordId::new(CategoryId::new("easy"), "  Chair ");
        assert_eq!(id.text(), "Chair");
    }

    #[test]
    fn id_serializes_as_object() {
        let id = WordId::new(CategoryId::new("easy"), "Apple");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"category":"easy","text":"Apple"}"#);
    }
}
