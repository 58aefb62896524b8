pub mod cache;
pub mod embedded;
pub mod memory;
#[cfg(feature = "network")]
pub mod remote;

use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::engine::word::{Category, CategoryId};
use crate::error::LoadError;

/// Source of word lists. Every call may fail; a failure is reported as a
/// `LoadError`, never as an empty list.
pub trait WordRepository {
    fn load_category_index(&self) -> Result<Vec<Category>, LoadError>;

    fn load_target_category(
        &self,
        category: &CategoryId,
        language: &str,
    ) -> Result<Vec<String>, LoadError>;

    /// Reference grid: ordered groups of ordered words.
    fn load_simple_words(&self, language: &str) -> Result<Vec<Vec<String>>, LoadError>;
}

impl<R: WordRepository + ?Sized> WordRepository for Rc<R> {
    fn load_category_index(&self) -> Result<Vec<Category>, LoadError> {
        (**self).load_category_index()
    }

    fn load_target_category(
        &self,
        category: &CategoryId,
        language: &str,
    ) -> Result<Vec<String>, LoadError> {
        (**self).load_target_category(category, language)
    }

    fn load_simple_words(&self, language: &str) -> Result<Vec<Vec<String>>, LoadError> {
        (**self).load_simple_words(language)
    }
}

// Layout shared by the bundled assets and the remote source.

pub(crate) const CATEGORY_INDEX_PATH: &str = "categories.json";

pub(crate) fn target_path(category: &CategoryId, language: &str) -> String {
    format!("targets/{language}/{category}.json")
}

pub(crate) fn simple_path(language: &str) -> String {
    format!("simple/{language}.json")
}

pub(crate) fn parse_list<T: DeserializeOwned>(what: &str, bytes: &[u8]) -> Result<T, LoadError> {
    serde_json::from_slice(bytes).map_err(|source| LoadError::Malformed {
        what: what.to_string(),
        source,
    })
}
