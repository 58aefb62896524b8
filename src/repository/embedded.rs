use rust_embed::Embed;

use crate::engine::word::{Category, CategoryId};
use crate::error::LoadError;
use crate::repository::{
    CATEGORY_INDEX_PATH, WordRepository, parse_list, simple_path, target_path,
};

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

/// Word lists bundled into the binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedRepository;

impl EmbeddedRepository {
    pub fn new() -> Self {
        Self
    }

    /// Languages that have a simple-words grid bundled.
    pub fn available_languages() -> Vec<String> {
        let mut languages: Vec<String> = WordAssets::iter()
            .filter_map(|path| {
                path.strip_prefix("simple/")
                    .and_then(|name| name.strip_suffix(".json"))
                    .map(|lang| lang.to_string())
            })
            .collect();
        languages.sort();
        languages
    }

    fn read<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, LoadError> {
        let file = WordAssets::get(path).ok_or_else(|| LoadError::not_found(path))?;
        parse_list(path, file.data.as_ref())
    }
}

impl WordRepository for EmbeddedRepository {
    fn load_category_index(&self) -> Result<Vec<Category>, LoadError> {
        Self::read(CATEGORY_INDEX_PATH)
    }

    fn load_target_category(
        &self,
        category: &CategoryId,
        language: &str,
    ) -> Result<Vec<String>, LoadError> {
        Self::read(&target_path(category, language))
    }

    fn load_simple_words(&self, language: &str) -> Result<Vec<Vec<String>>, LoadError> {
        Self::read(&simple_path(language))
    }
}
