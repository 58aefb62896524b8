use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::engine::word::{Category, CategoryId};
use crate::error::LoadError;
use crate::repository::WordRepository;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub category: CategoryId,
    pub language: String,
}

impl ListKey {
    pub fn new(category: &CategoryId, language: &str) -> Self {
        Self {
            category: category.clone(),
            language: language.to_string(),
        }
    }
}

/// Memoizes repository loads by (category, language) and by language for
/// the simple-words grid.
///
/// Loads run to completion on the calling thread before the entry is
/// consulted again, so there is never more than one load per key in flight.
/// Failures are not cached: the next request for the key retries.
pub struct WordCache {
    repository: Box<dyn WordRepository>,
    targets: HashMap<ListKey, Rc<[String]>>,
    simple: HashMap<String, Rc<[Vec<String>]>>,
}

impl WordCache {
    pub fn new(repository: Box<dyn WordRepository>) -> Self {
        Self {
            repository,
            targets: HashMap::new(),
            simple: HashMap::new(),
        }
    }

    pub fn categories(&self) -> Result<Vec<Category>, LoadError> {
        self.repository.load_category_index()
    }

    pub fn target_list(
        &mut self,
        category: &CategoryId,
        language: &str,
    ) -> Result<Rc<[String]>, LoadError> {
        let key = ListKey::new(category, language);
        if let Some(list) = self.targets.get(&key) {
            return Ok(Rc::clone(list));
        }
        let list: Rc<[String]> = self
            .repository
            .load_target_category(category, language)?
            .into();
        debug!(%category, language, words = list.len(), "word list loaded");
        self.targets.insert(key, Rc::clone(&list));
        Ok(list)
    }

    pub fn simple_words(&mut self, language: &str) -> Result<Rc<[Vec<String>]>, LoadError> {
        if let Some(groups) = self.simple.get(language) {
            return Ok(Rc::clone(groups));
        }
        let groups: Rc<[Vec<String>]> = self.repository.load_simple_words(language)?.into();
        debug!(language, groups = groups.len(), "simple words loaded");
        self.simple.insert(language.to_string(), Rc::clone(&groups));
        Ok(groups)
    }

    pub fn is_cached(&self, category: &CategoryId, language: &str) -> bool {
        self.targets.contains_key(&ListKey::new(category, language))
    }
}

/// On-disk copy of fetched word lists so a remote source still works offline.
#[cfg(feature = "network")]
pub struct DiskCache {
    base_dir: std::path::PathBuf,
}

#[cfg(feature = "network")]
impl DiskCache {
    pub fn new(subdir: &str) -> Option<Self> {
        let base = dirs::cache_dir()?.join("cuecard").join(subdir);
        std::fs::create_dir_all(&base).ok()?;
        Some(Self { base_dir: base })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.base_dir.join(Self::sanitize_key(key));
        std::fs::read_to_string(path).ok()
    }

    pub fn put(&self, key: &str, content: &str) -> bool {
        let path = self.base_dir.join(Self::sanitize_key(key));
        std::fs::write(path, content).is_ok()
    }

    fn sanitize_key(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}
