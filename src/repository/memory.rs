use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::engine::word::{Category, CategoryId};
use crate::error::LoadError;
use crate::repository::{CATEGORY_INDEX_PATH, WordRepository, simple_path, target_path};

/// Word lists held in memory. Lists can be added or removed after
/// construction to simulate assets appearing or disappearing.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    categories: Vec<Category>,
    targets: RefCell<HashMap<(CategoryId, String), Vec<String>>>,
    simple: HashMap<String, Vec<Vec<String>>>,
    loads: Cell<usize>,
    index_offline: Cell<bool>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, id: &str, label: &str) -> Self {
        self.categories.push(Category::new(id, label));
        self
    }

    pub fn with_words(self, category: &str, language: &str, words: &[&str]) -> Self {
        self.insert_words(category, language, words);
        self
    }

    pub fn with_simple_words(mut self, language: &str, groups: &[&[&str]]) -> Self {
        let groups = groups
            .iter()
            .map(|group| group.iter().map(|w| w.to_string()).collect())
            .collect();
        self.simple.insert(language.to_string(), groups);
        self
    }

    pub fn insert_words(&self, category: &str, language: &str, words: &[&str]) {
        self.targets.borrow_mut().insert(
            (CategoryId::new(category), language.to_string()),
            words.iter().map(|w| w.to_string()).collect(),
        );
    }

    pub fn remove_words(&self, category: &str, language: &str) {
        self.targets
            .borrow_mut()
            .remove(&(CategoryId::new(category), language.to_string()));
    }

    /// While offline, the category index fails to load.
    pub fn set_index_offline(&self, offline: bool) {
        self.index_offline.set(offline);
    }

    /// Number of target-list loads served (successful or not).
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }
}

impl WordRepository for MemoryRepository {
    fn load_category_index(&self) -> Result<Vec<Category>, LoadError> {
        if self.index_offline.get() {
            return Err(LoadError::Fetch {
                what: CATEGORY_INDEX_PATH.to_string(),
            });
        }
        Ok(self.categories.clone())
    }

    fn load_target_category(
        &self,
        category: &CategoryId,
        language: &str,
    ) -> Result<Vec<String>, LoadError> {
        self.loads.set(self.loads.get() + 1);
        self.targets
            .borrow()
            .get(&(category.clone(), language.to_string()))
            .cloned()
            .ok_or_else(|| LoadError::not_found(target_path(category, language)))
    }

    fn load_simple_words(&self, language: &str) -> Result<Vec<Vec<String>>, LoadError> {
        self.simple
            .get(language)
            .cloned()
            .ok_or_else(|| LoadError::not_found(simple_path(language)))
    }
}
