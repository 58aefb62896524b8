use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::word::{CategoryId, TargetWord, WordId};

/// One category's word list in the display language, paired with the same
/// list in the base language (which supplies identities, index for index).
#[derive(Clone, Copy, Debug)]
pub struct CategorySource<'a> {
    pub category: &'a CategoryId,
    pub language: &'a str,
    pub words: &'a [String],
    pub base_words: &'a [String],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub word: TargetWord,
    pub id: WordId,
    pub index: usize,
}

/// Words currently eligible for selection: enabled categories minus solved.
#[derive(Clone, Debug, Default)]
pub struct SelectionPool {
    candidates: Vec<Candidate>,
}

impl SelectionPool {
    pub fn build<'a, I, F>(sources: I, is_solved: F) -> Self
    where
        I: IntoIterator<Item = CategorySource<'a>>,
        F: Fn(&WordId) -> bool,
    {
        let mut candidates = Vec::new();
        for source in sources {
            for (index, text) in source.words.iter().enumerate() {
                // No base-language counterpart means no identity to track it by.
                let Some(base_text) = source.base_words.get(index) else {
                    continue;
                };
                let id = WordId::new(source.category.clone(), base_text);
                if is_solved(&id) {
                    continue;
                }
                candidates.push(Candidate {
                    word: TargetWord {
                        text: text.clone(),
                        language: source.language.to_string(),
                        category: source.category.clone(),
                    },
                    id,
                    index,
                });
            }
        }
        Self { candidates }
    }

    /// Uniform pick; `None` when nothing is left.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Candidate> {
        self.candidates.choose(rng)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, id: &WordId) -> bool {
        self.candidates.iter().any(|c| &c.id == id)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}
