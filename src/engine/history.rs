use crate::engine::pool::Candidate;
use crate::engine::word::{TargetWord, WordId};

/// A shown word, remembered with the category/language it was picked under
/// and its position in the category list (used to look up translations).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub word: TargetWord,
    pub id: WordId,
    pub index: usize,
}

impl From<Candidate> for HistoryEntry {
    fn from(candidate: Candidate) -> Self {
        Self {
            word: candidate.word,
            id: candidate.id,
            index: candidate.index,
        }
    }
}

/// Words shown this session with a movable cursor.
///
/// `cursor` is `None` until the first word is shown; afterwards it always
/// points at the displayed entry. Advancing while not at the head drops the
/// forward branch for good.
#[derive(Clone, Debug)]
pub struct SessionHistory<T = HistoryEntry> {
    entries: Vec<T>,
    cursor: Option<usize>,
}

impl<T> Default for SessionHistory<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }
}

impl<T> SessionHistory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, entry: T) -> &T {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(entry);
        let head = self.entries.len() - 1;
        self.cursor = Some(head);
        &self.entries[head]
    }

    pub fn back(&mut self) -> Option<&T> {
        if let Some(c) = self.cursor {
            if c > 0 {
                self.cursor = Some(c - 1);
            }
        }
        self.current()
    }

    pub fn forward(&mut self) -> Option<&T> {
        if let Some(c) = self.cursor {
            if c + 1 < self.entries.len() {
                self.cursor = Some(c + 1);
            }
        }
        self.current()
    }

    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// 1-based position of the cursor, for "3/7" style indicators.
    pub fn position(&self) -> Option<usize> {
        self.cursor.map(|c| c + 1)
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}
