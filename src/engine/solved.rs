use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::engine::word::WordId;
use crate::store::KeyValueStore;
use crate::store::schema::{SOLVED_KEY, SolvedSnapshot};

/// One entry of the undo stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    /// The word became solved; undoing removes it.
    Added(WordId),
    /// The word was already solved; undoing leaves the set alone.
    Repeated(WordId),
}

impl Mark {
    pub fn word(&self) -> &WordId {
        match self {
            Mark::Added(id) | Mark::Repeated(id) => id,
        }
    }
}

/// Permanently retired words plus an undo stack of this session's marks.
///
/// Sole writer of the `solved` key. The set is rehydrated on load; the undo
/// stack is not persisted, so only marks made since startup can be undone.
pub struct SolvedTracker {
    solved: BTreeSet<WordId>,
    undo_stack: Vec<Mark>,
    store: Rc<dyn KeyValueStore>,
}

impl SolvedTracker {
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let solved = match store.get(SOLVED_KEY) {
            Some(raw) => match serde_json::from_str::<SolvedSnapshot>(&raw) {
                Ok(snapshot) => snapshot
                    .words
                    .into_iter()
                    .map(WordId::normalized)
                    .collect(),
                Err(err) => {
                    warn!(error = %err, "solved snapshot unreadable, starting empty");
                    BTreeSet::new()
                }
            },
            None => BTreeSet::new(),
        };
        debug!(count = solved.len(), "solved words loaded");

        Self {
            solved,
            undo_stack: Vec::new(),
            store,
        }
    }

    /// Returns false when the word was already solved. Every mark is pushed
    /// onto the undo stack, so one undo always reverts exactly one mark.
    pub fn mark_solved(&mut self, id: WordId) -> bool {
        if !self.solved.insert(id.clone()) {
            self.undo_stack.push(Mark::Repeated(id));
            return false;
        }
        self.undo_stack.push(Mark::Added(id));
        self.persist();
        true
    }

    pub fn undo_last(&mut self) -> Option<Mark> {
        let mark = self.undo_stack.pop()?;
        if let Mark::Added(id) = &mark {
            self.solved.remove(id);
            self.persist();
        }
        Some(mark)
    }

    /// Clears every solved word, including ones restored from storage.
    pub fn undo_all(&mut self) -> usize {
        let cleared = self.solved.len();
        self.solved.clear();
        self.undo_stack.clear();
        self.persist();
        cleared
    }

    pub fn is_solved(&self, id: &WordId) -> bool {
        self.solved.contains(id)
    }

    pub fn len(&self) -> usize {
        self.solved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solved.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordId> {
        self.solved.iter()
    }

    fn persist(&self) {
        let snapshot = SolvedSnapshot {
            words: self.solved.iter().cloned().collect(),
        };
        let result = serde_json::to_string(&snapshot)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.put(SOLVED_KEY, &json));
        if let Err(err) = result {
            warn!(error = %err, "failed to persist solved words");
        }
    }
}
