use rust_i18n::t;

use crate::engine::word::{Category, CategoryId};
use crate::settings::Role;

/// The word as it should be displayed right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordDisplay {
    pub text: String,
    /// Absent when the second language is off or has no counterpart; the
    /// view hides the secondary line.
    pub translation: Option<String>,
    pub category: CategoryId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub enabled: bool,
    pub available: usize,
    pub total: usize,
    pub load_failed: bool,
}

impl CategoryCount {
    /// `Easy (3/12)`
    pub fn label(&self) -> String {
        format!("{} ({}/{})", self.category.label, self.available, self.total)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionTotals {
    pub available: usize,
    pub total: usize,
}

/// One entry of the simple-words grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chip {
    pub word: String,
    pub translation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    TimeUp,
    NoWordsLeft,
    LoadFailed(CategoryId),
    IndexUnavailable,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::TimeUp => t!("notice.time_up").to_string(),
            Notice::NoWordsLeft => t!("notice.no_words_left").to_string(),
            Notice::LoadFailed(category) => {
                t!("notice.load_failed", category = category.as_str()).to_string()
            }
            Notice::IndexUnavailable => t!("notice.index_unavailable").to_string(),
        }
    }
}

/// Render target driven by [`Session::render`](crate::session::Session::render).
pub trait View {
    fn show_role(&mut self, role: Role);
    fn show_word(&mut self, word: Option<&WordDisplay>);
    fn show_timer(&mut self, display: &str);
    fn show_counts(&mut self, counts: &[CategoryCount], totals: &SessionTotals);
    fn show_simple_words(&mut self, groups: &[Vec<Chip>]);
    fn notify(&mut self, notice: &Notice);
}
