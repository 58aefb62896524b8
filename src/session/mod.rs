pub mod command;
pub mod view;

use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::engine::history::{HistoryEntry, SessionHistory};
use crate::engine::pool::{Candidate, CategorySource, SelectionPool};
use crate::engine::solved::{Mark, SolvedTracker};
use crate::engine::timer::{Timer, TimerSignal};
use crate::engine::word::{Category, CategoryId, WordId};
use crate::repository::WordRepository;
use crate::repository::cache::WordCache;
use crate::settings::{DEFAULT_LANGUAGE, Role, Settings, SettingsStore, valid_minutes};
use crate::store::KeyValueStore;

use self::command::SessionCommand;
use self::view::{CategoryCount, Chip, Notice, SessionTotals, View, WordDisplay};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordOutcome {
    Shown(HistoryEntry),
    PoolExhausted,
}

/// One run of the game: settings, solved words, history, timer and word
/// lists, owned in one place and handed to whoever needs them.
pub struct Session {
    languages: Vec<String>,
    categories: Vec<Category>,
    settings: Settings,
    settings_store: SettingsStore,
    solved: SolvedTracker,
    history: SessionHistory,
    timer: Timer,
    words: WordCache,
    rng: SmallRng,
    load_failures: BTreeSet<CategoryId>,
    index_loaded: bool,
}

impl Session {
    /// `languages` is the configured language list; the first entry is the
    /// base language that word identities are taken from.
    pub fn new(
        repository: Box<dyn WordRepository>,
        store: Rc<dyn KeyValueStore>,
        languages: Vec<String>,
    ) -> Self {
        let languages = if languages.is_empty() {
            vec![DEFAULT_LANGUAGE.to_string()]
        } else {
            languages
        };

        let words = WordCache::new(repository);
        let (categories, index_loaded) = match words.categories() {
            Ok(categories) => (categories, true),
            Err(err) => {
                warn!(error = %err, "category index unavailable");
                (Vec::new(), false)
            }
        };

        let settings_store = SettingsStore::new(Rc::clone(&store));
        let mut settings = settings_store.load();
        settings.normalize(&languages);

        let solved = SolvedTracker::load(store);
        info!(
            categories = categories.len(),
            solved = solved.len(),
            language = %settings.language,
            "session started"
        );

        Self {
            languages,
            categories,
            settings,
            settings_store,
            solved,
            history: SessionHistory::new(),
            timer: Timer::new(),
            words,
            rng: SmallRng::from_entropy(),
            load_failures: BTreeSet::new(),
            index_loaded,
        }
    }

    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn base_language(&self) -> &str {
        &self.languages[0]
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn solved(&self) -> &SolvedTracker {
        &self.solved
    }

    /// Categories that failed to load during the last pick.
    pub fn load_failures(&self) -> &BTreeSet<CategoryId> {
        &self.load_failures
    }

    /// True while the category index has never loaded.
    pub fn index_unavailable(&self) -> bool {
        !self.index_loaded
    }

    /// Retries the category index until it loads once.
    fn ensure_categories(&mut self) -> bool {
        if self.index_loaded {
            return true;
        }
        match self.words.categories() {
            Ok(categories) => {
                info!(categories = categories.len(), "category index loaded");
                self.categories = categories;
                self.index_loaded = true;
            }
            Err(err) => {
                warn!(error = %err, "category index still unavailable");
            }
        }
        self.index_loaded
    }

    // --- selection ---

    /// Uniform pick over the enabled categories in the current language,
    /// excluding solved words. `None` means the pool is empty or the
    /// category index could not be loaded.
    pub fn pick(&mut self) -> Option<Candidate> {
        self.load_failures.clear();
        if !self.ensure_categories() {
            return None;
        }
        let language = self.settings.language.clone();
        let base = self.base_language().to_string();

        let mut lists = Vec::new();
        for category in self.enabled_category_ids() {
            let words = self.list(&category, &language);
            let base_words = if language == base {
                words.clone()
            } else {
                self.list(&category, &base)
            };
            if let (Some(words), Some(base_words)) = (words, base_words) {
                lists.push((category, words, base_words));
            }
        }

        let pool = SelectionPool::build(
            lists
                .iter()
                .map(|(category, words, base_words)| CategorySource {
                    category,
                    language: &language,
                    words: &words[..],
                    base_words: &base_words[..],
                }),
            |id| self.solved.is_solved(id),
        );
        debug!(size = pool.len(), %language, "pool built");
        pool.pick(&mut self.rng).cloned()
    }

    pub fn new_word(&mut self) -> WordOutcome {
        let Some(candidate) = self.pick() else {
            info!("no words left");
            return WordOutcome::PoolExhausted;
        };
        info!(word = %candidate.id, language = %candidate.word.language, "new word");
        let entry = self.history.advance(candidate.into()).clone();
        self.restart_timer();
        WordOutcome::Shown(entry)
    }

    /// Retires the displayed word and moves on. No-op without a current word.
    pub fn mark_solved(&mut self) -> Option<WordOutcome> {
        let id = self.history.current()?.id.clone();
        if self.solved.mark_solved(id.clone()) {
            info!(word = %id, "solved");
        }
        Some(self.new_word())
    }

    pub fn prev(&mut self) -> Option<&HistoryEntry> {
        debug!(cursor = ?self.history.cursor(), "history back");
        self.history.back()
    }

    pub fn next(&mut self) -> Option<&HistoryEntry> {
        debug!(cursor = ?self.history.cursor(), "history forward");
        self.history.forward()
    }

    pub fn undo_last(&mut self) -> Option<Mark> {
        let mark = self.solved.undo_last()?;
        info!(word = %mark.word(), "solve undone");
        Some(mark)
    }

    pub fn undo_all(&mut self) -> usize {
        let cleared = self.solved.undo_all();
        info!(cleared, "all solved words cleared");
        cleared
    }

    // --- settings ---

    /// Returns the new enabled state, or `None` for an unknown category.
    pub fn toggle_category(&mut self, category: &CategoryId) -> Option<bool> {
        self.ensure_categories();
        if !self.categories.iter().any(|c| &c.id == category) {
            return None;
        }
        let enabled = if self.settings.enabled_categories.remove(category) {
            false
        } else {
            self.settings.enabled_categories.insert(category.clone());
            true
        };
        debug!(%category, enabled, "category toggled");
        self.save_settings();
        Some(enabled)
    }

    pub fn set_role(&mut self, role: Role) {
        self.settings.role = role;
        debug!(role = role.as_str(), "role changed");
        self.save_settings();
    }

    pub fn toggle_role(&mut self) {
        self.set_role(self.settings.role.toggled());
    }

    pub fn set_language(&mut self, language: &str) -> bool {
        if !self.is_language(language) {
            return false;
        }
        self.settings.language = language.to_string();
        self.save_settings();
        true
    }

    pub fn cycle_language(&mut self) {
        let next = self.next_language(&self.settings.language);
        self.set_language(&next);
    }

    pub fn set_second_language(&mut self, language: &str) -> bool {
        if !self.is_language(language) {
            return false;
        }
        self.settings.second_language = language.to_string();
        self.save_settings();
        true
    }

    pub fn cycle_second_language(&mut self) {
        let next = self.next_language(&self.settings.second_language);
        self.set_second_language(&next);
    }

    pub fn set_second_language_enabled(&mut self, enabled: bool) {
        self.settings.second_language_enabled = enabled;
        self.save_settings();
    }

    pub fn set_timer_enabled(&mut self, enabled: bool) {
        self.settings.timer_enabled = enabled;
        if !enabled {
            self.timer.reset();
        }
        self.save_settings();
    }

    pub fn set_timer_minutes(&mut self, minutes: u32) -> bool {
        if !valid_minutes(minutes) {
            return false;
        }
        self.settings.timer_minutes = minutes;
        self.save_settings();
        true
    }

    fn save_settings(&self) {
        if let Err(err) = self.settings_store.save(&self.settings) {
            warn!(error = %err, "failed to persist settings");
        }
    }

    fn is_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    fn next_language(&self, current: &str) -> String {
        let idx = self.languages.iter().position(|l| l == current).unwrap_or(0);
        self.languages[(idx + 1) % self.languages.len()].clone()
    }

    // --- timer ---

    /// Starts a countdown of the configured length. Does nothing while the
    /// timer is switched off.
    pub fn start_timer(&mut self) -> Option<Notice> {
        if !self.settings.timer_enabled {
            debug!("timer disabled, start ignored");
            return None;
        }
        match self.timer.start(self.settings.timer_seconds()) {
            TimerSignal::Expired => Some(Notice::TimeUp),
            TimerSignal::Display(_) => None,
        }
    }

    /// Pauses a running countdown or resumes a paused one.
    pub fn pause_timer(&mut self) -> bool {
        self.timer.toggle_pause()
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub fn poll_timer(&mut self, now: Instant) -> Option<Notice> {
        let signals = self.timer.poll(now);
        if signals.contains(&TimerSignal::Expired) {
            info!("time is up");
            Some(Notice::TimeUp)
        } else {
            None
        }
    }

    fn restart_timer(&mut self) {
        self.timer.reset();
        if self.settings.timer_enabled {
            self.timer.start(self.settings.timer_seconds());
        }
    }

    // --- display ---

    pub fn current_display(&mut self) -> Option<WordDisplay> {
        let entry = self.history.current()?.clone();
        let language = self.settings.language.clone();
        let text = self
            .translate(&entry, &language)
            .unwrap_or_else(|| entry.word.text.clone());
        let translation = if self.settings.second_language_enabled {
            let second = self.settings.second_language.clone();
            self.translate(&entry, &second)
        } else {
            None
        };
        Some(WordDisplay {
            text,
            translation,
            category: entry.word.category,
        })
    }

    /// The entry's text in `language`, looked up by list position.
    pub fn translate(&mut self, entry: &HistoryEntry, language: &str) -> Option<String> {
        if entry.word.language == language {
            return Some(entry.word.text.clone());
        }
        let list = self.words.target_list(&entry.word.category, language).ok()?;
        list.get(entry.index).filter(|t| !t.is_empty()).cloned()
    }

    /// Per-category `(available/total)` and the total over enabled ones.
    pub fn category_counts(&mut self) -> (Vec<CategoryCount>, SessionTotals) {
        let base = self.base_language().to_string();
        let categories = self.categories.clone();
        let mut counts = Vec::with_capacity(categories.len());
        let mut totals = SessionTotals::default();

        for category in categories {
            let enabled = self.settings.enabled_categories.contains(&category.id);
            let (available, total, load_failed) =
                match self.words.target_list(&category.id, &base) {
                    Ok(list) => {
                        let available = list
                            .iter()
                            .filter(|text| {
                                !self
                                    .solved
                                    .is_solved(&WordId::new(category.id.clone(), text))
                            })
                            .count();
                        (available, list.len(), false)
                    }
                    Err(_) => (0, 0, true),
                };
            if enabled {
                totals.available += available;
                totals.total += total;
            }
            counts.push(CategoryCount {
                category,
                enabled,
                available,
                total,
                load_failed,
            });
        }

        (counts, totals)
    }

    pub fn simple_words(&mut self) -> Vec<Vec<Chip>> {
        let language = self.settings.language.clone();
        let primary = match self.words.simple_words(&language) {
            Ok(groups) => groups,
            Err(err) => {
                warn!(%language, error = %err, "simple words unavailable");
                return Vec::new();
            }
        };
        let secondary = if self.settings.second_language_enabled {
            let second = self.settings.second_language.clone();
            self.words.simple_words(&second).ok()
        } else {
            None
        };

        primary
            .iter()
            .enumerate()
            .map(|(group_idx, group)| {
                group
                    .iter()
                    .enumerate()
                    .map(|(word_idx, word)| Chip {
                        word: word.clone(),
                        translation: secondary
                            .as_deref()
                            .and_then(|groups| lookup_translation(groups, group_idx, word_idx)),
                    })
                    .collect()
            })
            .collect()
    }

    /// Push the full state to the view. Guessers never receive the word.
    pub fn render(&mut self, view: &mut dyn View) {
        view.show_role(self.settings.role);
        let word = if self.settings.role.is_narrator() {
            self.current_display()
        } else {
            None
        };
        view.show_word(word.as_ref());
        view.show_timer(&self.timer.display());
        let (counts, totals) = self.category_counts();
        view.show_counts(&counts, &totals);
        view.show_simple_words(&self.simple_words());
    }

    /// Dispatch a view event.
    pub fn apply(&mut self, command: SessionCommand) -> Option<Notice> {
        match command {
            SessionCommand::NewWord => {
                let outcome = self.new_word();
                self.outcome_notice(&outcome)
            }
            SessionCommand::MarkSolved => {
                let outcome = self.mark_solved()?;
                self.outcome_notice(&outcome)
            }
            SessionCommand::PrevWord => {
                self.prev();
                None
            }
            SessionCommand::NextWord => {
                self.next();
                None
            }
            SessionCommand::UndoLast => {
                self.undo_last();
                None
            }
            SessionCommand::UndoAll => {
                self.undo_all();
                None
            }
            SessionCommand::ToggleCategory(category) => {
                self.toggle_category(&category);
                None
            }
            SessionCommand::SetRole(role) => {
                self.set_role(role);
                None
            }
            SessionCommand::ToggleRole => {
                self.toggle_role();
                None
            }
            SessionCommand::SetLanguage(language) => {
                self.set_language(&language);
                None
            }
            SessionCommand::CycleLanguage => {
                self.cycle_language();
                None
            }
            SessionCommand::SetSecondLanguage(language) => {
                self.set_second_language(&language);
                None
            }
            SessionCommand::CycleSecondLanguage => {
                self.cycle_second_language();
                None
            }
            SessionCommand::SetSecondLanguageEnabled(enabled) => {
                self.set_second_language_enabled(enabled);
                None
            }
            SessionCommand::ToggleSecondLanguage => {
                self.set_second_language_enabled(!self.settings.second_language_enabled);
                None
            }
            SessionCommand::StartTimer => self.start_timer(),
            SessionCommand::PauseTimer => {
                self.pause_timer();
                None
            }
            SessionCommand::ResetTimer => {
                self.reset_timer();
                None
            }
            SessionCommand::SetTimerEnabled(enabled) => {
                self.set_timer_enabled(enabled);
                None
            }
            SessionCommand::ToggleTimerEnabled => {
                self.set_timer_enabled(!self.settings.timer_enabled);
                None
            }
            SessionCommand::SetTimerMinutes(minutes) => {
                self.set_timer_minutes(minutes);
                None
            }
        }
    }

    fn outcome_notice(&self, outcome: &WordOutcome) -> Option<Notice> {
        if !self.index_loaded {
            return Some(Notice::IndexUnavailable);
        }
        let failed = self.load_failures.iter().next().cloned().map(Notice::LoadFailed);
        match outcome {
            WordOutcome::PoolExhausted => failed.or(Some(Notice::NoWordsLeft)),
            WordOutcome::Shown(_) => failed,
        }
    }

    fn enabled_category_ids(&self) -> Vec<CategoryId> {
        self.categories
            .iter()
            .filter(|c| self.settings.enabled_categories.contains(&c.id))
            .map(|c| c.id.clone())
            .collect()
    }

    fn list(&mut self, category: &CategoryId, language: &str) -> Option<Rc<[String]>> {
        match self.words.target_list(category, language) {
            Ok(list) => Some(list),
            Err(err) => {
                warn!(%category, language, error = %err, "word list unavailable");
                self.load_failures.insert(category.clone());
                None
            }
        }
    }
}

fn lookup_translation(groups: &[Vec<String>], group_idx: usize, word_idx: usize) -> Option<String> {
    groups
        .get(group_idx)?
        .get(word_idx)
        .filter(|word| !word.is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::timer::TimerPhase;
    use crate::repository::memory::MemoryRepository;
    use crate::store::MemoryStore;
    use crate::store::schema::SETTINGS_KEY;

    fn languages() -> Vec<String> {
        vec!["en".into(), "es".into(), "ru".into()]
    }

    fn repo() -> MemoryRepository {
        MemoryRepository::new()
            .with_category("easy", "Easy")
            .with_category("hard", "Hard")
            .with_words("easy", "en", &["Apple", "Chair"])
            .with_words("easy", "es", &["Manzana", "Silla"])
            .with_words("easy", "ru", &["Яблоко", "Стул"])
            .with_words("hard", "en", &["Democracy"])
            .with_words("hard", "es", &["Democracia"])
            .with_simple_words("en", &[&["person", "place"], &["do", "go"]])
            .with_simple_words("es", &[&["persona", "lugar"], &["hacer"]])
    }

    fn session_with(repo: MemoryRepository, store: Rc<MemoryStore>) -> Session {
        Session::new(Box::new(repo), store, languages()).with_rng(SmallRng::seed_from_u64(3))
    }

    fn session() -> Session {
        session_with(repo(), Rc::new(MemoryStore::new()))
    }

    fn shown(outcome: WordOutcome) -> HistoryEntry {
        match outcome {
            WordOutcome::Shown(entry) => entry,
            WordOutcome::PoolExhausted => panic!("expected a word"),
        }
    }

    #[derive(Default)]
    struct RecordingView {
        role: Option<Role>,
        word: Option<WordDisplay>,
        timer: String,
        totals: SessionTotals,
        counts: Vec<CategoryCount>,
        groups: Vec<Vec<Chip>>,
    }

    impl View for RecordingView {
        fn show_role(&mut self, role: Role) {
            self.role = Some(role);
        }
        fn show_word(&mut self, word: Option<&WordDisplay>) {
            self.word = word.cloned();
        }
        fn show_timer(&mut self, display: &str) {
            self.timer = display.to_string();
        }
        fn show_counts(&mut self, counts: &[CategoryCount], totals: &SessionTotals) {
            self.counts = counts.to_vec();
            self.totals = *totals;
        }
        fn show_simple_words(&mut self, groups: &[Vec<Chip>]) {
            self.groups = groups.to_vec();
        }
        fn notify(&mut self, _notice: &Notice) {}
    }

    #[test]
    fn default_settings_enable_easy() {
        let session = session();
        assert_eq!(session.base_language(), "en");
        assert!(
            session
                .settings()
                .enabled_categories
                .contains(&CategoryId::new("easy"))
        );
    }

    #[test]
    fn new_word_lands_in_history() {
        let mut session = session();
        let entry = shown(session.new_word());
        assert_eq!(session.history().current(), Some(&entry));
        assert_eq!(entry.word.category, CategoryId::new("easy"));
    }

    #[test]
    fn mark_solved_without_word_is_noop() {
        let mut session = session();
        assert!(session.mark_solved().is_none());
        assert!(session.solved().is_empty());
    }

    #[test]
    fn words_picked_in_spanish_keep_english_identity() {
        let mut session = session();
        session.set_language("es");
        let entry = shown(session.new_word());
        assert_eq!(entry.word.language, "es");
        assert!(["Manzana", "Silla"].contains(&entry.word.text.as_str()));
        assert!(["Apple", "Chair"].contains(&entry.id.text()));
    }

    #[test]
    fn solved_in_one_language_is_solved_in_all() {
        let mut session = session();
        let first = shown(session.new_word());
        session.mark_solved();

        session.set_language("ru");
        for _ in 0..10 {
            if let WordOutcome::Shown(entry) = session.new_word() {
                assert_ne!(entry.id, first.id);
            }
        }
    }

    #[test]
    fn display_follows_current_language_and_translation() {
        let mut session = session();
        let entry = shown(session.new_word());
        let idx = entry.index;

        session.set_language("es");
        session.set_second_language("ru");
        session.set_second_language_enabled(true);

        let display = session.current_display().unwrap();
        assert_eq!(display.text, ["Manzana", "Silla"][idx]);
        assert_eq!(display.translation.as_deref(), Some(["Яблоко", "Стул"][idx]));
    }

    #[test]
    fn translation_hidden_when_disabled_or_missing() {
        let mut session = session();
        session.set_second_language("ru");
        session.toggle_category(&CategoryId::new("easy"));
        session.toggle_category(&CategoryId::new("hard"));
        shown(session.new_word());

        assert_eq!(session.current_display().unwrap().translation, None);

        // "hard" has no Russian list at all
        session.set_second_language_enabled(true);
        let display = session.current_display().unwrap();
        assert_eq!(display.text, "Democracy");
        assert_eq!(display.translation, None);
    }

    #[test]
    fn counts_reflect_solved_words() {
        let mut session = session();
        shown(session.new_word());
        session.mark_solved();

        let (counts, totals) = session.category_counts();
        let easy = counts.iter().find(|c| c.category.id.as_str() == "easy").unwrap();
        assert_eq!((easy.available, easy.total), (1, 2));
        assert_eq!(easy.label(), "Easy (1/2)");
        let hard = counts.iter().find(|c| c.category.id.as_str() == "hard").unwrap();
        assert!(!hard.enabled);
        // Only enabled categories count towards the session total
        assert_eq!(totals, SessionTotals { available: 1, total: 2 });
    }

    #[test]
    fn simple_words_pair_translations_by_position() {
        let mut session = session();
        session.set_second_language_enabled(true);
        let groups = session.simple_words();

        assert_eq!(groups[0][1].word, "place");
        assert_eq!(groups[0][1].translation.as_deref(), Some("lugar"));
        assert_eq!(groups[1][0].translation.as_deref(), Some("hacer"));
        assert_eq!(groups[1][1].translation, None);
    }

    #[test]
    fn simple_words_missing_language_renders_empty() {
        let mut session = session();
        session.set_language("ru");
        assert!(session.simple_words().is_empty());
    }

    #[test]
    fn unknown_categories_and_languages_are_rejected() {
        let mut session = session();
        assert_eq!(session.toggle_category(&CategoryId::new("nope")), None);
        assert!(!session.set_language("de"));
        assert_eq!(session.settings().language, "en");
        assert!(!session.set_timer_minutes(0));
    }

    #[test]
    fn cycle_language_wraps() {
        let mut session = session();
        session.cycle_language();
        assert_eq!(session.settings().language, "es");
        session.cycle_language();
        session.cycle_language();
        assert_eq!(session.settings().language, "en");
    }

    #[test]
    fn every_setting_change_is_saved() {
        let store = Rc::new(MemoryStore::new());
        let mut session = session_with(repo(), Rc::clone(&store));

        session.toggle_category(&CategoryId::new("hard"));
        session.set_role(Role::Guesser);
        session.set_timer_minutes(5);

        let saved: Settings = serde_json::from_str(&store.get(SETTINGS_KEY).unwrap()).unwrap();
        assert_eq!(&saved, session.settings());
        assert_eq!(saved.timer_minutes, 5);
        assert_eq!(saved.role, Role::Guesser);
    }

    #[test]
    fn new_word_starts_timer_when_enabled() {
        let mut session = session();
        shown(session.new_word());
        assert_eq!(session.timer().phase(), TimerPhase::Idle);

        session.set_timer_enabled(true);
        session.set_timer_minutes(2);
        shown(session.new_word());
        assert_eq!(session.timer().phase(), TimerPhase::Running);
        assert_eq!(session.timer().remaining(), 120);
    }

    #[test]
    fn disabling_timer_resets_it() {
        let mut session = session();
        session.set_timer_enabled(true);
        shown(session.new_word());
        session.set_timer_enabled(false);
        assert_eq!(session.timer().phase(), TimerPhase::Idle);
    }

    #[test]
    fn prev_and_next_leave_timer_alone() {
        let mut session = session();
        session.set_timer_enabled(true);
        shown(session.new_word());
        shown(session.new_word());
        session.pause_timer();

        session.prev();
        assert_eq!(session.timer().phase(), TimerPhase::Paused);
        session.next();
        assert_eq!(session.history().position(), Some(2));
    }

    #[test]
    fn missing_list_is_reported_and_skipped() {
        let repo = repo();
        repo.remove_words("hard", "en");
        let mut session = session_with(repo, Rc::new(MemoryStore::new()));
        session.toggle_category(&CategoryId::new("hard"));

        let notice = session.apply(SessionCommand::NewWord);
        assert_eq!(notice, Some(Notice::LoadFailed(CategoryId::new("hard"))));
        let current = session.history().current().unwrap();
        assert_eq!(current.word.category, CategoryId::new("easy"));
    }

    #[test]
    fn exhausted_pool_reports_no_words_left() {
        let mut session = session();
        session.toggle_category(&CategoryId::new("easy"));
        assert_eq!(
            session.apply(SessionCommand::NewWord),
            Some(Notice::NoWordsLeft)
        );
        assert!(session.history().is_empty());
    }

    #[test]
    fn missing_index_is_reported_and_retried() {
        let repo = Rc::new(repo());
        repo.set_index_offline(true);
        let mut session = Session::new(
            Box::new(Rc::clone(&repo)),
            Rc::new(MemoryStore::new()),
            languages(),
        )
        .with_rng(SmallRng::seed_from_u64(3));
        assert!(session.index_unavailable());

        assert_eq!(
            session.apply(SessionCommand::NewWord),
            Some(Notice::IndexUnavailable)
        );
        assert!(session.history().is_empty());

        repo.set_index_offline(false);
        assert!(session.apply(SessionCommand::NewWord).is_none());
        assert!(!session.index_unavailable());
        assert_eq!(session.categories().len(), 2);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn toggle_retries_missing_index() {
        let repo = Rc::new(repo());
        repo.set_index_offline(true);
        let mut session = Session::new(
            Box::new(Rc::clone(&repo)),
            Rc::new(MemoryStore::new()),
            languages(),
        );
        assert_eq!(session.toggle_category(&CategoryId::new("hard")), None);

        repo.set_index_offline(false);
        assert_eq!(session.toggle_category(&CategoryId::new("hard")), Some(true));
    }

    #[test]
    fn start_is_ignored_while_timer_is_off() {
        let mut session = session();
        assert!(session.start_timer().is_none());
        assert_eq!(session.timer().phase(), TimerPhase::Idle);
        assert_eq!(session.timer().display(), "");

        session.set_timer_enabled(true);
        assert!(session.apply(SessionCommand::StartTimer).is_none());
        assert_eq!(session.timer().phase(), TimerPhase::Running);
    }

    #[test]
    fn undo_after_remarking_keeps_the_earlier_solve() {
        let mut session = session();
        let first = shown(session.new_word());
        session.mark_solved();
        session.prev();
        session.mark_solved();
        assert!(session.solved().is_solved(&first.id));

        let undone = session.undo_last().unwrap();
        assert_eq!(undone, Mark::Repeated(first.id.clone()));
        assert!(session.solved().is_solved(&first.id));
    }

    #[test]
    fn guessers_never_receive_the_word() {
        let mut session = session();
        shown(session.new_word());
        session.apply(SessionCommand::ToggleRole);

        let mut view = RecordingView::default();
        session.render(&mut view);
        assert_eq!(view.role, Some(Role::Guesser));
        assert!(view.word.is_none());
        assert!(!view.groups.is_empty());
    }

    #[test]
    fn render_pushes_full_state() {
        let mut session = session();
        session.set_timer_enabled(true);
        let entry = shown(session.new_word());

        let mut view = RecordingView::default();
        session.render(&mut view);
        assert_eq!(view.word.unwrap().text, entry.word.text);
        assert_eq!(view.timer, "1:00");
        assert_eq!(view.counts.len(), 2);
        assert_eq!(view.totals.total, 2);
        assert_eq!(view.groups.len(), 2);
    }
}
