use std::time::Instant;

use tracing::debug;

use cuecard::engine::word::CategoryId;
use cuecard::session::Session;
use cuecard::session::command::SessionCommand;
use cuecard::session::view::{CategoryCount, Chip, Notice, SessionTotals, View, WordDisplay};
use cuecard::settings::Role;

use crate::ui::theme::Theme;

/// Last state pushed by the session; the render pass reads only this.
#[derive(Clone, Debug, Default)]
pub struct ScreenModel {
    pub role: Role,
    pub word: Option<WordDisplay>,
    pub timer: String,
    pub counts: Vec<CategoryCount>,
    pub totals: SessionTotals,
    pub groups: Vec<Vec<Chip>>,
    pub notice: Option<Notice>,
}

impl View for ScreenModel {
    fn show_role(&mut self, role: Role) {
        self.role = role;
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

    fn notify(&mut self, notice: &Notice) {
        self.notice = Some(notice.clone());
    }
}

pub struct App {
    pub session: Session,
    pub screen: ScreenModel,
    pub theme: &'static Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, theme: &'static Theme) -> Self {
        let mut app = Self {
            session,
            screen: ScreenModel::default(),
            theme,
            should_quit: false,
        };
        app.sync_locale();
        app.refresh();
        app
    }

    pub fn dispatch(&mut self, command: SessionCommand) {
        debug!(?command, "command");
        let language = self.session.settings().language.clone();
        self.screen.notice = None;

        if let Some(notice) = self.session.apply(command) {
            self.screen.notify(&notice);
        }
        if self.session.settings().language != language {
            self.sync_locale();
        }
        self.refresh();
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(notice) = self.session.poll_timer(now) {
            self.screen.notify(&notice);
        }
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.session.render(&mut self.screen);
    }

    /// Category behind toggle key `n` (1-based, index order).
    pub fn category_at(&self, n: usize) -> Option<CategoryId> {
        let idx = n.checked_sub(1)?;
        self.session.categories().get(idx).map(|c| c.id.clone())
    }

    fn sync_locale(&self) {
        rust_i18n::set_locale(&self.session.settings().language);
    }
}
