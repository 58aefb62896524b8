use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use cuecard::session::view::{CategoryCount, SessionTotals};

use crate::ui::theme::Theme;

/// Category toggles with `(available/total)` counts. Rows are numbered for
/// the `1`..`9` toggle keys.
pub struct CategoryList<'a> {
    pub counts: &'a [CategoryCount],
    pub totals: SessionTotals,
    pub theme: &'a Theme,
}

impl Widget for &CategoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(
                " {} ({}/{}) ",
                t!("title.categories"),
                self.totals.available,
                self.totals.total
            ))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                let mark = if count.enabled { "[x]" } else { "[ ]" };
                let style = if count.load_failed {
                    Style::default().fg(colors.error())
                } else if count.enabled {
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.muted())
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), Style::default().fg(colors.accent())),
                    Span::styled(format!("{mark} {}", count.label()), style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
