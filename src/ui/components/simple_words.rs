use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use cuecard::session::view::Chip;

use crate::ui::theme::Theme;

/// The reference grid, two groups per row.
pub struct SimpleWords<'a> {
    pub groups: &'a [Vec<Chip>],
    pub theme: &'a Theme,
}

impl Widget for &SimpleWords<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("title.simple_words")))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.groups.is_empty() || inner.height == 0 {
            return;
        }

        let row_count = self.groups.len().div_ceil(2);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
            .split(inner);

        for (row_idx, pair) in self.groups.chunks(2).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[row_idx]);
            for (cell, group) in cells.iter().zip(pair) {
                render_group(group, *cell, buf, self.theme);
            }
        }
    }
}

fn render_group(group: &[Chip], area: Rect, buf: &mut Buffer, theme: &Theme) {
    let colors = &theme.colors;
    let mut spans = Vec::with_capacity(group.len() * 2);
    for chip in group {
        spans.push(Span::styled(
            chip.word.as_str(),
            Style::default().fg(colors.fg()),
        ));
        if let Some(ref translation) = chip.translation {
            spans.push(Span::styled(
                format!(" ({translation})"),
                Style::default().fg(colors.translation()),
            ));
        }
        spans.push(Span::raw("  "));
    }

    Paragraph::new(Line::from(spans))
        .block(Block::bordered().border_style(Style::default().fg(colors.accent_dim())))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
