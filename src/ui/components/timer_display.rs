use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;

pub struct TimerDisplay<'a> {
    pub clock: &'a str,
    pub enabled: bool,
    pub minutes: u32,
    pub theme: &'a Theme,
}

impl Widget for &TimerDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let setting = if self.enabled {
            format!("{} min", self.minutes)
        } else {
            t!("header.timer_off").to_string()
        };
        let block = Block::bordered()
            .title(format!(" {} ({setting}) ", t!("title.timer")))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let style = if self.clock == "0:00" {
            Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
        };
        let clock = if self.clock.is_empty() { "-:--" } else { self.clock };
        Paragraph::new(Line::from(Span::styled(clock, style)))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
