use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use cuecard::session::view::WordDisplay;

use crate::ui::theme::Theme;

pub struct WordCard<'a> {
    pub word: Option<&'a WordDisplay>,
    pub category_label: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> WordCard<'a> {
    pub fn new(word: Option<&'a WordDisplay>, category_label: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            word,
            category_label,
            theme,
        }
    }
}

impl Widget for &WordCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut block = Block::bordered()
            .title(format!(" {} ", t!("title.word")))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        if let Some(label) = self.category_label {
            block = block.title_bottom(Line::from(format!(" {label} ")).right_aligned());
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from("")];
        match self.word {
            Some(word) => {
                lines.push(Line::from(Span::styled(
                    word.text.as_str(),
                    Style::default()
                        .fg(colors.word())
                        .add_modifier(Modifier::BOLD),
                )));
                if let Some(ref translation) = word.translation {
                    lines.push(Line::from(Span::styled(
                        translation.as_str(),
                        Style::default().fg(colors.translation()),
                    )));
                }
            }
            None => lines.push(Line::from(Span::styled(
                t!("header.no_word").to_string(),
                Style::default().fg(colors.muted()),
            ))),
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
