use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥80 cols: word and timer beside the category list
    Narrow, // <80 cols: everything stacked
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 80 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }
}

/// Narrator-only panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarratorPanels {
    pub word: Rect,
    pub timer: Rect,
    pub categories: Rect,
}

pub struct AppLayout {
    pub header: Rect,
    pub narrator: Option<NarratorPanels>,
    pub simple_words: Rect,
    pub notice: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, narrator: bool, category_rows: u16, footer_lines: u16) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(footer_lines),
            ])
            .split(area);

        let (narrator, simple_words) = if narrator {
            let (panels, rest) = split_narrator(vertical[1], tier, category_rows + 2);
            (Some(panels), rest)
        } else {
            (None, vertical[1])
        };

        Self {
            header: vertical[0],
            narrator,
            simple_words,
            notice: vertical[2],
            footer: vertical[3],
        }
    }
}

fn split_narrator(body: Rect, tier: LayoutTier, category_height: u16) -> (NarratorPanels, Rect) {
    match tier {
        LayoutTier::Wide => {
            let top_height = category_height.max(9);
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(top_height), Constraint::Min(6)])
                .split(body);
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(rows[0]);
            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(3)])
                .split(columns[0]);
            (
                NarratorPanels {
                    word: left[0],
                    timer: left[1],
                    categories: columns[1],
                },
                rows[1],
            )
        }
        LayoutTier::Narrow => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Length(3),
                    Constraint::Length(category_height),
                    Constraint::Min(6),
                ])
                .split(body);
            (
                NarratorPanels {
                    word: rows[0],
                    timer: rows[1],
                    categories: rows[2],
                },
                rows[3],
            )
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesser_layout_has_no_narrator_panels() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 40), false, 3, 2);
        assert!(layout.narrator.is_none());
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.footer.height, 2);
    }

    #[test]
    fn wide_layout_places_categories_beside_word() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = AppLayout::new(area, true, 3, 2);
        let panels = layout.narrator.unwrap();
        assert_eq!(LayoutTier::from_area(area), LayoutTier::Wide);
        assert_eq!(panels.word.y, panels.categories.y);
        assert!(panels.categories.x > panels.word.x);
        assert!(layout.simple_words.y >= panels.timer.y + panels.timer.height);
    }

    #[test]
    fn narrow_layout_stacks_panels() {
        let area = Rect::new(0, 0, 60, 50);
        let layout = AppLayout::new(area, true, 3, 3);
        let panels = layout.narrator.unwrap();
        assert_eq!(LayoutTier::from_area(area), LayoutTier::Narrow);
        assert!(panels.timer.y > panels.word.y);
        assert!(panels.categories.y > panels.timer.y);
    }

    #[test]
    fn hints_wrap_to_width() {
        let lines = pack_hint_lines(&["[n] New", "[s] Solved", "[q] Quit"], 21);
        assert_eq!(lines, vec!["  [n] New  [s] Solved", "  [q] Quit"]);
    }

    #[test]
    fn hints_skip_empty_entries() {
        let lines = pack_hint_lines(&["", "[q] Quit"], 40);
        assert_eq!(lines, vec!["  [q] Quit"]);
    }
}
