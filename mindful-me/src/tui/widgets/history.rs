// History panel widget: recorded entries, newest first.
//
// Each entry takes two rows: local time and emotion label, then the
// start of the original text.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use super::result_card::{display_label, emotion_color, emotion_glyph};
use super::{panel_block, title_span};
use crate::history::{entries_recorded, Entry};
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = panel_block(
        Line::from(vec![
            title_span("History"),
            Span::styled(
                format!("{} ", entries_recorded(state.history_len)),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Color::DarkGray,
    );

    if state.history.is_empty() {
        let paragraph = Paragraph::new("No entries yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders and the trailing space on each line.
    let text_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = state
        .history
        .iter()
        .skip(state.history_scroll)
        .map(|entry| entry_item(entry, text_width))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn entry_item(entry: &Entry, text_width: usize) -> ListItem<'static> {
    let emotion = entry.prediction();
    let time = entry.created_at().with_timezone(&Local).format("%H:%M");

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(format!("{} ", time), Style::default().fg(Color::Gray)),
            Span::raw(format!("{} ", emotion_glyph(emotion))),
            Span::styled(
                display_label(emotion),
                Style::default()
                    .fg(emotion_color(emotion))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(
            format!("  {}", truncate(entry.original_text(), text_width)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Shorten to at most `width` characters, ending with an ellipsis if cut.
pub fn truncate(text: &str, width: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        return flat;
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = flat.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use crate::history::EntryId;
    use std::sync::Arc;

    fn entry(id: u64, emotion: Emotion, text: &str) -> Entry {
        Entry::new(EntryId(id), emotion, "advice".into(), text.into())
    }

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate("feeling fine", 20), "feeling fine");
    }

    #[test]
    fn truncate_long_text_adds_ellipsis() {
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("abcdefghij", 0), "");
    }

    #[test]
    fn truncate_flattens_newlines() {
        assert_eq!(truncate("line one\nline two", 40), "line one line two");
    }

    #[test]
    fn render_title_shows_count() {
        let backend = ratatui::backend::TestBackend::new(50, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::new(500);
        state.history = Arc::new(vec![
            entry(2, Emotion::Anger, "Stuck in traffic for two hours"),
            entry(1, Emotion::Other("bored".into()), "Nothing happened today at all"),
        ]);
        state.history_len = 2;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let top: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains("2 entries recorded"));
    }

    #[test]
    fn render_does_not_panic_when_scrolled_past_end() {
        let backend = ratatui::backend::TestBackend::new(30, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::new(500);
        state.history = Arc::new(vec![entry(1, Emotion::Joy, "A lovely sunny afternoon")]);
        state.history_len = 1;
        state.history_scroll = 5;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
