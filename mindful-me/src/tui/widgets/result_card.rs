// Result card widget: the most recent analysis.
//
// Shows the detected emotion (glyph, capitalized label, per-emotion color)
// followed by the advice text with word wrap.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use super::{panel_block, title_span};
use crate::emotion::Emotion;
use crate::tui::ViewState;

pub const TITLE: &str = "Insights & Advice";
const FALLBACK_GLYPH: &str = "😊";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(ref entry) = state.current_result else {
        let paragraph = Paragraph::new("Your analysis will appear here.")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(title_span(TITLE), Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    };

    let emotion = entry.prediction();
    let color = emotion_color(emotion);

    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", emotion_glyph(emotion))),
            Span::styled(
                display_label(emotion),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::raw(entry.advice().to_string()),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(title_span(TITLE), color));
    frame.render_widget(paragraph, area);
}

/// Display color for an emotion. Unrecognized labels render gray.
pub fn emotion_color(emotion: &Emotion) -> Color {
    match emotion {
        Emotion::Joy => Color::Rgb(245, 158, 11),
        Emotion::Sadness => Color::Rgb(59, 130, 246),
        Emotion::Anger => Color::Rgb(239, 68, 68),
        Emotion::Fear => Color::Rgb(139, 92, 246),
        Emotion::Love => Color::Rgb(236, 72, 153),
        Emotion::Surprise => Color::Rgb(6, 182, 212),
        Emotion::Neutral => Color::Rgb(107, 114, 128),
        Emotion::Other(_) => Color::Gray,
    }
}

pub fn emotion_glyph(emotion: &Emotion) -> &'static str {
    match emotion {
        Emotion::Joy => "😄",
        Emotion::Sadness => "😢",
        Emotion::Anger => "😠",
        Emotion::Fear => "😨",
        Emotion::Love => "❤",
        Emotion::Surprise => "😲",
        Emotion::Neutral => "😐",
        Emotion::Other(_) => FALLBACK_GLYPH,
    }
}

/// Known labels are capitalized; anything else is shown exactly as the
/// server sent it.
pub fn display_label(emotion: &Emotion) -> String {
    if emotion.is_known() {
        capitalize_label(emotion.as_str())
    } else {
        emotion.as_str().to_string()
    }
}

/// Uppercase the first character.
pub fn capitalize_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
