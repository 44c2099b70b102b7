// Input box widget: the draft text with placeholder and character counter.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use super::{panel_block, title_span};
use crate::tui::ViewState;

pub const PLACEHOLDER: &str = "Describe how you're feeling today...";

/// Render the input box into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let busy = state.phase.is_in_flight();
    let border = if busy { Color::DarkGray } else { Color::Rgb(139, 92, 246) };

    let counter = char_count_label(state.char_count(), state.max_chars);
    let counter_style = if state.char_count() >= state.max_chars {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let block = panel_block(title_span("How are you feeling?"), border)
        .title_bottom(Line::styled(format!(" {} ", counter), counter_style).right_aligned());

    let paragraph = if state.input.is_empty() {
        Paragraph::new(PLACEHOLDER).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        // Trailing block cursor while editing is allowed.
        let cursor = if busy { "" } else { "█" };
        Paragraph::new(format!("{}{}", state.input, cursor))
    };

    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

/// Counter text, e.g. "42/500 characters".
pub fn char_count_label(count: usize, max: usize) -> String {
    format!("{}/{} characters", count, max)
}
