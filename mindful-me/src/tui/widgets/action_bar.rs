// Action bar widget: the analyze hint, or a spinner while a request runs.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = if state.phase.is_in_flight() {
        Line::from(vec![
            Span::styled(
                format!(" {} ", spinner_glyph(state.spinner_frame)),
                Style::default().fg(Color::Rgb(139, 92, 246)),
            ),
            Span::styled("Analyzing...", Style::default().fg(Color::Gray)),
        ])
    } else {
        Line::from(vec![Span::styled(
            " Analyze Emotions (Enter) ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(139, 92, 246))
                .add_modifier(Modifier::BOLD),
        )])
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Spinner glyph for a render tick.
pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}
