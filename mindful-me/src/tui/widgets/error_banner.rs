// Error banner widget: shows the current error message, if any.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use super::{panel_block, title_span};
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(ref error) = state.last_error else {
        return;
    };

    let paragraph = Paragraph::new(error.user_message())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(panel_block(title_span("Error"), Color::Red));
    frame.render_widget(paragraph, area);
}
