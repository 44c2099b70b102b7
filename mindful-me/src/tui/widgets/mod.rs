// Widget modules for each screen panel.

pub mod action_bar;
pub mod error_banner;
pub mod header;
pub mod help_bar;
pub mod history;
pub mod input_box;
pub mod result_card;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

/// Bordered panel with a bold title.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, border: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

/// Bold title span, padded for the block border.
pub fn title_span(text: impl Into<String>) -> Span<'static> {
    Span::styled(
        format!(" {} ", text.into()),
        Style::default().add_modifier(Modifier::BOLD),
    )
}
