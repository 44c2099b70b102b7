// Help bar widget: keyboard shortcut hints.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const HINTS: &str = " Enter:Analyze | Ctrl+U:Clear | ↑/↓:History | Esc:Quit";

pub fn render(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        HINTS,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
