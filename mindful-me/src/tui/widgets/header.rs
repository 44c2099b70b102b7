// Header widget: app title and tagline.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const TITLE: &str = "Mindful Me";
pub const TAGLINE: &str = "Understand and reflect on your emotional patterns";

pub fn render(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Rgb(139, 92, 246))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled(TAGLINE, Style::default().fg(Color::Gray)),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}
