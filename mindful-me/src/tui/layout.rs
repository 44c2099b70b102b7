// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Header (3 rows)                                   |
// +-------------------------+------------------------+
// | Input box (8 rows)      | History (35%)          |
// | Action bar (1 row)      |                        |
// | Error banner (3 rows)   |                        |
// | Result card (fill)      |                        |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Title and subtitle.
    pub header: Rect,
    /// Draft text entry with character count.
    pub input: Rect,
    /// Analyze button / in-flight spinner.
    pub action: Rect,
    /// Current error, if any.
    pub error: Rect,
    /// Current result: emotion label and advice.
    pub result: Rect,
    /// Right column: past entries, newest first.
    pub history: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: header(3) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    let header = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    // Horizontal: main column (65%) | history (35%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(middle);

    let main = horizontal[0];
    let history = horizontal[1];

    let main_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(main);

    AppLayout {
        header,
        input: main_sections[0],
        action: main_sections[1],
        error: main_sections[2],
        result: main_sections[3],
        history,
        help_bar,
    }
}
