// Terminal front end: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the controller's snapshot plus
// the local input buffer. The controller pushes `UiUpdate` messages over an
// mpsc channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use crossterm::execute;
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use crate::history::Entry;
use crate::protocol::{InteractionError, InteractionSnapshot, Phase, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the controller state for rendering.
///
/// Updated incrementally via `UiUpdate` messages. The `render_frame`
/// function reads this struct to draw the screen.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Text in the input box. Edited locally; replaced only on `DraftReset`.
    pub input: String,
    /// Draft revision from the last `DraftReset`, sent with every edit.
    pub draft_revision: u64,
    /// Input cap in characters.
    pub max_chars: usize,
    pub phase: Phase,
    pub current_result: Option<Entry>,
    pub last_error: Option<InteractionError>,
    /// Newest first.
    pub history: Arc<Vec<Entry>>,
    pub history_len: usize,
    /// Advances on every render tick while a request is in flight.
    pub spinner_frame: usize,
    /// Index of the first history entry shown.
    pub history_scroll: usize,
}

impl ViewState {
    pub fn new(max_chars: usize) -> Self {
        ViewState {
            input: String::new(),
            draft_revision: 0,
            max_chars,
            phase: Phase::Idle,
            current_result: None,
            last_error: None,
            history: Arc::default(),
            history_len: 0,
            spinner_frame: 0,
            history_scroll: 0,
        }
    }

    /// Number of characters in the input buffer.
    pub fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Command replacing the controller's draft with the input buffer.
    pub fn edit_command(&self) -> UserCommand {
        UserCommand::EditText {
            text: self.input.clone(),
            revision: self.draft_revision,
        }
    }

    /// Apply a full state snapshot from the controller.
    ///
    /// The draft text is not copied: keystrokes may be ahead of the
    /// controller, so the input buffer only follows `DraftReset`.
    pub fn apply_snapshot(&mut self, snapshot: InteractionSnapshot) {
        self.phase = snapshot.phase;
        self.current_result = snapshot.current_result;
        self.last_error = snapshot.last_error;
        self.history = snapshot.history;
        self.history_len = snapshot.history_len;
        self.history_scroll = self
            .history_scroll
            .min(self.history.len().saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::PhaseChanged(phase) => {
            if phase.is_in_flight() && !state.phase.is_in_flight() {
                state.spinner_frame = 0;
            }
            state.phase = phase;
        }
        UiUpdate::DraftReset { text, revision } => {
            state.input = text;
            state.draft_revision = revision;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete screen.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::header::render(frame, layout.header);
    widgets::input_box::render(frame, layout.input, state);
    widgets::action_bar::render(frame, layout.action, state);
    widgets::error_banner::render(frame, layout.error, state);
    widgets::result_card::render(frame, layout.result, state);
    widgets::history::render(frame, layout.history, state);
    widgets::help_bar::render(frame, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    max_chars: usize,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = execute!(stdout(), EnableBracketedPaste) {
        warn!("Bracketed paste unavailable: {}", e);
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(max_chars);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Controller gone: nothing left to drive the screen.
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                let command = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => input::handle_key(key_event, &mut view_state),
                    Some(Ok(Event::Paste(text))) => input::handle_paste(&text, &mut view_state),
                    // Resize and mouse events are picked up by the next draw.
                    Some(Ok(_)) => None,
                    Some(Err(e)) => break Err(anyhow::Error::from(e)),
                    None => break Ok(()),
                };
                if let Some(cmd) = command {
                    let quit = cmd == UserCommand::Quit;
                    if cmd_tx.send(cmd).await.is_err() {
                        warn!("Controller channel closed; leaving TUI");
                        break Ok(());
                    }
                    if quit {
                        break Ok(());
                    }
                }
            }

            _ = render_tick.tick() => {
                if view_state.phase.is_in_flight() {
                    view_state.spinner_frame = view_state.spinner_frame.wrapping_add(1);
                }
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    let _ = execute!(stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use crate::history::EntryId;
    use crate::predict::PredictError;
    use crate::validate::ValidationError;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn entry(id: u64, emotion: Emotion) -> Entry {
        Entry::new(
            EntryId(id),
            emotion,
            "Take a short walk and notice your breathing.".into(),
            "I had a really long day at work".into(),
        )
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn view_state_new_is_empty() {
        let state = ViewState::new(500);
        assert!(state.input.is_empty());
        assert_eq!(state.max_chars, 500);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.current_result.is_none());
        assert!(state.last_error.is_none());
        assert!(state.history.is_empty());
        assert_eq!(state.spinner_frame, 0);
    }

    #[test]
    fn apply_snapshot_keeps_local_input() {
        let mut state = ViewState::new(500);
        state.input = "typed ahead of the controller".into();

        let snapshot = InteractionSnapshot {
            draft_text: "typed ahead".into(),
            phase: Phase::InFlight,
            current_result: Some(entry(1, Emotion::Joy)),
            last_error: None,
            history: Arc::new(vec![entry(1, Emotion::Joy)]),
            history_len: 1,
        };
        state.apply_snapshot(snapshot);

        assert_eq!(state.input, "typed ahead of the controller");
        assert_eq!(state.phase, Phase::InFlight);
        assert_eq!(state.history_len, 1);
        assert!(state.current_result.is_some());
    }

    #[test]
    fn apply_snapshot_clamps_scroll() {
        let mut state = ViewState::new(500);
        state.history_scroll = 7;
        state.apply_snapshot(InteractionSnapshot {
            history: Arc::new(vec![entry(2, Emotion::Fear), entry(1, Emotion::Joy)]),
            history_len: 2,
            ..Default::default()
        });
        assert_eq!(state.history_scroll, 1);
    }

    #[test]
    fn apply_ui_update_draft_reset() {
        let mut state = ViewState::new(500);
        state.input = "old draft".into();
        apply_ui_update(
            &mut state,
            UiUpdate::DraftReset {
                text: String::new(),
                revision: 3,
            },
        );
        assert!(state.input.is_empty());
        assert_eq!(state.draft_revision, 3);
    }

    #[test]
    fn edits_after_reset_carry_new_revision() {
        let mut state = ViewState::new(500);
        state.input = "typed before the reset".into();
        assert_eq!(
            state.edit_command(),
            UserCommand::EditText {
                text: "typed before the reset".into(),
                revision: 0,
            }
        );

        apply_ui_update(
            &mut state,
            UiUpdate::DraftReset {
                text: String::new(),
                revision: 1,
            },
        );
        state.input.push('a');
        assert_eq!(
            state.edit_command(),
            UserCommand::EditText {
                text: "a".into(),
                revision: 1,
            }
        );
    }

    #[test]
    fn apply_ui_update_phase_resets_spinner_on_dispatch() {
        let mut state = ViewState::new(500);
        state.spinner_frame = 42;
        apply_ui_update(&mut state, UiUpdate::PhaseChanged(Phase::InFlight));
        assert_eq!(state.phase, Phase::InFlight);
        assert_eq!(state.spinner_frame, 0);

        state.spinner_frame = 5;
        apply_ui_update(&mut state, UiUpdate::PhaseChanged(Phase::InFlight));
        assert_eq!(state.spinner_frame, 5);
    }

    #[test]
    fn apply_ui_update_state_snapshot() {
        let mut state = ViewState::new(500);
        let snapshot = InteractionSnapshot {
            last_error: Some(InteractionError::Validation(ValidationError::TooShort)),
            ..Default::default()
        };
        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(snapshot)));
        assert_eq!(
            state.last_error,
            Some(InteractionError::Validation(ValidationError::TooShort))
        );
    }

    #[test]
    fn render_frame_empty_state() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let state = ViewState::new(500);
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Mindful Me"));
        assert!(text.contains("0/500 characters"));
        assert!(text.contains("0 entries recorded"));
    }

    #[test]
    fn render_frame_with_result_and_error() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut state = ViewState::new(500);
        state.current_result = Some(entry(2, Emotion::Sadness));
        state.history = Arc::new(vec![entry(2, Emotion::Sadness), entry(1, Emotion::Joy)]);
        state.history_len = 2;
        state.last_error = Some(InteractionError::Remote(PredictError::HttpStatus {
            status: 503,
        }));
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Insights & Advice"));
        assert!(text.contains("Unable to connect"));
        assert!(text.contains("2 entries recorded"));
    }

    #[test]
    fn render_frame_tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        let mut state = ViewState::new(500);
        state.phase = Phase::InFlight;
        state.current_result = Some(entry(1, Emotion::Other("bored".into())));
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
