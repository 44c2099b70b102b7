// Keyboard and paste input handling and command dispatch.
//
// Translates crossterm key and paste events into UserCommand messages sent
// to the controller, or into local ViewState mutations (history scrolling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Draft edits are applied to the local input buffer first (respecting the
/// character cap) and then forwarded as `EditText` with the full new text.
/// Returns `None` when the key was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows emits Press and Release for each keypress; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(UserCommand::Quit),
        KeyCode::Esc => Some(UserCommand::Quit),

        KeyCode::Char('u') if ctrl => {
            if view_state.input.is_empty() {
                return None;
            }
            view_state.input.clear();
            Some(view_state.edit_command())
        }

        KeyCode::Enter => Some(UserCommand::Submit),

        KeyCode::Backspace => {
            view_state.input.pop()?;
            Some(view_state.edit_command())
        }

        KeyCode::Char(c) if !ctrl && !key_event.modifiers.contains(KeyModifiers::ALT) => {
            if view_state.char_count() >= view_state.max_chars {
                return None;
            }
            view_state.input.push(c);
            Some(view_state.edit_command())
        }

        KeyCode::Up => {
            view_state.history_scroll = view_state.history_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            let max = view_state.history.len().saturating_sub(1);
            view_state.history_scroll = (view_state.history_scroll + 1).min(max);
            None
        }

        _ => None,
    }
}

/// Handle a bracketed paste: insert the pasted text, line breaks included,
/// up to the character cap. Carriage returns are normalized to `\n`.
pub fn handle_paste(text: &str, view_state: &mut ViewState) -> Option<UserCommand> {
    let room = view_state.max_chars.saturating_sub(view_state.char_count());
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let before = view_state.input.len();
    view_state.input.extend(normalized.chars().take(room));
    if view_state.input.len() == before {
        return None;
    }
    Some(view_state.edit_command())
}
