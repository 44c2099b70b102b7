// Messages exchanged between the interaction controller and the
// presentation layer, plus the read-only view of controller state.

use std::sync::Arc;

use thiserror::Error;

use crate::history::Entry;
use crate::predict::PredictError;
use crate::validate::ValidationError;

/// User-facing text for any remote failure.
pub const REMOTE_ERROR_MESSAGE: &str =
    "Unable to connect to the analysis server. Please try again later.";

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Position of the controller in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Checking the draft before dispatch. Never outlives `submit()`.
    Validating,
    /// A request is outstanding; further submits are rejected.
    InFlight,
    /// Result recorded; immediately followed by `Idle`.
    Succeeded,
    /// Error recorded; immediately followed by `Idle`.
    Failed,
}

impl Phase {
    pub fn is_in_flight(self) -> bool {
        self == Phase::InFlight
    }
}

// ---------------------------------------------------------------------------
// InteractionError
// ---------------------------------------------------------------------------

/// The error currently shown to the user, if any.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    #[error("prediction failed: {0}")]
    Remote(PredictError),
}

impl InteractionError {
    /// Message for display. All remote failures collapse into one generic
    /// message; the detailed kind stays available through `Remote`.
    pub fn user_message(&self) -> &'static str {
        match self {
            InteractionError::Validation(ValidationError::Empty) => {
                "Please describe how you are feeling."
            }
            InteractionError::Validation(ValidationError::TooShort) => {
                "Please provide more details (at least 10 characters)."
            }
            InteractionError::Remote(_) => REMOTE_ERROR_MESSAGE,
        }
    }

    /// Stable code: the validation reason or the remote failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            InteractionError::Validation(reason) => reason.code(),
            InteractionError::Remote(err) => err.kind().code(),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionSnapshot {
    pub draft_text: String,
    pub phase: Phase,
    pub current_result: Option<Entry>,
    pub last_error: Option<InteractionError>,
    /// Newest first. Shared with the controller; replaced only when an entry
    /// is added.
    pub history: Arc<Vec<Entry>>,
    pub history_len: usize,
}

// ---------------------------------------------------------------------------
// Channel messages
// ---------------------------------------------------------------------------

/// Commands sent from the presentation layer to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Replace the draft with the given text. `revision` is the last draft
    /// revision the sender saw; edits made before a `DraftReset` are stale
    /// and dropped.
    EditText { text: String, revision: u64 },
    /// Submit the current draft for analysis.
    Submit,
    Quit,
}

/// Change notifications pushed from the controller to its observers.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    PhaseChanged(Phase),
    StateSnapshot(Box<InteractionSnapshot>),
    /// The controller rewrote the draft itself (e.g. cleared it after a
    /// successful analysis); the input surface should adopt this text and
    /// tag further edits with `revision`.
    DraftReset { text: String, revision: u64 },
}
