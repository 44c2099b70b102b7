// Interaction controller and orchestration loop.
//
// The controller is the only owner of mutable interaction state. It validates
// the draft, dispatches at most one prediction request at a time on a spawned
// task, and applies the settlement when it comes back over the prediction
// channel. Every change is pushed to observers as `UiUpdate`s.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::emotion::Emotion;
use crate::history::{Entry, EntryId, HistoryStore};
use crate::predict::{PredictError, Prediction, Predictor};
use crate::protocol::{InteractionError, InteractionSnapshot, Phase, UiUpdate, UserCommand};
use crate::validate::{validate, ValidationError};

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Process-local interaction state. Created idle and empty; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub draft_text: String,
    pub phase: Phase,
    pub current_result: Option<Entry>,
    pub last_error: Option<InteractionError>,
}

/// Settlement of a dispatched request, sent back by the request task.
#[derive(Debug)]
pub struct PredictionEvent {
    pub request_id: u64,
    /// The text that was sent, which becomes the entry's original text.
    pub submitted_text: String,
    pub outcome: Result<Prediction, PredictError>,
}

/// What `submit()` did with the current draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request was started.
    Dispatched { request_id: u64 },
    /// The draft failed validation; no request was made.
    Invalid(ValidationError),
    /// A request is already in flight; nothing changed.
    Rejected,
}

// ---------------------------------------------------------------------------
// InteractionController
// ---------------------------------------------------------------------------

pub struct InteractionController {
    state: InteractionState,
    history: HistoryStore,
    /// Published copy of `history`, rebuilt on append.
    history_view: Arc<Vec<Entry>>,
    /// Bumped whenever the controller rewrites the draft itself.
    draft_revision: u64,
    predictor: Arc<dyn Predictor>,
    /// Request tasks send their settlement through a clone of this sender.
    prediction_tx: mpsc::Sender<PredictionEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    /// Id of the outstanding request, if any.
    in_flight: Option<u64>,
    last_request_id: u64,
    last_entry_id: u64,
}

impl InteractionController {
    pub fn new(
        predictor: Arc<dyn Predictor>,
        prediction_tx: mpsc::Sender<PredictionEvent>,
        ui_tx: mpsc::Sender<UiUpdate>,
    ) -> Self {
        InteractionController {
            state: InteractionState::default(),
            history: HistoryStore::new(),
            history_view: Arc::default(),
            draft_revision: 0,
            predictor,
            prediction_tx,
            ui_tx,
            in_flight: None,
            last_request_id: 0,
            last_entry_id: 0,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn in_flight_request(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn draft_revision(&self) -> u64 {
        self.draft_revision
    }

    /// Copy of the current state for observers.
    pub fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            draft_text: self.state.draft_text.clone(),
            phase: self.state.phase,
            current_result: self.state.current_result.clone(),
            last_error: self.state.last_error.clone(),
            history: Arc::clone(&self.history_view),
            history_len: self.history.size(),
        }
    }

    /// Replace the draft. Clears any displayed error. Allowed while a
    /// request is in flight; the outstanding request keeps the text it was
    /// sent with.
    pub async fn edit_text(&mut self, text: String) {
        self.state.draft_text = text;
        if self.state.last_error.take().is_some() {
            debug!("Cleared error after draft edit");
        }
        self.publish_snapshot().await;
    }

    /// Validate the draft and, if it passes, start a prediction request.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Some(request_id) = self.in_flight {
            debug!("Submit rejected: request {} still in flight", request_id);
            return SubmitOutcome::Rejected;
        }

        self.set_phase(Phase::Validating).await;
        let text = self.state.draft_text.clone();

        if let Err(reason) = validate(&text) {
            info!("Submission rejected by validation: {}", reason.code());
            self.state.last_error = Some(InteractionError::Validation(reason));
            self.set_phase(Phase::Idle).await;
            self.publish_snapshot().await;
            return SubmitOutcome::Invalid(reason);
        }

        self.state.last_error = None;
        self.state.current_result = None;

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(request_id);
        self.set_phase(Phase::InFlight).await;

        let predictor = Arc::clone(&self.predictor);
        let tx = self.prediction_tx.clone();
        let chars = text.chars().count();

        tokio::spawn(async move {
            let outcome = predictor.predict(&text).await;
            let event = PredictionEvent {
                request_id,
                submitted_text: text,
                outcome,
            };
            if tx.send(event).await.is_err() {
                debug!("Prediction channel closed before request {} settled", request_id);
            }
        });

        info!("Dispatched prediction request {} ({} chars)", request_id, chars);
        self.publish_snapshot().await;
        SubmitOutcome::Dispatched { request_id }
    }

    /// Apply the settlement of the outstanding request.
    ///
    /// Success records a new entry, makes it the current result and clears
    /// the draft. Failure records the error and leaves the draft, the
    /// current result and the history untouched. Either way the controller
    /// ends up `Idle`.
    pub async fn apply_prediction(&mut self, event: PredictionEvent) {
        if self.in_flight != Some(event.request_id) {
            warn!(
                "Discarding settlement for request {} (outstanding: {:?})",
                event.request_id, self.in_flight
            );
            return;
        }
        self.in_flight = None;

        match event.outcome {
            Ok(prediction) => {
                self.last_entry_id += 1;
                let entry = Entry::new(
                    EntryId(self.last_entry_id),
                    Emotion::from_label(&prediction.prediction),
                    prediction.advice,
                    event.submitted_text,
                );
                info!(
                    "Request {} succeeded: {} -> entry {}",
                    event.request_id,
                    entry.prediction(),
                    entry.id()
                );

                self.state.current_result = Some(entry.clone());
                let all = self.history.append(entry);
                self.history_view = Arc::new(all.iter().cloned().collect());
                self.state.draft_text.clear();
                self.draft_revision += 1;
                self.set_phase(Phase::Succeeded).await;
                let _ = self
                    .ui_tx
                    .send(UiUpdate::DraftReset {
                        text: String::new(),
                        revision: self.draft_revision,
                    })
                    .await;
            }
            Err(err) => {
                warn!(
                    kind = err.kind().code(),
                    status = err.status(),
                    "Request {} failed: {}",
                    event.request_id,
                    err
                );
                self.state.last_error = Some(InteractionError::Remote(err));
                self.set_phase(Phase::Failed).await;
            }
        }

        self.set_phase(Phase::Idle).await;
        self.publish_snapshot().await;
    }

    async fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            debug!("Phase {:?} -> {:?}", self.state.phase, phase);
        }
        self.state.phase = phase;
        let _ = self.ui_tx.send(UiUpdate::PhaseChanged(phase)).await;
    }

    pub async fn publish_snapshot(&self) {
        let _ = self
            .ui_tx
            .send(UiUpdate::StateSnapshot(Box::new(self.snapshot())))
            .await;
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the interaction loop.
///
/// Multiplexes user commands and request settlements on a single task with
/// `tokio::select!`, so every state mutation is serialized. Returns when a
/// `Quit` command arrives or the command channel closes. An outstanding
/// request is not cancelled; its settlement is simply never applied.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut prediction_rx: mpsc::Receiver<PredictionEvent>,
    mut controller: InteractionController,
) -> anyhow::Result<()> {
    info!("Interaction loop started");
    controller.publish_snapshot().await;

    // The controller holds a sender, so this only closes if it is dropped;
    // stop polling in that case rather than spinning on `None`.
    let mut predictions_open = true;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut controller, cmd).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            event = prediction_rx.recv(), if predictions_open => {
                match event {
                    Some(event) => {
                        controller.apply_prediction(event).await;
                    }
                    None => {
                        info!("Prediction channel closed");
                        predictions_open = false;
                    }
                }
            }
        }
    }

    if let Some(request_id) = controller.in_flight_request() {
        info!("Exiting with request {} still in flight", request_id);
    }
    info!("Interaction loop exiting");
    Ok(())
}

/// Handle a user command from the presentation layer.
async fn handle_user_command(controller: &mut InteractionController, cmd: UserCommand) {
    match cmd {
        UserCommand::EditText { text, revision } => {
            if revision != controller.draft_revision() {
                debug!(
                    "Dropping edit for draft revision {} (current: {})",
                    revision,
                    controller.draft_revision()
                );
                return;
            }
            controller.edit_text(text).await;
        }
        UserCommand::Submit => {
            let outcome = controller.submit().await;
            debug!("Submit outcome: {:?}", outcome);
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
