// Remote emotion prediction: the outcome types and the `Predictor` seam the
// controller drives. The HTTP implementation lives in `client`.

pub mod client;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Decoded success body: `{"prediction": "...", "advice": "..."}`.
///
/// Fields are returned exactly as received; no interpretation of the label
/// happens at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    pub advice: String,
}

/// Coarse failure classes of a prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
    /// The server answered with a non-success status.
    HttpError,
    /// No response was obtained (DNS, refused connection, timeout).
    Unreachable,
    /// The response body did not match the expected shape.
    MalformedResponse,
}

impl RemoteErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            RemoteErrorKind::HttpError => "http_error",
            RemoteErrorKind::Unreachable => "unreachable",
            RemoteErrorKind::MalformedResponse => "malformed_response",
        }
    }
}

/// A failed prediction request. The payloads are diagnostic detail for logs,
/// not text meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl PredictError {
    pub fn kind(&self) -> RemoteErrorKind {
        match self {
            PredictError::HttpStatus { .. } => RemoteErrorKind::HttpError,
            PredictError::Unreachable(_) => RemoteErrorKind::Unreachable,
            PredictError::MalformedResponse(_) => RemoteErrorKind::MalformedResponse,
        }
    }

    /// HTTP status, when the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            PredictError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

/// Anything that can classify a piece of text.
///
/// Implementations are stateless and reentrant; keeping only one request
/// outstanding is the controller's job.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, text: &str) -> Result<Prediction, PredictError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_codes() {
        let cases = [
            (PredictError::HttpStatus { status: 500 }, "http_error"),
            (PredictError::Unreachable("refused".into()), "unreachable"),
            (PredictError::MalformedResponse("eof".into()), "malformed_response"),
        ];
        for (err, code) in cases {
            assert_eq!(err.kind().code(), code);
        }
    }

    #[test]
    fn status_only_for_http_errors() {
        assert_eq!(PredictError::HttpStatus { status: 404 }.status(), Some(404));
        assert_eq!(PredictError::Unreachable("x".into()).status(), None);
        assert_eq!(PredictError::MalformedResponse("x".into()).status(), None);
    }

    #[test]
    fn display_includes_status() {
        let msg = PredictError::HttpStatus { status: 503 }.to_string();
        assert!(msg.contains("503"), "{msg}");
    }
}
