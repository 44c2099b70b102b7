// HTTP prediction client using reqwest.
//
// Sends `POST <endpoint>` with a JSON body `{"text": ...}` and maps every
// outcome (success, non-2xx status, transport failure, undecodable body)
// into a `Result<Prediction, PredictError>`. One call, one request; nothing
// is retried.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use tracing::debug;

use super::{PredictError, Prediction, Predictor};
use crate::config::Config;

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

// ---------------------------------------------------------------------------
// PredictionClient
// ---------------------------------------------------------------------------

/// Stateless client for the remote classification endpoint.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl PredictionClient {
    /// Create a client for `endpoint`. `timeout` bounds the whole request,
    /// from connecting to reading the body.
    pub fn new(endpoint: Url, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, endpoint })
    }

    /// Build a client from the `[endpoint]` section of the config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.endpoint.url.clone(), config.endpoint.timeout)
    }

    async fn send(&self, text: &str) -> Result<Prediction, PredictError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&PredictRequest { text })
            .send()
            .await
            .map_err(|e| PredictError::Unreachable(describe_transport_error(&e)))?;

        let status = response.status();
        debug!(status = status.as_u16(), "prediction response received");
        if !status.is_success() {
            return Err(PredictError::HttpStatus {
                status: status.as_u16(),
            });
        }

        // Headers arrived but the body could not be read: the connection
        // dropped mid-response, which is a transport failure.
        let body = response
            .text()
            .await
            .map_err(|e| PredictError::Unreachable(describe_transport_error(&e)))?;

        parse_prediction(&body)
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict(&self, text: &str) -> Result<Prediction, PredictError> {
        self.send(text).await
    }
}

// ---------------------------------------------------------------------------
// Response parsing helpers
// ---------------------------------------------------------------------------

/// Decode a success body.
///
/// Expected shape: `{ "prediction": "joy", "advice": "..." }`. Extra fields
/// are ignored; a missing or non-string `prediction`/`advice` is malformed.
pub(crate) fn parse_prediction(body: &str) -> Result<Prediction, PredictError> {
    serde_json::from_str::<Prediction>(body)
        .map_err(|e| PredictError::MalformedResponse(e.to_string()))
}

/// Short description of a reqwest transport error for diagnostics.
fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("transport error: {err}")
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
