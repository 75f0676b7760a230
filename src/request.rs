// Request lifecycle: idle/loading/succeeded/failed plus the two failure kinds

use crate::api::TransportError;
use serde::Serialize;

/// Recorded when a failure envelope arrives without a message.
pub const MISSING_FAILURE_MESSAGE: &str = "server reported failure without a message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestPhase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Well-formed response with `success = false`.
    #[error("{message}")]
    Application { message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RequestError {
    pub fn application(message: Option<String>) -> Self {
        RequestError::Application {
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| MISSING_FAILURE_MESSAGE.to_string()),
        }
    }
}

/// Shared status of the last completed (or in-flight) request.
/// `error_message` is `Some` exactly when `phase` is `Failed`; fields are private to keep it so.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestState {
    phase: RequestPhase,
    error_message: Option<String>,
}

impl RequestState {
    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RequestPhase::Loading
    }

    pub fn is_error(&self) -> bool {
        self.phase == RequestPhase::Failed
    }

    pub fn begin(&mut self) {
        self.phase = RequestPhase::Loading;
        self.error_message = None;
    }

    pub fn succeed(&mut self) {
        self.phase = RequestPhase::Succeeded;
        self.error_message = None;
    }

    pub fn fail(&mut self, error: &RequestError) {
        self.phase = RequestPhase::Failed;
        self.error_message = Some(error.to_string());
    }
}

/// Monotonic issue counter for one call site; a response is current only if
/// nothing was issued after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.issued
    }
}
