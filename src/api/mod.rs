// Server API seam: the three POST endpoints the dashboard consumes

mod http;

pub use http::HttpApi;

use crate::models::{Ack, ApiResponse, StatePayload};
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    /// Non-2xx status; the message is the raw body when there is one.
    #[error("{}", status_message(*.status, .body))]
    Status { status: u16, body: String },
    /// Body was not the expected JSON envelope.
    #[error("invalid response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    /// Envelope decoded but is missing required content.
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

fn status_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

/// Transport for the dashboard endpoints. Implementations only move bytes;
/// the lifecycle and state effects live in [`crate::dashboard::Dashboard`].
pub trait DashboardApi {
    /// `POST state`
    fn fetch_state(
        &self,
    ) -> impl Future<Output = Result<ApiResponse<StatePayload>, TransportError>> + Send;

    /// `POST update`
    fn trigger_rescan(&self) -> impl Future<Output = Result<Ack, TransportError>> + Send;

    /// `POST dropdb` with `{ "name": name }`
    fn drop_database(&self, name: &str)
    -> impl Future<Output = Result<Ack, TransportError>> + Send;
}
