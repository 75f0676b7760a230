// reqwest transport: JSON POST to {base_url}{api_prefix}/{endpoint}

use super::{DashboardApi, TransportError};
use crate::config::ServerConfig;
use crate::models::{Ack, ApiResponse, DropRequest, StatePayload};
use crate::version::{NAME, VERSION};
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    api_prefix: String,
}

impl HttpApi {
    pub fn new(config: &ServerConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("{}/{}", NAME, VERSION));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            api_prefix: config.api_prefix.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL of one endpoint; `api_prefix` replaces any path on `base_url`.
    pub fn endpoint(&self, name: &str) -> Result<Url, TransportError> {
        Ok(self
            .base_url
            .join(&format!("{}/{}", self.api_prefix, name))?)
    }

    async fn post<B, T>(&self, name: &str, body: Option<&B>) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(name)?;
        tracing::debug!(endpoint = name, %url, "POST");

        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(source) => Err(TransportError::Decode { source, body: text }),
        }
    }
}

impl DashboardApi for HttpApi {
    #[instrument(skip(self), fields(api = "http", operation = "fetch_state"))]
    async fn fetch_state(&self) -> Result<ApiResponse<StatePayload>, TransportError> {
        self.post::<(), _>("state", None).await
    }

    #[instrument(skip(self), fields(api = "http", operation = "trigger_rescan"))]
    async fn trigger_rescan(&self) -> Result<Ack, TransportError> {
        self.post::<(), _>("update", None).await
    }

    #[instrument(skip(self), fields(api = "http", operation = "drop_database"))]
    async fn drop_database(&self, name: &str) -> Result<Ack, TransportError> {
        let body = DropRequest {
            name: name.to_string(),
        };
        self.post("dropdb", Some(&body)).await
    }
}
