// JSON bodies of the state / update / dropdb endpoints (snake_case on the wire)

use serde::{Deserialize, Serialize};

/// Envelope shared by every endpoint. `result` is only present on successful `state` calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            message: None,
            result: Some(result),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            result: None,
        }
    }
}

/// Acknowledgement without payload (`update`, `dropdb`).
pub type Ack = ApiResponse<serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatePayload {
    pub disk_used: u64,
    pub disk_capacity: u64,
    pub soft_threshold: u64,
    pub hard_threshold: u64,
    #[serde(default)]
    pub databases: Vec<DatabaseEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseEntry {
    pub name: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub service: bool,
    pub modified: i64,
    pub size: u64,
}

/// Body of `dropdb`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropRequest {
    pub name: String,
}
