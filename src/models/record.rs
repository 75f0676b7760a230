// One database instance row, rebuilt from every state snapshot

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use super::DatabaseEntry;
use crate::format::{format_timestamp, human_size, relative_time};

/// Shown when the server does not report an owner.
pub const NO_USER: &str = "\u{2014}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseRecord {
    pub name: String,
    pub user: String,
    pub is_service: bool,
    /// Unix seconds.
    pub modified_at: i64,
    pub size_bytes: u64,
}

impl DatabaseRecord {
    pub fn size_human(&self) -> String {
        human_size(self.size_bytes)
    }

    /// Modification time in the local zone, `YYYY.MM.DD HH:mm`.
    pub fn modified_formatted(&self) -> String {
        format_timestamp(self.modified_at, &Local)
    }

    pub fn modified_relative(&self, now: DateTime<Utc>) -> String {
        relative_time(self.modified_at, now)
    }
}

impl From<DatabaseEntry> for DatabaseRecord {
    fn from(entry: DatabaseEntry) -> Self {
        Self {
            name: entry.name,
            user: entry.user.unwrap_or_else(|| NO_USER.to_string()),
            is_service: entry.service,
            modified_at: entry.modified,
            size_bytes: entry.size,
        }
    }
}
