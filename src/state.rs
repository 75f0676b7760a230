// Dashboard root state and the values derived from it.
// Derivations are computed on every call; nothing here is cached.

use crate::format::human_size;
use crate::models::{DatabaseRecord, StatePayload};
use crate::request::RequestState;
use serde::Serialize;

/// Usage classification against the soft/hard thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdZone {
    Nominal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub disk_used_bytes: u64,
    pub disk_capacity_bytes: u64,
    pub soft_threshold_bytes: u64,
    pub hard_threshold_bytes: u64,
    pub records: Vec<DatabaseRecord>,
    pub request: RequestState,
}

impl DashboardState {
    /// Replaces metrics and records wholesale from a snapshot. Order is the server's;
    /// callers re-apply the active sort.
    pub fn apply_snapshot(&mut self, payload: StatePayload) {
        self.disk_used_bytes = payload.disk_used;
        self.disk_capacity_bytes = payload.disk_capacity;
        self.soft_threshold_bytes = payload.soft_threshold;
        self.hard_threshold_bytes = payload.hard_threshold;
        self.records = payload
            .databases
            .into_iter()
            .map(DatabaseRecord::from)
            .collect();
    }

    /// Removes the record called `name` and subtracts its size from the used bytes.
    /// Returns the removed record, or `None` if it is no longer listed.
    pub fn remove_record(&mut self, name: &str) -> Option<DatabaseRecord> {
        let index = self.records.iter().position(|r| r.name == name)?;
        let removed = self.records.remove(index);
        self.disk_used_bytes = self.disk_used_bytes.saturating_sub(removed.size_bytes);
        Some(removed)
    }

    /// Percent of capacity in use; 0 when capacity is unknown.
    pub fn used_percent(&self) -> f64 {
        if self.disk_capacity_bytes == 0 {
            return 0.0;
        }
        100.0 * self.disk_used_bytes as f64 / self.disk_capacity_bytes as f64
    }

    pub fn used_percent_human(&self) -> String {
        format!("{:.0}", self.used_percent())
    }

    pub fn threshold_zone(&self) -> ThresholdZone {
        if self.disk_used_bytes >= self.hard_threshold_bytes {
            ThresholdZone::Critical
        } else if self.disk_used_bytes >= self.soft_threshold_bytes {
            ThresholdZone::Warning
        } else {
            ThresholdZone::Nominal
        }
    }

    pub fn disk_used_human(&self) -> String {
        human_size(self.disk_used_bytes)
    }

    pub fn disk_capacity_human(&self) -> String {
        human_size(self.disk_capacity_bytes)
    }

    pub fn has_results(&self) -> bool {
        !self.records.is_empty()
    }
}
