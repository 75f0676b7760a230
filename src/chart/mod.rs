// Per-user usage chart: projection of the record list and sync with the surface

mod terminal;

pub use terminal::{TerminalChart, UserShare};

use crate::models::DatabaseRecord;
use serde::Serialize;

/// Name of the dataset handle the surface's transform pipeline reads from.
pub const DATASET: &str = "databases";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub user: String,
    pub size_bytes: u64,
}

/// External visualization. It owns aggregation by user and percentages;
/// this side only feeds it raw rows.
pub trait ChartSurface {
    /// Clear `dataset` and insert `rows`.
    fn replace_dataset(&mut self, dataset: &str, rows: Vec<ChartRow>);

    /// Schedule a re-render; does not wait for it.
    fn request_render(&mut self);

    /// The host surface became visible and should recompute its dimensions.
    fn viewport_changed(&mut self);
}

/// One row per non-service record, in record order.
pub fn project(records: &[DatabaseRecord]) -> Vec<ChartRow> {
    records
        .iter()
        .filter(|r| !r.is_service)
        .map(|r| ChartRow {
            user: r.user.clone(),
            size_bytes: r.size_bytes,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ChartSync {
    available: bool,
    requested: bool,
}

impl ChartSync {
    pub fn new(requested: bool) -> Self {
        Self {
            available: false,
            requested,
        }
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn requested(&self) -> bool {
        self.requested
    }

    pub fn visible(&self) -> bool {
        self.available && self.requested
    }

    /// Pushes the projection of `records` to `surface`. An empty projection only
    /// hides the chart; the last rendered frame stays as it was.
    pub fn sync<C: ChartSurface>(&mut self, records: &[DatabaseRecord], surface: &mut C) {
        let was_visible = self.visible();
        let rows = project(records);

        if rows.is_empty() {
            self.available = false;
            tracing::debug!(operation = "chart_sync", "no chartable records; chart hidden");
            return;
        }

        let count = rows.len();
        surface.replace_dataset(DATASET, rows);
        surface.request_render();
        self.available = true;
        tracing::debug!(operation = "chart_sync", rows = count, "chart dataset replaced");

        if !was_visible && self.visible() {
            surface.viewport_changed();
        }
    }

    pub fn set_requested<C: ChartSurface>(&mut self, requested: bool, surface: &mut C) {
        let was_visible = self.visible();
        self.requested = requested;
        if !was_visible && self.visible() {
            surface.viewport_changed();
        }
    }
}
