// Dashboard controller: issues requests, applies their effects, keeps the chart in sync.
//
// All mutable state sits behind one mutex that is never held across an await, so
// every completion applies its effects in one step. Overlapping refreshes are not
// ordered: whichever response arrives last wins, unless `sequence_guard` is set.

use crate::api::{DashboardApi, TransportError};
use crate::chart::{ChartRow, ChartSurface, ChartSync, project};
use crate::config::DashboardConfig;
use crate::models::{ApiResponse, DatabaseRecord, StatePayload};
use crate::prompt::ConfirmPrompt;
use crate::request::{RequestError, RequestSequence};
use crate::sort::{SortColumn, SortSpec};
use crate::state::DashboardState;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Dropped,
    /// The operator declined; no request was sent.
    Declined,
}

pub struct Dashboard<A, C, P> {
    api: A,
    prompt: P,
    sequence_guard: bool,
    inner: Mutex<Inner<C>>,
}

struct Inner<C> {
    state: DashboardState,
    sort: SortSpec,
    chart: ChartSync,
    surface: C,
    state_requests: RequestSequence,
}

impl<C: ChartSurface> Inner<C> {
    fn resync_chart(&mut self) {
        self.chart.sync(&self.state.records, &mut self.surface);
    }
}

/// Splits an envelope into its payload or the failure it reports.
fn settle<T>(response: Result<ApiResponse<T>, TransportError>) -> Result<Option<T>, RequestError> {
    let response = response?;
    if response.success {
        Ok(response.result)
    } else {
        Err(RequestError::application(response.message))
    }
}

impl<A, C, P> Dashboard<A, C, P>
where
    A: DashboardApi,
    C: ChartSurface,
    P: ConfirmPrompt,
{
    pub fn new(api: A, surface: C, prompt: P, config: &DashboardConfig) -> Self {
        Self {
            api,
            prompt,
            sequence_guard: config.sequence_guard,
            inner: Mutex::new(Inner {
                state: DashboardState::default(),
                sort: SortSpec::default(),
                chart: ChartSync::new(config.chart_requested),
                surface,
                state_requests: RequestSequence::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_failure(&self, operation: &'static str, error: &RequestError) {
        tracing::warn!(operation, error = %error, "request failed");
        self.lock().state.request.fail(error);
    }

    /// Fetches a snapshot and, on success, replaces metrics and records, re-sorts
    /// and resyncs the chart. On failure nothing but the request state changes.
    pub async fn refresh(&self) -> Result<(), RequestError> {
        let ticket = {
            let mut inner = self.lock();
            inner.state.request.begin();
            inner.state_requests.issue()
        };
        tracing::debug!(operation = "fetch_state", ticket, "request issued");

        let outcome = settle(self.api.fetch_state().await).and_then(|payload| {
            payload.ok_or_else(|| {
                TransportError::Malformed("state response without result".into()).into()
            })
        });

        if self.sequence_guard && !self.lock().state_requests.is_latest(ticket) {
            tracing::debug!(
                operation = "fetch_state",
                ticket,
                "superseded response ignored"
            );
            return outcome.map(|_| ());
        }

        match outcome {
            Ok(payload) => {
                self.apply_state(payload);
                Ok(())
            }
            Err(e) => {
                self.record_failure("fetch_state", &e);
                Err(e)
            }
        }
    }

    fn apply_state(&self, payload: StatePayload) {
        let mut inner = self.lock();
        inner.state.apply_snapshot(payload);
        let sort = inner.sort;
        sort.apply(&mut inner.state.records);
        inner.resync_chart();
        inner.state.request.succeed();
        tracing::info!(
            operation = "fetch_state",
            databases = inner.state.records.len(),
            disk_used = inner.state.disk_used_bytes,
            disk_capacity = inner.state.disk_capacity_bytes,
            "state refreshed"
        );
    }

    /// Asks the server to rescan, then refreshes to pick up the new snapshot.
    /// Metrics are never adjusted locally here.
    pub async fn rescan(&self) -> Result<(), RequestError> {
        self.lock().state.request.begin();
        tracing::debug!(operation = "trigger_rescan", "request issued");

        match settle(self.api.trigger_rescan().await) {
            Ok(_) => {
                self.lock().state.request.succeed();
                tracing::info!(operation = "trigger_rescan", "rescan completed");
            }
            Err(e) => {
                self.record_failure("trigger_rescan", &e);
                return Err(e);
            }
        }

        self.refresh().await
    }

    /// Drops `record` after confirmation. On success the record is removed and its
    /// size subtracted from the used bytes locally, without a refresh.
    pub async fn drop_database(
        &self,
        record: &DatabaseRecord,
    ) -> Result<DropOutcome, RequestError> {
        if !self.prompt.confirm(record) {
            tracing::info!(operation = "drop_database", name = %record.name, "drop declined");
            return Ok(DropOutcome::Declined);
        }

        self.lock().state.request.begin();
        tracing::debug!(operation = "drop_database", name = %record.name, "request issued");

        match settle(self.api.drop_database(&record.name).await) {
            Ok(_) => {
                let mut inner = self.lock();
                match inner.state.remove_record(&record.name) {
                    Some(removed) => tracing::info!(
                        operation = "drop_database",
                        name = %removed.name,
                        size = removed.size_bytes,
                        "database dropped"
                    ),
                    None => tracing::debug!(
                        operation = "drop_database",
                        name = %record.name,
                        "dropped database was no longer listed"
                    ),
                }
                inner.resync_chart();
                inner.state.request.succeed();
                Ok(DropOutcome::Dropped)
            }
            Err(e) => {
                self.record_failure("drop_database", &e);
                Err(e)
            }
        }
    }

    /// Header click on `column`.
    pub fn activate_sort(&self, column: SortColumn) -> SortSpec {
        let mut inner = self.lock();
        inner.sort.activate(column);
        let sort = inner.sort;
        sort.apply(&mut inner.state.records);
        inner.resync_chart();
        sort
    }

    pub fn set_chart_requested(&self, requested: bool) {
        let mut inner = self.lock();
        let Inner { chart, surface, .. } = &mut *inner;
        chart.set_requested(requested, surface);
    }

    /// Copy of the current state.
    pub fn state(&self) -> DashboardState {
        self.lock().state.clone()
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.lock().surface)
    }

    pub fn sort(&self) -> SortSpec {
        self.lock().sort
    }

    /// Rows the chart is fed from the current records.
    pub fn chart_dataset(&self) -> Vec<ChartRow> {
        project(&self.lock().state.records)
    }

    pub fn chart_available(&self) -> bool {
        self.lock().chart.available()
    }

    pub fn chart_requested(&self) -> bool {
        self.lock().chart.requested()
    }

    pub fn chart_visible(&self) -> bool {
        self.lock().chart.visible()
    }

    /// First listed record called `name`.
    pub fn find_record(&self, name: &str) -> Option<DatabaseRecord> {
        self.lock()
            .state
            .records
            .iter()
            .find(|r| r.name == name)
            .cloned()
    }
}
