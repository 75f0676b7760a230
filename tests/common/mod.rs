// Shared test helpers: scripted API, recording chart surface, payload builders

#![allow(dead_code)]

use dbdash::api::{DashboardApi, TransportError};
use dbdash::chart::{ChartRow, ChartSurface};
use dbdash::config::DashboardConfig;
use dbdash::dashboard::Dashboard;
use dbdash::models::{Ack, ApiResponse, DatabaseEntry, StatePayload};
use dbdash::prompt::AutoConfirm;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type Reply<T> = Result<T, TransportError>;

enum Scripted<T> {
    Ready(Reply<T>),
    Gated(oneshot::Receiver<Reply<T>>),
}

#[derive(Default)]
struct Script {
    state: VecDeque<Scripted<ApiResponse<StatePayload>>>,
    rescan: VecDeque<Scripted<Ack>>,
    drop: VecDeque<Scripted<Ack>>,
    state_calls: usize,
    rescan_calls: usize,
    dropped: Vec<String>,
}

/// Replies are taken in call order at the moment a request is issued, so a
/// gated reply belongs to the request that was issued when it was at the front.
#[derive(Clone, Default)]
pub struct FakeApi {
    script: Arc<Mutex<Script>>,
}

async fn resolve<T>(next: Option<Scripted<T>>) -> Reply<T> {
    match next {
        Some(Scripted::Ready(reply)) => reply,
        Some(Scripted::Gated(rx)) => rx
            .await
            .unwrap_or_else(|_| Err(TransportError::Malformed("gate dropped".into()))),
        None => Err(TransportError::Malformed("no scripted reply".into())),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_state(&self, reply: Reply<ApiResponse<StatePayload>>) {
        self.script
            .lock()
            .unwrap()
            .state
            .push_back(Scripted::Ready(reply));
    }

    pub fn gate_state(&self) -> oneshot::Sender<Reply<ApiResponse<StatePayload>>> {
        let (tx, rx) = oneshot::channel();
        self.script
            .lock()
            .unwrap()
            .state
            .push_back(Scripted::Gated(rx));
        tx
    }

    pub fn push_rescan(&self, reply: Reply<Ack>) {
        self.script
            .lock()
            .unwrap()
            .rescan
            .push_back(Scripted::Ready(reply));
    }

    pub fn push_drop(&self, reply: Reply<Ack>) {
        self.script
            .lock()
            .unwrap()
            .drop
            .push_back(Scripted::Ready(reply));
    }

    pub fn state_calls(&self) -> usize {
        self.script.lock().unwrap().state_calls
    }

    pub fn rescan_calls(&self) -> usize {
        self.script.lock().unwrap().rescan_calls
    }

    pub fn dropped(&self) -> Vec<String> {
        self.script.lock().unwrap().dropped.clone()
    }

    pub fn pending_state_replies(&self) -> usize {
        self.script.lock().unwrap().state.len()
    }
}

impl DashboardApi for FakeApi {
    fn fetch_state(&self) -> impl Future<Output = Reply<ApiResponse<StatePayload>>> + Send {
        let next = {
            let mut script = self.script.lock().unwrap();
            script.state_calls += 1;
            script.state.pop_front()
        };
        resolve(next)
    }

    fn trigger_rescan(&self) -> impl Future<Output = Reply<Ack>> + Send {
        let next = {
            let mut script = self.script.lock().unwrap();
            script.rescan_calls += 1;
            script.rescan.pop_front()
        };
        resolve(next)
    }

    fn drop_database(&self, name: &str) -> impl Future<Output = Reply<Ack>> + Send {
        let next = {
            let mut script = self.script.lock().unwrap();
            script.dropped.push(name.to_string());
            script.drop.pop_front()
        };
        resolve(next)
    }
}

#[derive(Debug, Default)]
pub struct RecordingChart {
    pub datasets: Vec<String>,
    pub replaced: Vec<Vec<ChartRow>>,
    pub renders: usize,
    pub viewport_changes: usize,
}

impl ChartSurface for RecordingChart {
    fn replace_dataset(&mut self, dataset: &str, rows: Vec<ChartRow>) {
        self.datasets.push(dataset.to_string());
        self.replaced.push(rows);
    }

    fn request_render(&mut self) {
        self.renders += 1;
    }

    fn viewport_changed(&mut self) {
        self.viewport_changes += 1;
    }
}

pub type TestDashboard = Dashboard<FakeApi, RecordingChart, AutoConfirm>;

pub fn dashboard(api: &FakeApi) -> TestDashboard {
    dashboard_with(api, AutoConfirm(true), DashboardConfig::default())
}

pub fn dashboard_with(
    api: &FakeApi,
    prompt: AutoConfirm,
    config: DashboardConfig,
) -> TestDashboard {
    Dashboard::new(api.clone(), RecordingChart::default(), prompt, &config)
}

pub fn entry(
    name: &str,
    user: Option<&str>,
    service: bool,
    modified: i64,
    size: u64,
) -> DatabaseEntry {
    DatabaseEntry {
        name: name.into(),
        user: user.map(String::from),
        service,
        modified,
        size,
    }
}

pub fn payload(disk_used: u64, databases: Vec<DatabaseEntry>) -> StatePayload {
    StatePayload {
        disk_used,
        disk_capacity: 10_000,
        soft_threshold: 6_000,
        hard_threshold: 8_000,
        databases,
    }
}

pub fn state_ok(disk_used: u64, databases: Vec<DatabaseEntry>) -> Reply<ApiResponse<StatePayload>> {
    Ok(ApiResponse::success(payload(disk_used, databases)))
}

pub fn ack_ok() -> Reply<Ack> {
    Ok(Ack {
        success: true,
        message: None,
        result: None,
    })
}

pub fn ack_fail(message: &str) -> Reply<Ack> {
    Ok(Ack::failure(message))
}

pub fn transport_error(status: u16, body: &str) -> TransportError {
    TransportError::Status {
        status,
        body: body.into(),
    }
}

pub fn names(records: &[dbdash::models::DatabaseRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}
