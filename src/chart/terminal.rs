// Text bar chart used by the binary: sums rows per user and draws shares

use super::{ChartRow, ChartSurface, DATASET};
use crate::format::human_size;
use std::collections::BTreeMap;

const DEFAULT_WIDTH: usize = 80;
const LABEL_WIDTH: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct UserShare {
    pub user: String,
    pub size_bytes: u64,
    pub percent: f64,
}

#[derive(Debug, Default)]
pub struct TerminalChart {
    rows: Vec<ChartRow>,
    frame: Vec<UserShare>,
    render_pending: bool,
    width: usize,
}

impl TerminalChart {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            ..Default::default()
        }
    }

    /// The last rendered frame, running a pending render first.
    pub fn frame(&mut self) -> &[UserShare] {
        if self.render_pending {
            self.frame = aggregate(&self.rows);
            self.render_pending = false;
        }
        &self.frame
    }

    pub fn draw(&mut self) -> String {
        let bar_width = self.width.saturating_sub(LABEL_WIDTH + 24).max(10);
        let mut out = String::new();
        for share in self.frame() {
            let filled = ((share.percent / 100.0) * bar_width as f64).round() as usize;
            out.push_str(&format!(
                "{:<label$} {:<bar$} {:>5.1}% {:>11}\n",
                truncate(&share.user, LABEL_WIDTH),
                "#".repeat(filled.min(bar_width)),
                share.percent,
                human_size(share.size_bytes),
                label = LABEL_WIDTH,
                bar = bar_width,
            ));
        }
        out
    }
}

impl ChartSurface for TerminalChart {
    fn replace_dataset(&mut self, dataset: &str, rows: Vec<ChartRow>) {
        if dataset != DATASET {
            tracing::warn!(dataset, "unknown chart dataset");
            return;
        }
        self.rows = rows;
    }

    fn request_render(&mut self) {
        self.render_pending = true;
    }

    fn viewport_changed(&mut self) {
        self.width = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.parse().ok())
            .unwrap_or(DEFAULT_WIDTH);
    }
}

/// Per-user totals with their share of the overall size, largest first.
pub fn aggregate(rows: &[ChartRow]) -> Vec<UserShare> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.user.as_str()).or_default() += row.size_bytes;
    }
    let sum: u64 = totals.values().sum();

    let mut shares: Vec<UserShare> = totals
        .into_iter()
        .map(|(user, size_bytes)| UserShare {
            user: user.to_string(),
            size_bytes,
            percent: if sum > 0 {
                100.0 * size_bytes as f64 / sum as f64
            } else {
                0.0
            },
        })
        .collect();
    shares.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    shares
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 1).collect();
        t.push('~');
        t
    }
}
