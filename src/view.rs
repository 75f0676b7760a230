// Plain-text rendering of the dashboard for the terminal binary

use crate::sort::{SortColumn, SortOrder, SortSpec};
use crate::state::{DashboardState, ThresholdZone};
use chrono::{DateTime, Utc};

const USAGE_BAR_WIDTH: usize = 40;

fn header(label: &str, column: SortColumn, sort: &SortSpec) -> String {
    match sort.indicator(column) {
        Some(SortOrder::Ascending) => format!("{} ^", label),
        Some(SortOrder::Descending) => format!("{} v", label),
        None => label.to_string(),
    }
}

fn zone_label(zone: ThresholdZone) -> &'static str {
    match zone {
        ThresholdZone::Nominal => "ok",
        ThresholdZone::Warning => "warning",
        ThresholdZone::Critical => "critical",
    }
}

/// `[#####.....] 1.5 GiB / 10.0 GiB (15%) warning`
pub fn render_usage(state: &DashboardState) -> String {
    let percent = state.used_percent().clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * USAGE_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {} / {} ({}%) {}",
        "#".repeat(filled),
        ".".repeat(USAGE_BAR_WIDTH - filled),
        state.disk_used_human(),
        state.disk_capacity_human(),
        state.used_percent_human(),
        zone_label(state.threshold_zone()),
    )
}

/// Error banner text, if the last request failed.
pub fn render_banner(state: &DashboardState) -> Option<String> {
    state
        .request
        .error_message()
        .map(|message| format!("error: {}", message))
}

pub fn render_table(state: &DashboardState, sort: &SortSpec, now: DateTime<Utc>) -> String {
    if !state.has_results() {
        return "no databases\n".to_string();
    }

    let name_width = state
        .records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(8)
        + 1;
    let user_width = state
        .records
        .iter()
        .map(|r| r.user.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    let mut out = format!(
        "{:<nw$}  {:<uw$}  {:>11}  {:<16}  {}\n",
        header("Name", SortColumn::Name, sort),
        header("User", SortColumn::User, sort),
        header("Size", SortColumn::Size, sort),
        header("Modified", SortColumn::Modified, sort),
        "",
        nw = name_width,
        uw = user_width,
    );
    for record in &state.records {
        let name = if record.is_service {
            format!("{}*", record.name)
        } else {
            record.name.clone()
        };
        out.push_str(&format!(
            "{:<nw$}  {:<uw$}  {:>11}  {:<16}  {}\n",
            name,
            record.user,
            record.size_human(),
            record.modified_formatted(),
            record.modified_relative(now),
            nw = name_width,
            uw = user_width,
        ));
    }
    out
}
