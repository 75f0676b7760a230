use anyhow::Result;
use clap::{Parser, Subcommand};
use dbdash::chart::TerminalChart;
use dbdash::config::AppConfig;
use dbdash::dashboard::{Dashboard, DropOutcome};
use dbdash::models::DatabaseRecord;
use dbdash::prompt::{ConfirmPrompt, StdinPrompt};
use dbdash::sort::SortColumn;
use dbdash::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Database instance dashboard.
#[derive(Debug, Parser)]
#[command(name = "dbdash", version, about = "Database instance dashboard", long_about = None)]
struct Cli {
    /// Re-sort by column, as a header click; repeat to click several times.
    #[arg(
        long = "sort",
        value_enum,
        ignore_case = true,
        global = true,
        value_name = "COLUMN"
    )]
    sorts: Vec<SortColumn>,
    /// Do not draw the per-user chart.
    #[arg(long, global = true)]
    no_chart: bool,
    /// Action to run; defaults to `state`.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Fetch and show the current state.
    State,
    /// Ask the server to rescan, then show the fresh state.
    Rescan,
    /// Drop one database after confirmation.
    Drop {
        /// Database name as listed.
        name: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Stdin confirmation unless `--yes` was given.
struct CliPrompt {
    assume_yes: bool,
}

impl ConfirmPrompt for CliPrompt {
    fn confirm(&self, record: &DatabaseRecord) -> bool {
        self.assume_yes || StdinPrompt.confirm(record)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::State);
    let app_config = AppConfig::load()?;
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        base_url = %app_config.server.base_url,
        "starting"
    );

    let api = api::HttpApi::new(&app_config.server)?;
    let dashboard = Dashboard::new(
        api,
        TerminalChart::new(),
        CliPrompt {
            assume_yes: matches!(command, Command::Drop { yes: true, .. }),
        },
        &app_config.dashboard,
    );
    if cli.no_chart {
        dashboard.set_chart_requested(false);
    }

    let outcome = match &command {
        Command::State => dashboard.refresh().await,
        Command::Rescan => dashboard.rescan().await,
        Command::Drop { name, .. } => match dashboard.refresh().await {
            Ok(()) => {
                let record = dashboard
                    .find_record(name)
                    .ok_or_else(|| anyhow::anyhow!("database `{}` is not listed", name))?;
                dashboard.drop_database(&record).await.map(|outcome| {
                    if outcome == DropOutcome::Declined {
                        println!("not dropped");
                    }
                })
            }
            Err(e) => Err(e),
        },
    };

    for column in &cli.sorts {
        dashboard.activate_sort(*column);
    }

    let state = dashboard.state();
    let sort = dashboard.sort();
    if let Some(banner) = view::render_banner(&state) {
        println!("{}", banner);
    }
    println!("{}", view::render_usage(&state));
    println!();
    print!("{}", view::render_table(&state, &sort, chrono::Utc::now()));
    if dashboard.chart_visible() {
        println!();
        print!("{}", dashboard.with_surface(|chart| chart.draw()));
    }

    if let Err(e) = outcome {
        anyhow::bail!("{:?} failed: {}", command, e);
    }
    Ok(())
}
