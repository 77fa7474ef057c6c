// Pylon Pick 6 entry form entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config, copying defaults on first run
// 3. Load candidate datasets
// 4. Build the form and the submitter
// 5. Run the TUI until the user quits

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use directories::ProjectDirs;
use pylon_core::candidate::load_datasets;
use pylon_core::config;
use pylon_core::form::FormState;
use pylon_core::selector::RosterSelector;
use pylon_core::submit::{FormsSubmitter, Submitter};
use pylon_tui::app::App;
use pylon_tui::tui;
use tracing::{error, info};

const APP_QUALIFIER: &str = "com";
const APP_AUTHOR: &str = "pylonpick6";
const APP_NAME: &str = "pylon";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_path = init_tracing()?;
    info!("Pylon Pick 6 starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} ({} players, {} rookie, {} TD cap)",
        config.contest.name,
        config.rules.player_count,
        config.rules.rookie_count,
        config.rules.max_touchdowns
    );

    let datasets = load_datasets(&config).context("failed to load candidate datasets")?;
    let selector = RosterSelector::from_rules(&config.rules, datasets);

    let submitter: Arc<dyn Submitter> = Arc::new(FormsSubmitter::from_config(&config));
    info!("Submissions go to {}", config.submission.endpoint);

    let app = App::new(config, FormState::new(selector));

    if let Err(e) = tui::run(app, submitter).await {
        error!("TUI error: {}", e);
        eprintln!("pylon: {e:#} (log: {})", log_path.display());
        return Err(e);
    }

    info!("Pylon Pick 6 shut down cleanly");
    Ok(())
}

/// Where log files go: the platform data dir, or `./logs` when there is no
/// home directory to derive it from.
fn log_dir() -> anyhow::Result<PathBuf> {
    match ProjectDirs::from(APP_QUALIFIER, APP_AUTHOR, APP_NAME) {
        Some(dirs) => Ok(dirs.data_local_dir().join("logs")),
        None => Ok(std::env::current_dir()?.join("logs")),
    }
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI). Returns the log file path.
fn init_tracing() -> anyhow::Result<PathBuf> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join("pylon.log");
    let log_file = std::fs::File::create(&log_path)?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pylon=info,pylon_core=info,pylon_tui=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(log_path)
}
