//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; visibility rules live in the domain.

use blogicum::adapters::clock::{FixedClock, SystemClock};
use blogicum::adapters::persistence::{Fixtures, SqliteRepo};
use blogicum::adapters::ui::progress::spinner;
use blogicum::adapters::ui::tui::TuiInputPort;
use blogicum::ports::{Clock, ContentRepository, InputPort};
use blogicum::shared::config::AppConfig;
use blogicum::usecases::PostQueryService;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    blogicum::adapters::ui::init_ui();

    let cfg = AppConfig::load()?;
    let data_path = PathBuf::from(cfg.data_dir_or_default());

    // --- Storage ---
    let sqlite_repo = Arc::new(
        SqliteRepo::connect(&data_path)
            .await
            .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
    );
    info!(path = %sqlite_repo.path().display(), "content database ready");

    if let Some(path) = cfg.fixtures_path.as_deref() {
        let pb = spinner(format!("Loading fixtures from {}", path));
        let stats = async {
            let fixtures = Fixtures::from_path(path).await?;
            sqlite_repo.load_fixtures(&fixtures).await
        }
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
        pb.finish_with_message(format!("Loaded {}", stats));
    }

    // --- Clock (BLOGICUM_NOW pins it) ---
    let clock: Arc<dyn Clock> = match cfg.fixed_now()? {
        Some(now) => {
            info!(%now, "clock pinned");
            Arc::new(FixedClock(now))
        }
        None => Arc::new(SystemClock),
    };

    // --- Services ---
    let repo: Arc<dyn ContentRepository> = Arc::clone(&sqlite_repo) as Arc<dyn ContentRepository>;
    let post_service = Arc::new(PostQueryService::new(repo, clock));

    let page_size = cfg.page_size_or_default();
    info!(page_size, "feed page size");
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(post_service, page_size));

    // --- Run (main menu -> Latest / Post / Category) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
