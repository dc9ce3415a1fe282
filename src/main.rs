mod app;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use rebalance_advisor::config::Config;
use rebalance_advisor::remote::BackendClient;

use crate::app::RebalanceApp;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let backend = Box::new(BackendClient::new(&cfg));

    let mut app = RebalanceApp::new(cfg, backend);
    app.run().await?;

    Ok(())
}
