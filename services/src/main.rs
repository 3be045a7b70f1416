use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calendar_services::holidays::HttpHolidaySource;
use calendar_services::{CalendarScheduler, ServicesConfig};
use planner::SystemClock;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calendar_services=debug,planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting calendar services");

    // Load configuration
    dotenv::dotenv().ok();
    let config = ServicesConfig::from_env()?;

    let source = HttpHolidaySource::new(
        config.holiday_api_url.clone(),
        config.holiday_fetch_timeout,
    )?;
    tracing::info!("Holiday source: {}", config.holiday_api_url);

    let mut scheduler = CalendarScheduler::new(config, Arc::new(source), Arc::new(SystemClock));
    scheduler.start().await;

    // Wait for shutdown signal
    tracing::info!("Calendar services running. Press Ctrl+C to stop.");
    signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping...");

    scheduler.shutdown();

    tracing::info!("Calendar services stopped");
    Ok(())
}
