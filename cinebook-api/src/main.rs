use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use cinebook_api::{app, AppState};
use cinebook_core::BookingBackend;
use cinebook_store::{app_config::Config, LocalBookingBackend, RemoteBookingBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinebook_api=debug,cinebook_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;

    let backend: Arc<dyn BookingBackend> = if config.remote.enabled {
        tracing::info!("Proxying bookings to {}", config.remote.base_url);
        Arc::new(RemoteBookingBackend::from_config(&config.remote))
    } else {
        let local = LocalBookingBackend::from_catalog(&config.catalog, config.booking.max_tickets)
            .context("Invalid showtime catalog")?;
        Arc::new(local)
    };

    let app = app(AppState::new(backend, &config.booking));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Starting CineBook API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
