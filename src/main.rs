// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rider-Directory API Server
//!
//! Serves the cycling club's rider directory, dashboard and public sticker
//! lookups from a JSON dataset held in memory.

use rider_directory::{config::Config, db::Dataset, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Structured JSON logging
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Rider-Directory API");

    tracing::info!(path = %config.data_path, "Loading club dataset");
    let dataset = Dataset::load_from_file(&config.data_path)?;

    let port = config.port;
    let state = Arc::new(AppState::from_dataset(config, dataset));
    tracing::info!(
        riders = state.directory.repository().riders().len(),
        unread_notifications = state.notifications.unread_count(),
        "Directory ready"
    );

    let app = rider_directory::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rider_directory=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
