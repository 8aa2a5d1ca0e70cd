// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MTB-Tracker API Server
//!
//! Decodes FIT activity uploads into map-renderable polylines and serves
//! the athlete/track/activity/effort API behind email and Strava auth.

use mtb_tracker::{
    config::Config,
    db::MemoryDb,
    services::{AuthService, StravaClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting MTB-Tracker API");

    // The store is in-process; all state lives for the lifetime of the server
    let db = MemoryDb::new();

    let auth = AuthService::new(db.clone());
    let strava = StravaClient::new(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        auth,
        strava,
    });

    // Build router
    let app = mtb_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mtb_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
