// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use mtb_tracker::config::Config;
use mtb_tracker::db::MemoryDb;
use mtb_tracker::routes::create_router;
use mtb_tracker::services::{AuthService, StravaClient};
use mtb_tracker::AppState;
use std::sync::Arc;

/// Create a test app with an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = MemoryDb::new();

    let auth = AuthService::new(db.clone());
    let strava = StravaClient::new(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
    );

    let state = Arc::new(AppState {
        config,
        db,
        auth,
        strava,
    });

    (create_router(state.clone()), state)
}

/// Create a session JWT for the given athlete using the test signing key.
#[allow(dead_code)]
pub fn test_jwt(state: &Arc<AppState>, athlete_id: u64) -> String {
    mtb_tracker::middleware::auth::create_jwt(athlete_id, &state.config.jwt_signing_key)
        .expect("JWT creation should succeed")
}

/// Register an athlete directly through the service layer.
/// Returns the athlete id.
#[allow(dead_code)]
pub fn seed_athlete(state: &Arc<AppState>, email: &str) -> u64 {
    state
        .auth
        .register(email, "password123", "Test", "Rider")
        .expect("registration should succeed")
        .id
}
