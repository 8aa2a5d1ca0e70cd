// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::fit::{build_track, decode_records, TrackSummary};
use crate::middleware::auth::AuthUser;
use crate::models::{
    Activity, ActivityCreate, Athlete, AthleteUpdate, Track, TrackCreate, TrackDetails,
    TrackDetailsCreate, TrackEffort, TrackEffortCreate, TrackUpdate,
};
use crate::services::StravaAthlete;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

/// Uploaded FIT files are small, but allow some headroom for long rides
/// recorded at 1 Hz with every channel enabled.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route(
            "/api/decode",
            post(decode_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/athletes/{id}",
            get(get_athlete).patch(update_athlete).delete(delete_athlete),
        )
        .route("/api/tracks", post(create_track).get(list_tracks))
        .route(
            "/api/tracks/{id}",
            get(get_track).patch(update_track).delete(delete_track),
        )
        .route("/api/tracks/details", post(create_track_details))
        .route("/api/tracks/{id}/details", get(get_track_details))
        .route("/api/tracks/{id}/efforts", get(list_track_efforts))
        .route("/api/strava/athlete", get(get_strava_athlete))
        .route("/api/activities", post(create_activity).get(list_activities))
        .route(
            "/api/activities/{id}",
            get(get_activity).delete(delete_activity),
        )
        .route("/api/activities/{id}/efforts", get(list_activity_efforts))
        .route("/api/efforts", post(create_effort))
}

// ─── User Profile ────────────────────────────────────────────

/// Get current athlete profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Athlete>> {
    let athlete = state
        .db
        .get_athlete(user.athlete_id)
        .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", user.athlete_id)))?;
    Ok(Json(athlete))
}

// ─── FIT Decode ──────────────────────────────────────────────

/// Decoded upload: the renderable feature plus the derived summary.
#[derive(Serialize)]
pub struct DecodeResponse {
    pub feature: geojson::Feature,
    pub summary: TrackSummary,
}

/// Decode an uploaded FIT file into a GeoJSON line with telemetry channels.
///
/// The body is the raw file bytes. Responds with JSON `null` when the file
/// is valid but holds no renderable geometry; a corrupt or non-FIT file is
/// a 400 with a message for the user.
async fn decode_upload(
    State(_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<Json<Option<DecodeResponse>>> {
    let records = decode_records(&body)?;

    let Some(track) = build_track(&records) else {
        tracing::debug!(
            athlete_id = user.athlete_id,
            records = records.len(),
            "Upload decoded but produced no geometry"
        );
        return Ok(Json(None));
    };

    tracing::info!(
        athlete_id = user.athlete_id,
        records = records.len(),
        points = track.coordinates.len(),
        "Decoded FIT upload"
    );

    let summary = TrackSummary::from_track(&track);
    Ok(Json(Some(DecodeResponse {
        feature: track.to_feature(),
        summary,
    })))
}

// ─── Athletes ────────────────────────────────────────────────

async fn get_athlete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Athlete>> {
    let athlete = state
        .db
        .get_athlete(id)
        .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", id)))?;
    Ok(Json(athlete))
}

async fn update_athlete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(payload): Json<AthleteUpdate>,
) -> Result<Json<Athlete>> {
    payload.validate()?;
    let athlete = state
        .db
        .update_athlete(id, payload.first_name, payload.last_name)?;
    Ok(Json(athlete))
}

async fn delete_athlete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<axum::http::StatusCode> {
    state.db.delete_athlete(id)?;
    tracing::info!(athlete_id = id, "Athlete deleted");
    Ok(axum::http::StatusCode::NO_CONTENT)
}

// ─── Tracks ──────────────────────────────────────────────────

async fn create_track(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TrackCreate>,
) -> Result<(axum::http::StatusCode, Json<Track>)> {
    payload.validate()?;
    if payload.activity_type != "Ride" {
        return Err(AppError::BadRequest(
            "Unsupported activity type (expected \"Ride\")".to_string(),
        ));
    }
    let track = state.db.create_track(payload);
    Ok((axum::http::StatusCode::CREATED, Json(track)))
}

async fn list_tracks(State(state): State<Arc<AppState>>) -> Json<Vec<Track>> {
    Json(state.db.list_tracks())
}

async fn get_track(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Result<Json<Track>> {
    let track = state
        .db
        .get_track(id)
        .ok_or_else(|| AppError::NotFound(format!("Track {} not found", id)))?;
    Ok(Json(track))
}

async fn update_track(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(payload): Json<TrackUpdate>,
) -> Result<Json<Track>> {
    payload.validate()?;
    let track = state.db.update_track(id, payload)?;
    Ok(Json(track))
}

async fn delete_track(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<axum::http::StatusCode> {
    state.db.delete_track(id)?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

// ─── Track Details ───────────────────────────────────────────

/// Store the channel streams for a track, once.
async fn create_track_details(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TrackDetailsCreate>,
) -> Result<(axum::http::StatusCode, Json<TrackDetails>)> {
    let details = state.db.create_track_details(payload)?;
    tracing::info!(
        track_id = details.track_id,
        streams = details.streams.len(),
        "Track details stored"
    );
    Ok((axum::http::StatusCode::CREATED, Json(details)))
}

async fn get_track_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<TrackDetails>> {
    let details = state
        .db
        .get_track_details(id)
        .ok_or_else(|| AppError::NotFound(format!("Track {} details not found", id)))?;
    Ok(Json(details))
}

// ─── Strava ──────────────────────────────────────────────────

/// Live Strava profile for the linked account, refreshing the stored
/// access token first when it has expired.
async fn get_strava_athlete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StravaAthlete>> {
    let access_token = state
        .auth
        .strava_access_token(user.athlete_id, &state.strava)
        .await?;
    let athlete = state.strava.get_athlete(&access_token).await?;
    Ok(Json(athlete))
}

// ─── Activities ──────────────────────────────────────────────

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ActivityCreate>,
) -> Result<(axum::http::StatusCode, Json<Activity>)> {
    payload.validate()?;
    if payload.activity_type != "ride" {
        return Err(AppError::BadRequest(
            "Unsupported activity type (expected \"ride\")".to_string(),
        ));
    }
    let activity = state.db.create_activity(user.athlete_id, payload);
    tracing::info!(
        athlete_id = user.athlete_id,
        activity_id = activity.id,
        "Activity created"
    );
    Ok((axum::http::StatusCode::CREATED, Json(activity)))
}

async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<Vec<Activity>> {
    Json(state.db.list_activities(user.athlete_id))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Activity>> {
    let activity = state
        .db
        .get_activity(id)
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;
    Ok(Json(activity))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<axum::http::StatusCode> {
    state.db.delete_activity(id)?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

// ─── Track Efforts ───────────────────────────────────────────

async fn create_effort(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<TrackEffortCreate>,
) -> Result<(axum::http::StatusCode, Json<TrackEffort>)> {
    if payload.end_time < payload.start_time {
        return Err(AppError::BadRequest(
            "Effort end time precedes start time".to_string(),
        ));
    }
    let effort = state.db.create_effort(user.athlete_id, payload)?;
    Ok((axum::http::StatusCode::CREATED, Json(effort)))
}

async fn list_track_efforts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<TrackEffort>>> {
    if state.db.get_track(id).is_none() {
        return Err(AppError::NotFound(format!("Track {} not found", id)));
    }
    Ok(Json(state.db.list_efforts_by_track(id)))
}

async fn list_activity_efforts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<TrackEffort>>> {
    if state.db.get_activity(id).is_none() {
        return Err(AppError::NotFound(format!("Activity {} not found", id)));
    }
    Ok(Json(state.db.list_efforts_by_activity(id)))
}
