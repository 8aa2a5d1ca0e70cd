// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password and Strava OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::Athlete;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/strava", get(strava_start))
        .route("/auth/strava/callback", get(strava_callback))
}

// ─── Email / Password ────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Session response returned by register and login.
#[derive(Serialize)]
pub struct SessionResponse {
    pub message: String,
    pub athlete: Athlete,
}

/// Register a new email/password account and start a session.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<RegisterPayload>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload.validate()?;

    let athlete = state.auth.register(
        &payload.email,
        &payload.password,
        &payload.first_name,
        &payload.last_name,
    )?;

    let jar = start_session(jar, athlete.id, &state.config.jwt_signing_key)?;
    Ok((
        jar,
        Json(SessionResponse {
            message: "Registration successful".to_string(),
            athlete,
        }),
    ))
}

/// Log in with email and password.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload.validate()?;

    let athlete = state.auth.login(&payload.email, &payload.password)?;

    let jar = start_session(jar, athlete.id, &state.config.jwt_signing_key)?;
    Ok((
        jar,
        Json(SessionResponse {
            message: "Login successful".to_string(),
            athlete,
        }),
    ))
}

#[derive(Serialize)]
struct LogoutResponse {
    message: String,
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));
    (
        jar,
        Json(LogoutResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// Issue the session JWT as an httpOnly cookie.
fn start_session(jar: CookieJar, athlete_id: u64, signing_key: &[u8]) -> Result<CookieJar> {
    let jwt = create_jwt(athlete_id, signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, jwt))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(7))
        .build();

    Ok(jar.add(cookie))
}

// ─── Strava OAuth ────────────────────────────────────────────

/// Query parameters for starting the OAuth flow.
#[derive(Deserialize)]
pub struct AuthStartParams {
    /// Frontend URL to redirect back to after OAuth completes.
    /// If not provided, uses the configured frontend URL.
    #[serde(default)]
    redirect_uri: Option<String>,
}

/// Start OAuth flow - redirect to Strava authorization.
async fn strava_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
    headers: axum::http::HeaderMap,
) -> Result<Redirect> {
    let frontend_url = params
        .redirect_uri
        .unwrap_or_else(|| state.config.frontend_url.clone());

    // Encode frontend URL + timestamp in state
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    let state_payload = format!("{}|{:x}", frontend_url, timestamp);

    // Sign the payload
    let mut mac = HmacSha256::new_from_slice(&state.config.oauth_state_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(state_payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    // "payload|signature_hex", base64 encoded for the URL
    let signed_state = format!("{}|{}", state_payload, hex::encode(signature));
    let oauth_state = URL_SAFE_NO_PAD.encode(signed_state.as_bytes());

    let callback_url = format!("{}/auth/strava/callback", request_base_url(&headers));

    let auth_url = format!(
        "https://www.strava.com/oauth/authorize?\
         client_id={}&\
         redirect_uri={}&\
         response_type=code&\
         scope=read,activity:read_all&\
         state={}",
        state.config.strava_client_id,
        urlencoding::encode(&callback_url),
        oauth_state
    );

    tracing::info!(
        client_id = %state.config.strava_client_id,
        frontend_url = %frontend_url,
        "Starting OAuth flow, redirecting to Strava"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    /// Absent when the athlete denies authorization
    #[serde(default)]
    code: Option<String>,
    state: String,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code for tokens, create session, redirect to
/// the frontend. Failures redirect with an error query parameter rather
/// than rendering a JSON error.
async fn strava_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    // Decode and verify frontend URL from state parameter
    let frontend_url = verify_and_decode_state(&params.state, &state.config.oauth_state_key)
        .unwrap_or_else(|| {
            tracing::warn!(
                "Invalid or tampered state parameter, falling back to default frontend URL"
            );
            state.config.frontend_url.clone()
        });

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Strava");
        let redirect = format!("{}/login?error={}", frontend_url, error);
        return Ok((jar, Redirect::temporary(&redirect)));
    }

    let Some(code) = params.code else {
        tracing::warn!("OAuth callback without authorization code");
        let redirect = format!("{}/login?error=authentication_failed", frontend_url);
        return Ok((jar, Redirect::temporary(&redirect)));
    };

    tracing::info!("Exchanging authorization code for tokens");

    let exchange = match state.strava.exchange_code(&code).await {
        Ok(exchange) => exchange,
        Err(e) => {
            tracing::warn!(error = %e, "Token exchange failed");
            let redirect = format!("{}/login?error=authentication_failed", frontend_url);
            return Ok((jar, Redirect::temporary(&redirect)));
        }
    };

    let athlete = state.auth.strava_login(&exchange)?;

    let jar = start_session(jar, athlete.id, &state.config.jwt_signing_key)?;
    Ok((jar, Redirect::temporary(&format!("{}/", frontend_url))))
}

/// Base URL of this server as seen by the client, for the OAuth callback.
fn request_base_url(headers: &axum::http::HeaderMap) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            std::env::var("API_HOST").unwrap_or_else(|_| "localhost:8080".to_string())
        });

    let scheme = if host.contains("localhost") || host.contains("127.0.0.1") {
        "http"
    } else {
        "https"
    };

    format!("{}://{}", scheme, host)
}

/// Verify HMAC signature and decode the frontend URL from the OAuth state.
fn verify_and_decode_state(state: &str, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // Format is "frontend_url|timestamp_hex|signature_hex"
    let parts: Vec<&str> = state_str.splitn(3, '|').collect();
    if parts.len() != 3 {
        return None;
    }

    let frontend_url = parts[0];
    let timestamp_hex = parts[1];
    let signature_hex = parts[2];

    let payload = format!("{}|{}", frontend_url, timestamp_hex);

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());
    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if signature_hex != expected_signature {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    Some(frontend_url.to_string())
}
