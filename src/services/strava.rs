// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for OAuth and athlete profile access.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://www.strava.com/api/v3".to_string(),
            token_url: "https://www.strava.com/oauth/token".to_string(),
            client_id,
            client_secret,
        }
    }

    /// Exchange an authorization code for tokens.
    ///
    /// Strava includes the athlete summary in the token response, so a
    /// separate profile fetch is not needed at login.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token exchange request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Refresh an expired access token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Get the authenticated athlete profile.
    pub async fn get_athlete(&self, access_token: &str) -> Result<StravaAthlete, AppError> {
        let url = format!("{}/athlete", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 {
                return Err(AppError::StravaApi("Strava rejected the token".to_string()));
            }

            return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

/// Token exchange response from Strava (authorization code grant).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp when the access token expires
    pub expires_at: i64,
    pub athlete: StravaAthlete,
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Athlete summary as returned by Strava.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StravaAthlete {
    pub id: u64,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    /// Strava shares email only for some scopes
    pub email: Option<String>,
}

impl StravaAthlete {
    /// Email to key the local account by. Strava usually withholds the real
    /// address, so fall back to a provider-scoped synthetic one.
    pub fn account_email(&self) -> String {
        self.email
            .clone()
            .unwrap_or_else(|| format!("strava-{}@athletes.invalid", self.id))
    }
}
