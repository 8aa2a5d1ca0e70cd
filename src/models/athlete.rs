// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Athlete account model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Athlete account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    /// Generated ID (also used as document key)
    pub id: u64,
    /// Email address (unique across athletes)
    pub email: String,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// PBKDF2 password hash; None for OAuth-only accounts
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// OAuth tokens for an athlete, one record per provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteToken {
    pub athlete_id: u64,
    /// Provider name ("strava")
    pub provider: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// When the access token expires
    pub expires_at: DateTime<Utc>,
}

/// Partial update payload for an athlete profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AthleteUpdate {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}
