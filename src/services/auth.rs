// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration, login, and OAuth account linking.

use crate::db::MemoryDb;
use crate::error::AppError;
use crate::models::{Athlete, AthleteToken};
use crate::services::strava::{StravaClient, TokenExchangeResponse};
use ring::rand::{SecureRandom, SystemRandom};
use ring::pbkdf2;
use std::num::NonZeroU32;

const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Dummy hash verified against on login when no account matches, so a
/// missing account takes as long as a wrong password.
const DUMMY_HASH: &str =
    "pbkdf2_sha256$100000$00000000000000000000000000000000$0000000000000000000000000000000000000000000000000000000000000000";

/// Account service over the store.
#[derive(Clone)]
pub struct AuthService {
    db: MemoryDb,
}

impl AuthService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    /// Register a new email/password account.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Athlete, AppError> {
        let password_hash = hash_password(password)?;
        let athlete = self.db.create_athlete(
            email,
            Some(first_name.to_string()),
            Some(last_name.to_string()),
            Some(password_hash),
        )?;

        tracing::info!(athlete_id = athlete.id, "Athlete registered");
        Ok(athlete)
    }

    /// Log an athlete in with email and password.
    ///
    /// Every failure path returns the same error so responses don't reveal
    /// whether the email is registered.
    pub fn login(&self, email: &str, password: &str) -> Result<Athlete, AppError> {
        let athlete = self.db.get_athlete_by_email(email);

        let stored = athlete
            .as_ref()
            .and_then(|a| a.password_hash.as_deref())
            .unwrap_or(DUMMY_HASH);

        let password_ok = verify_password(password, stored);

        match athlete {
            Some(a) if a.password_hash.is_some() && password_ok => Ok(a),
            _ => Err(AppError::BadRequest("Invalid email or password".to_string())),
        }
    }

    /// Handle a completed Strava OAuth exchange: find or create the athlete
    /// and store the provider tokens.
    pub fn strava_login(&self, exchange: &TokenExchangeResponse) -> Result<Athlete, AppError> {
        let email = exchange.athlete.account_email();

        let athlete = match self.db.get_athlete_by_email(&email) {
            Some(existing) => existing,
            None => self.db.create_athlete(
                &email,
                exchange.athlete.firstname.clone(),
                exchange.athlete.lastname.clone(),
                None,
            )?,
        };

        let expires_at = chrono::DateTime::from_timestamp(exchange.expires_at, 0)
            .unwrap_or_else(chrono::Utc::now);

        self.db.set_token(AthleteToken {
            athlete_id: athlete.id,
            provider: "strava".to_string(),
            access_token: exchange.access_token.clone(),
            refresh_token: Some(exchange.refresh_token.clone()),
            expires_at,
        });

        tracing::info!(
            athlete_id = athlete.id,
            strava_id = exchange.athlete.id,
            "Strava login handled, tokens stored"
        );
        Ok(athlete)
    }

    /// Access token for the athlete's linked Strava account, refreshing
    /// through the OAuth token endpoint when the stored one has expired.
    pub async fn strava_access_token(
        &self,
        athlete_id: u64,
        strava: &StravaClient,
    ) -> Result<String, AppError> {
        let token = self
            .db
            .get_token(athlete_id, "strava")
            .ok_or_else(|| AppError::BadRequest("No linked Strava account".to_string()))?;

        // Headroom so the token doesn't expire mid-request
        if token.expires_at > chrono::Utc::now() + chrono::Duration::seconds(60) {
            return Ok(token.access_token);
        }

        let refresh_token = token.refresh_token.ok_or_else(|| {
            AppError::BadRequest("Strava link must be re-authorized".to_string())
        })?;

        let refreshed = strava.refresh_token(&refresh_token).await?;
        let expires_at = chrono::DateTime::from_timestamp(refreshed.expires_at, 0)
            .unwrap_or_else(chrono::Utc::now);

        self.db.set_token(AthleteToken {
            athlete_id,
            provider: "strava".to_string(),
            access_token: refreshed.access_token.clone(),
            refresh_token: Some(refreshed.refresh_token),
            expires_at,
        });

        tracing::info!(athlete_id, "Refreshed Strava access token");
        Ok(refreshed.access_token)
    }
}

/// Hash a password as `pbkdf2_sha256$iterations$salt_hex$hash_hex`.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate salt")))?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        NonZeroU32::new(PBKDF2_ITERATIONS).expect("nonzero iterations"),
        &salt,
        password.as_bytes(),
        &mut hash,
    );

    Ok(format!(
        "pbkdf2_sha256${}${}${}",
        PBKDF2_ITERATIONS,
        hex::encode(salt),
        hex::encode(hash)
    ))
}

/// Verify a password against a stored hash in constant time.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    if parts.len() != 4 || parts[0] != "pbkdf2_sha256" {
        return false;
    }

    let Ok(iterations) = parts[1].parse::<u32>() else {
        return false;
    };
    let Some(iterations) = NonZeroU32::new(iterations) else {
        return false;
    };
    let Ok(salt) = hex::decode(parts[2]) else {
        return false;
    };
    let Ok(expected) = hex::decode(parts[3]) else {
        return false;
    };

    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt,
        password.as_bytes(),
        &expected,
    )
    .is_ok()
}
