// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod strava;

pub use auth::AuthService;
pub use strava::{StravaAthlete, StravaClient, TokenExchangeResponse};
