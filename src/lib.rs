// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! MTB-Tracker: upload device-recorded rides, render them, race your tracks
//!
//! This crate provides the backend API for decoding FIT activity uploads
//! into map-renderable geometry and managing athletes, tracks, activities,
//! and track efforts.

pub mod config;
pub mod db;
pub mod error;
pub mod fit;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;
use services::{AuthService, StravaClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub auth: AuthService,
    pub strava: StravaClient,
}
