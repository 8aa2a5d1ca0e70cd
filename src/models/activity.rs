// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.
//!
//! An activity is one recorded outing: summary numbers plus an encoded
//! polyline. The full channel data from the FIT decode is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored activity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Generated ID
    pub id: u64,
    /// Owning athlete
    pub athlete_id: u64,
    /// Activity name/title
    pub name: String,
    /// Activity type ("ride")
    pub activity_type: String,
    /// Distance in meters
    pub distance: f64,
    /// Elevation gain in meters
    pub elevation_gain: f64,
    /// Elevation loss in meters
    pub elevation_loss: Option<f64>,
    /// Average speed in m/s
    pub average_speed: Option<f64>,
    /// Max speed in m/s
    pub max_speed: Option<f64>,
    /// `[lat, lng]` of the first point
    pub start_lat_lng: [f64; 2],
    /// `[lat, lng]` of the last point
    pub end_lat_lng: [f64; 2],
    /// Precision-5 encoded polyline
    pub polyline: String,
    /// Elapsed time in seconds
    pub elapsed_time: i64,
    /// When the activity started
    pub start_date_time: DateTime<Utc>,
    /// IANA timezone name of the recording
    pub timezone: String,
    /// Where the record came from ("upload" or "strava")
    pub source: String,
    /// ID at the source, when imported
    pub source_id: Option<String>,
    /// Starting city
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for an activity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActivityCreate {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Activity type; only "ride" is accepted for now
    pub activity_type: String,
    #[validate(range(min = 0.0))]
    pub distance: f64,
    #[validate(range(min = 0.0))]
    pub elevation_gain: f64,
    pub elevation_loss: Option<f64>,
    pub average_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub start_lat_lng: [f64; 2],
    pub end_lat_lng: [f64; 2],
    #[validate(length(max = 5000))]
    pub polyline: String,
    #[validate(range(min = 0))]
    pub elapsed_time: i64,
    pub start_date_time: DateTime<Utc>,
    #[validate(length(max = 50))]
    pub timezone: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[validate(length(max = 50))]
    pub source_id: Option<String>,
    #[validate(length(max = 100))]
    pub city: String,
}

fn default_source() -> String {
    "upload".to_string()
}
