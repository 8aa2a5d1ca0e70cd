// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Track model: a named route that efforts are timed against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored track record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Generated ID
    pub id: u64,
    /// Track name
    pub name: String,
    /// Activity type ("Ride")
    pub activity_type: String,
    /// Distance in meters
    pub distance: f64,
    /// Elevation gain in meters
    pub elevation_gain: f64,
    /// Elevation loss in meters
    pub elevation_loss: Option<f64>,
    /// `[lat, lng]` of the start
    pub start_lat_lng: [f64; 2],
    /// `[lat, lng]` of the end
    pub end_lat_lng: [f64; 2],
    /// Precision-5 encoded polyline
    pub polyline: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a track.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrackCreate {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    /// Activity type; only "Ride" is accepted for now
    pub activity_type: String,
    #[validate(range(min = 0.0))]
    pub distance: f64,
    #[validate(range(min = 0.0))]
    pub elevation_gain: f64,
    pub elevation_loss: Option<f64>,
    pub start_lat_lng: [f64; 2],
    pub end_lat_lng: [f64; 2],
    #[validate(length(max = 1000))]
    pub polyline: Option<String>,
    #[validate(length(max = 100))]
    pub city: String,
    #[validate(length(max = 2))]
    pub state: String,
    #[validate(length(max = 100))]
    pub country: String,
}

/// Channel streams stored for a track, fetched separately from the summary
/// row because they are orders of magnitude larger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDetails {
    /// Generated ID
    pub id: u64,
    /// The track these streams belong to (one details record per track)
    pub track_id: u64,
    pub streams: Vec<Stream>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One named data stream over the track's points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stream {
    #[serde(rename = "type")]
    pub stream_type: StreamType,
    pub data: StreamData,
    /// Number of points in `data`
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamType {
    LatLng,
    Elevation,
    Distance,
    Speed,
    Altitude,
}

/// Stream payload: scalar per point, or a `[lat, lng]` pair for LatLng.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamData {
    Scalars(Vec<f64>),
    Pairs(Vec<[f64; 2]>),
}

/// Creation payload for track details.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackDetailsCreate {
    pub track_id: u64,
    pub streams: Vec<Stream>,
}

/// Partial update payload for a track.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrackUpdate {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    #[validate(range(min = 0.0))]
    pub elevation_gain: Option<f64>,
    pub elevation_loss: Option<f64>,
    #[validate(length(max = 1000))]
    pub polyline: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 2))]
    pub state: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
}
