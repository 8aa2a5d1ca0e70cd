// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Decoded activity sample and track geometry types.

use chrono::{DateTime, Utc};

/// One timestamped sample from a device recording, as decoded from a FIT
/// Record message. Every field is optional; a sample carries only what the
/// device wrote at that instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityRecord {
    /// Latitude in semicircles (fixed-point; present only with a GPS fix)
    pub position_lat: Option<i32>,
    /// Longitude in semicircles
    pub position_long: Option<i32>,
    /// Sample time
    pub timestamp: Option<DateTime<Utc>>,
    /// Elevation in meters
    pub altitude: Option<f64>,
    /// Higher-resolution elevation reported by newer firmware
    pub enhanced_altitude: Option<f64>,
    /// Instantaneous speed in m/s
    pub speed: Option<f64>,
    /// Higher-resolution speed reported by newer firmware
    pub enhanced_speed: Option<f64>,
    /// Cumulative distance in meters since activity start
    pub distance: Option<f64>,
}

/// Telemetry channels extracted alongside the polyline coordinates.
///
/// Channels grow independently: `timestamps`, `altitudes`, and `distances`
/// are appended only when the source sample carried that field, while
/// `speeds` records a value (defaulting to zero) for every sample that
/// made it into the polyline. Consumers must not zip a channel against the
/// coordinates by index unless every sample populated every field.
#[derive(Debug, Clone, Default)]
pub struct TrackChannels {
    pub timestamps: Vec<DateTime<Utc>>,
    pub altitudes: Vec<f64>,
    pub speeds: Vec<f64>,
    pub distances: Vec<f64>,
}

/// A decoded track: ordered `[lng, lat]` pairs in decimal degrees plus the
/// telemetry channels, held in memory for one decode-and-render cycle.
#[derive(Debug, Clone)]
pub struct GeoTrack {
    pub coordinates: Vec<[f64; 2]>,
    pub channels: TrackChannels,
}
