// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coarse track summary derived from a decoded [`GeoTrack`].
//!
//! This is what the application persists on tracks and activities; the full
//! channel data stays in transient memory for one render cycle.

use crate::fit::record::GeoTrack;
use geo::{Haversine, Length, LineString};
use serde::Serialize;

/// Summary fields persisted alongside a track or activity.
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    /// Total distance in meters
    pub distance: f64,
    /// Sum of positive elevation deltas in meters
    pub elevation_gain: f64,
    /// Sum of negative elevation deltas in meters (non-negative value)
    pub elevation_loss: f64,
    /// Mean of the speed channel in m/s
    pub average_speed: Option<f64>,
    /// Maximum of the speed channel in m/s
    pub max_speed: Option<f64>,
    /// Elapsed seconds between first and last timestamped sample
    pub elapsed_time: Option<i64>,
    /// `[lat, lng]` of the first coordinate
    pub start_lat_lng: [f64; 2],
    /// `[lat, lng]` of the last coordinate
    pub end_lat_lng: [f64; 2],
    /// Precision-5 encoded polyline of the full coordinate sequence
    pub polyline: String,
}

impl TrackSummary {
    /// Derive the summary from a decoded track.
    ///
    /// Distance comes from the device's cumulative distance channel when the
    /// recording carried one, falling back to the haversine length of the
    /// line otherwise.
    pub fn from_track(track: &GeoTrack) -> Self {
        let line: LineString<f64> = track
            .coordinates
            .iter()
            .map(|c| geo::coord! { x: c[0], y: c[1] })
            .collect();

        let distance = match track.channels.distances.last() {
            Some(&last) if last > 0.0 => last,
            _ => Haversine.length(&line),
        };

        let (elevation_gain, elevation_loss) = elevation_deltas(&track.channels.altitudes);

        let speeds = &track.channels.speeds;
        let average_speed = if speeds.is_empty() {
            None
        } else {
            Some(speeds.iter().sum::<f64>() / speeds.len() as f64)
        };
        let max_speed = speeds.iter().copied().fold(None, |acc: Option<f64>, s| {
            Some(acc.map_or(s, |m| m.max(s)))
        });

        let elapsed_time = match (
            track.channels.timestamps.first(),
            track.channels.timestamps.last(),
        ) {
            (Some(first), Some(last)) => Some((*last - *first).num_seconds()),
            _ => None,
        };

        // Builder guarantees at least two coordinates
        let first = track.coordinates[0];
        let last = track.coordinates[track.coordinates.len() - 1];

        let polyline = polyline::encode_coordinates(line, 5).unwrap_or_default();

        Self {
            distance,
            elevation_gain,
            elevation_loss,
            average_speed,
            max_speed,
            elapsed_time,
            start_lat_lng: [first[1], first[0]],
            end_lat_lng: [last[1], last[0]],
            polyline,
        }
    }
}

/// Sum positive and negative deltas over the altitude channel.
fn elevation_deltas(altitudes: &[f64]) -> (f64, f64) {
    let mut gain = 0.0;
    let mut loss = 0.0;
    for pair in altitudes.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain += delta;
        } else {
            loss -= delta;
        }
    }
    (gain, loss)
}
