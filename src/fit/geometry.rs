// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coordinate conversion and polyline assembly from decoded samples.

use crate::fit::record::{ActivityRecord, GeoTrack, TrackChannels};
use crate::time_utils::format_utc_rfc3339;
use geojson::{Feature, Geometry, JsonObject, Value};

/// Semicircles per degree (2^32 / 360, pre-rounded).
///
/// The rounded constant is load-bearing: renderers were calibrated against
/// coordinates divided by exactly 11930465, so this must not be replaced
/// with a recomputed higher-precision value.
const SEMICIRCLES_PER_DEGREE: f64 = 11_930_465.0;

/// Convert a semicircle-encoded coordinate to decimal degrees.
///
/// Total over all 32-bit inputs; performs no range validation or clamping.
pub fn semicircles_to_degrees(value: i32) -> f64 {
    value as f64 / SEMICIRCLES_PER_DEGREE
}

/// Build a [`GeoTrack`] from an ordered sequence of decoded samples.
///
/// A sample contributes to the polyline only when both position fields are
/// present; samples without a full fix contribute nothing to any channel.
/// Returns `None` when fewer than two samples qualify (a line needs two
/// points) - callers treat that as "nothing to render", not as an error.
///
/// Channel population per qualifying sample:
/// - `timestamps`: appended only when the sample has a timestamp
/// - `altitudes`: `enhanced_altitude` preferred over `altitude`; a reading
///   of exactly zero is dropped (unlike speed and distance below, which
///   record explicit zeros)
/// - `speeds`: `enhanced_speed`, else `speed`, else `0.0` - always appended
/// - `distances`: appended only when the sample carried a distance reading
///   (an explicit zero counts)
pub fn build_track(records: &[ActivityRecord]) -> Option<GeoTrack> {
    let mut coordinates = Vec::new();
    let mut channels = TrackChannels::default();

    for record in records {
        let (Some(lat), Some(lng)) = (record.position_lat, record.position_long) else {
            continue;
        };

        coordinates.push([semicircles_to_degrees(lng), semicircles_to_degrees(lat)]);

        if let Some(timestamp) = record.timestamp {
            channels.timestamps.push(timestamp);
        }

        if let Some(altitude) = record.enhanced_altitude.or(record.altitude) {
            if altitude != 0.0 {
                channels.altitudes.push(altitude);
            }
        }

        channels
            .speeds
            .push(record.enhanced_speed.or(record.speed).unwrap_or(0.0));

        if let Some(distance) = record.distance {
            channels.distances.push(distance);
        }
    }

    if coordinates.len() < 2 {
        return None;
    }

    Some(GeoTrack {
        coordinates,
        channels,
    })
}

impl GeoTrack {
    /// Serialize as a GeoJSON `Feature` with a `LineString` geometry.
    ///
    /// The channel arrays are carried verbatim in `properties` (timestamps
    /// as RFC3339 strings) - the wire shape the map and elevation-chart
    /// renderers consume.
    pub fn to_feature(&self) -> Feature {
        let coordinates: Vec<Vec<f64>> = self.coordinates.iter().map(|c| c.to_vec()).collect();

        let mut properties = JsonObject::new();
        properties.insert(
            "timestamps".to_string(),
            serde_json::Value::Array(
                self.channels
                    .timestamps
                    .iter()
                    .map(|t| serde_json::Value::String(format_utc_rfc3339(*t)))
                    .collect(),
            ),
        );
        properties.insert(
            "altitudes".to_string(),
            serde_json::json!(self.channels.altitudes),
        );
        properties.insert("speeds".to_string(), serde_json::json!(self.channels.speeds));
        properties.insert(
            "distances".to_string(),
            serde_json::json!(self.channels.distances),
        );

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(coordinates))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn positioned(lat: i32, lng: i32) -> ActivityRecord {
        ActivityRecord {
            position_lat: Some(lat),
            position_long: Some(lng),
            ..Default::default()
        }
    }

    #[test]
    fn test_conversion_spot_values() {
        assert_eq!(semicircles_to_degrees(0), 0.0);
        assert_eq!(semicircles_to_degrees(11_930_465), 1.0);
        assert_eq!(semicircles_to_degrees(-11_930_465), -1.0);
    }

    #[test]
    fn test_conversion_uses_rounded_constant() {
        // The divisor is rounded up from 2^32/360, so the -2^31 edge lands
        // slightly inside -180 rather than exactly on it.
        let degrees = semicircles_to_degrees(i32::MIN);
        assert!(degrees > -180.0);
        assert!(degrees < -179.999);
        assert!((degrees - i32::MIN as f64 / 11_930_465.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(build_track(&[]).is_none());
    }

    #[test]
    fn test_single_qualifying_record_yields_none() {
        // One point cannot form a line
        assert!(build_track(&[positioned(1, 2)]).is_none());
    }

    #[test]
    fn test_partial_position_excluded() {
        let lat_only = ActivityRecord {
            position_lat: Some(100),
            ..Default::default()
        };
        let lng_only = ActivityRecord {
            position_long: Some(100),
            ..Default::default()
        };
        assert!(build_track(&[lat_only.clone(), lng_only.clone()]).is_none());

        let track = build_track(&[positioned(1, 2), lat_only, lng_only, positioned(3, 4)])
            .expect("two full fixes should form a line");
        assert_eq!(track.coordinates.len(), 2);
    }

    #[test]
    fn test_axis_order_is_lng_lat() {
        let track = build_track(&[
            positioned(439_986_234, -1_223_344_556),
            positioned(439_987_000, -1_223_345_000),
        ])
        .unwrap();
        assert_eq!(
            track.coordinates[0],
            [
                semicircles_to_degrees(-1_223_344_556),
                semicircles_to_degrees(439_986_234)
            ]
        );
    }

    #[test]
    fn test_altitude_prefers_enhanced() {
        let mut a = positioned(1, 2);
        a.altitude = Some(100.0);
        a.enhanced_altitude = Some(120.0);
        let mut b = positioned(3, 4);
        b.altitude = Some(100.0);

        let track = build_track(&[a, b]).unwrap();
        assert_eq!(track.channels.altitudes, vec![120.0, 100.0]);
    }

    #[test]
    fn test_altitude_zero_reading_dropped() {
        let mut a = positioned(1, 2);
        a.enhanced_altitude = Some(0.0);
        let mut b = positioned(3, 4);
        b.altitude = Some(12.5);

        let track = build_track(&[a, b]).unwrap();
        assert_eq!(track.channels.altitudes, vec![12.5]);
    }

    #[test]
    fn test_speed_defaults_to_zero() {
        let mut a = positioned(1, 2);
        a.enhanced_speed = Some(4.5);
        let b = positioned(3, 4);

        let track = build_track(&[a, b]).unwrap();
        assert_eq!(track.channels.speeds, vec![4.5, 0.0]);
    }

    #[test]
    fn test_distance_zero_is_recorded() {
        let mut a = positioned(1, 2);
        a.distance = Some(0.0);
        let b = positioned(3, 4);

        let track = build_track(&[a, b]).unwrap();
        assert_eq!(track.channels.distances, vec![0.0]);
    }

    #[test]
    fn test_end_to_end_channel_shapes() {
        let t1 = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let t3 = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 2).unwrap();

        let mut a = positioned(439_986_234, -1_223_344_556);
        a.enhanced_altitude = Some(105.0);
        a.timestamp = Some(t1);

        // No position fix at all - contributes nothing, not even channels
        let mut b = ActivityRecord::default();
        b.altitude = Some(999.0);
        b.speed = Some(9.9);

        let mut c = positioned(439_987_000, -1_223_345_000);
        c.altitude = Some(110.0);
        c.speed = Some(3.2);
        c.distance = Some(50.0);
        c.timestamp = Some(t3);

        let track = build_track(&[a, b, c]).unwrap();
        assert_eq!(track.coordinates.len(), 2);
        assert_eq!(track.channels.altitudes, vec![105.0, 110.0]);
        assert_eq!(track.channels.speeds, vec![0.0, 3.2]);
        // Only the last sample carried a distance reading
        assert_eq!(track.channels.distances, vec![50.0]);
        assert_eq!(track.channels.timestamps, vec![t1, t3]);
    }

    #[test]
    fn test_feature_wire_shape() {
        let t1 = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let mut a = positioned(11_930_465, 23_860_930);
        a.timestamp = Some(t1);
        a.enhanced_altitude = Some(105.0);
        let b = positioned(11_930_465, 23_860_930);

        let feature = build_track(&[a, b]).unwrap().to_feature();

        let geometry = feature.geometry.expect("line geometry");
        match geometry.value {
            Value::LineString(coords) => {
                assert_eq!(coords, vec![vec![2.0, 1.0], vec![2.0, 1.0]]);
            }
            other => panic!("expected LineString, got {:?}", other),
        }

        let properties = feature.properties.expect("channel properties");
        assert_eq!(
            properties["timestamps"],
            serde_json::json!(["2024-06-01T09:00:00Z"])
        );
        assert_eq!(properties["altitudes"], serde_json::json!([105.0]));
        assert_eq!(properties["speeds"], serde_json::json!([0.0, 0.0]));
        assert_eq!(properties["distances"], serde_json::json!([]));
    }
}
