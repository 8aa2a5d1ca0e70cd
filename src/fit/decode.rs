// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! External decode boundary over the binary FIT parser.
//!
//! File signature and CRC validation happen inside `fitparser`; a failure
//! there surfaces as a plain user-visible error and the geometry builder is
//! never invoked.

use crate::error::AppError;
use crate::fit::record::ActivityRecord;
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};

/// Smallest legal FIT header. `fitparser` accepts an empty buffer as zero
/// messages, so buffers too short to carry the signature are rejected here.
const MIN_HEADER_LEN: usize = 12;

/// Decode raw FIT bytes into the ordered sequence of activity samples.
///
/// Only Record messages are kept; file headers, laps, sessions and device
/// info are skipped.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<ActivityRecord>, AppError> {
    if bytes.len() < MIN_HEADER_LEN {
        return Err(AppError::InvalidFile(
            "Not a valid FIT file: truncated header".to_string(),
        ));
    }

    let messages = fitparser::from_bytes(bytes)
        .map_err(|e| AppError::InvalidFile(format!("Not a valid FIT file: {}", e)))?;

    Ok(messages
        .into_iter()
        .filter(|m| m.kind() == MesgNum::Record)
        .map(sample_from_message)
        .collect())
}

/// Map one FIT Record message onto an [`ActivityRecord`].
///
/// Unknown fields are ignored; fields with an unexpected value type are
/// treated as absent rather than failing the decode.
fn sample_from_message(message: FitDataRecord) -> ActivityRecord {
    let mut record = ActivityRecord::default();

    for field in message.fields() {
        match field.name() {
            "position_lat" => record.position_lat = as_semicircles(field.value()),
            "position_long" => record.position_long = as_semicircles(field.value()),
            "timestamp" => {
                if let Value::Timestamp(t) = field.value() {
                    record.timestamp = Some((*t).into());
                }
            }
            "altitude" => record.altitude = as_f64(field.value()),
            "enhanced_altitude" => record.enhanced_altitude = as_f64(field.value()),
            "speed" => record.speed = as_f64(field.value()),
            "enhanced_speed" => record.enhanced_speed = as_f64(field.value()),
            "distance" => record.distance = as_f64(field.value()),
            _ => {}
        }
    }

    record
}

/// Coordinates are signed 32-bit semicircles in the FIT profile.
fn as_semicircles(value: &Value) -> Option<i32> {
    match value {
        Value::SInt32(v) => Some(*v),
        _ => None,
    }
}

/// Telemetry fields arrive scaled to floats, but older encoders can emit
/// raw integer types for the non-enhanced variants.
fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float64(v) => Some(*v),
        Value::Float32(v) => Some(f64::from(*v)),
        Value::SInt32(v) => Some(f64::from(*v)),
        Value::UInt32(v) => Some(f64::from(*v)),
        Value::SInt16(v) => Some(f64::from(*v)),
        Value::UInt16(v) => Some(f64::from(*v)),
        Value::SInt8(v) => Some(f64::from(*v)),
        Value::UInt8(v) => Some(f64::from(*v)),
        _ => None,
    }
}
