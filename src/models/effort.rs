// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Track effort: one timed attempt at a track within an activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored track effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackEffort {
    /// Generated ID
    pub id: u64,
    /// The track the effort was timed against
    pub track_id: u64,
    /// Athlete who made the attempt
    pub athlete_id: u64,
    /// Activity the attempt was recorded in
    pub activity_id: u64,
    /// When the attempt started
    pub start_time: DateTime<Utc>,
    /// When the attempt ended
    pub end_time: DateTime<Utc>,
    /// Elapsed seconds
    pub elapsed_time: i64,
    /// Polyline of the matched portion
    pub polyline: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a track effort.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEffortCreate {
    pub track_id: u64,
    pub activity_id: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub polyline: String,
}
