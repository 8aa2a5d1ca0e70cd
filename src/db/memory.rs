// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store with typed operations.
//!
//! Provides high-level operations for:
//! - Athletes (accounts and profile updates)
//! - Tokens (OAuth tokens per provider)
//! - Tracks (named routes)
//! - Activities (recorded outings)
//! - Track efforts (timed attempts, joined to tracks and activities)

use crate::error::AppError;
use crate::models::{
    Activity, ActivityCreate, Athlete, AthleteToken, Track, TrackCreate, TrackDetails,
    TrackDetailsCreate, TrackEffort, TrackEffortCreate, TrackUpdate,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// In-memory database client. Cheap to clone; all clones share state.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<Collections>,
}

#[derive(Default)]
struct Collections {
    athletes: DashMap<u64, Athlete>,
    /// Keyed by (athlete_id, provider)
    tokens: DashMap<(u64, String), AthleteToken>,
    tracks: DashMap<u64, Track>,
    /// Keyed by track id; at most one details record per track
    track_details: DashMap<u64, TrackDetails>,
    activities: DashMap<u64, Activity>,
    efforts: DashMap<u64, TrackEffort>,
    next_id: AtomicU64,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u64 {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    // ─── Athlete Operations ──────────────────────────────────────

    /// Create an athlete; fails when the email is already registered.
    pub fn create_athlete(
        &self,
        email: &str,
        first_name: Option<String>,
        last_name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Athlete, AppError> {
        if self.get_athlete_by_email(email).is_some() {
            return Err(AppError::BadRequest(
                "An account with this email already exists".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let athlete = Athlete {
            id: self.next_id(),
            email: email.to_string(),
            first_name,
            last_name,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        self.inner.athletes.insert(athlete.id, athlete.clone());
        Ok(athlete)
    }

    pub fn get_athlete(&self, id: u64) -> Option<Athlete> {
        self.inner.athletes.get(&id).map(|a| a.clone())
    }

    pub fn get_athlete_by_email(&self, email: &str) -> Option<Athlete> {
        self.inner
            .athletes
            .iter()
            .find(|entry| entry.email.eq_ignore_ascii_case(email))
            .map(|entry| entry.clone())
    }

    /// Apply a partial profile update. Returns the updated athlete.
    pub fn update_athlete(
        &self,
        id: u64,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Athlete, AppError> {
        let mut entry = self
            .inner
            .athletes
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", id)))?;

        if let Some(first) = first_name {
            entry.first_name = Some(first);
        }
        if let Some(last) = last_name {
            entry.last_name = Some(last);
        }
        entry.updated_at = chrono::Utc::now();
        Ok(entry.clone())
    }

    /// Delete an athlete and everything hanging off the account.
    pub fn delete_athlete(&self, id: u64) -> Result<(), AppError> {
        self.inner
            .athletes
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", id)))?;

        self.inner.tokens.retain(|key, _| key.0 != id);
        self.inner.activities.retain(|_, a| a.athlete_id != id);
        self.inner.efforts.retain(|_, e| e.athlete_id != id);
        Ok(())
    }

    // ─── Token Operations ────────────────────────────────────────

    pub fn set_token(&self, token: AthleteToken) {
        self.inner
            .tokens
            .insert((token.athlete_id, token.provider.clone()), token);
    }

    pub fn get_token(&self, athlete_id: u64, provider: &str) -> Option<AthleteToken> {
        self.inner
            .tokens
            .get(&(athlete_id, provider.to_string()))
            .map(|t| t.clone())
    }

    // ─── Track Operations ────────────────────────────────────────

    pub fn create_track(&self, input: TrackCreate) -> Track {
        let now = chrono::Utc::now();
        let track = Track {
            id: self.next_id(),
            name: input.name,
            activity_type: input.activity_type,
            distance: input.distance,
            elevation_gain: input.elevation_gain,
            elevation_loss: input.elevation_loss,
            start_lat_lng: input.start_lat_lng,
            end_lat_lng: input.end_lat_lng,
            polyline: input.polyline,
            city: input.city,
            state: input.state,
            country: input.country,
            created_at: now,
            updated_at: now,
        };
        self.inner.tracks.insert(track.id, track.clone());
        track
    }

    pub fn get_track(&self, id: u64) -> Option<Track> {
        self.inner.tracks.get(&id).map(|t| t.clone())
    }

    /// All tracks, ordered by id.
    pub fn list_tracks(&self) -> Vec<Track> {
        let mut tracks: Vec<Track> = self.inner.tracks.iter().map(|t| t.clone()).collect();
        tracks.sort_by_key(|t| t.id);
        tracks
    }

    pub fn update_track(&self, id: u64, input: TrackUpdate) -> Result<Track, AppError> {
        let mut entry = self
            .inner
            .tracks
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Track {} not found", id)))?;

        if let Some(name) = input.name {
            entry.name = name;
        }
        if let Some(distance) = input.distance {
            entry.distance = distance;
        }
        if let Some(gain) = input.elevation_gain {
            entry.elevation_gain = gain;
        }
        if input.elevation_loss.is_some() {
            entry.elevation_loss = input.elevation_loss;
        }
        if input.polyline.is_some() {
            entry.polyline = input.polyline;
        }
        if let Some(city) = input.city {
            entry.city = city;
        }
        if let Some(state) = input.state {
            entry.state = state;
        }
        if let Some(country) = input.country {
            entry.country = country;
        }
        entry.updated_at = chrono::Utc::now();
        Ok(entry.clone())
    }

    pub fn delete_track(&self, id: u64) -> Result<(), AppError> {
        self.inner
            .tracks
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Track {} not found", id)))?;
        self.inner.track_details.remove(&id);
        self.inner.efforts.retain(|_, e| e.track_id != id);
        Ok(())
    }

    // ─── Track Details Operations ────────────────────────────────

    /// Store the channel streams for a track. Fails when the track does not
    /// exist or already has a details record.
    pub fn create_track_details(
        &self,
        input: TrackDetailsCreate,
    ) -> Result<TrackDetails, AppError> {
        if self.get_track(input.track_id).is_none() {
            return Err(AppError::NotFound(format!(
                "Track {} not found",
                input.track_id
            )));
        }
        if self.inner.track_details.contains_key(&input.track_id) {
            return Err(AppError::BadRequest(format!(
                "Track {} already has details",
                input.track_id
            )));
        }

        let now = chrono::Utc::now();
        let details = TrackDetails {
            id: self.next_id(),
            track_id: input.track_id,
            streams: input.streams,
            created_at: now,
            updated_at: now,
        };
        self.inner
            .track_details
            .insert(details.track_id, details.clone());
        Ok(details)
    }

    pub fn get_track_details(&self, track_id: u64) -> Option<TrackDetails> {
        self.inner.track_details.get(&track_id).map(|d| d.clone())
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub fn create_activity(&self, athlete_id: u64, input: ActivityCreate) -> Activity {
        let now = chrono::Utc::now();
        let activity = Activity {
            id: self.next_id(),
            athlete_id,
            name: input.name,
            activity_type: input.activity_type,
            distance: input.distance,
            elevation_gain: input.elevation_gain,
            elevation_loss: input.elevation_loss,
            average_speed: input.average_speed,
            max_speed: input.max_speed,
            start_lat_lng: input.start_lat_lng,
            end_lat_lng: input.end_lat_lng,
            polyline: input.polyline,
            elapsed_time: input.elapsed_time,
            start_date_time: input.start_date_time,
            timezone: input.timezone,
            source: input.source,
            source_id: input.source_id,
            city: input.city,
            created_at: now,
            updated_at: now,
        };
        self.inner.activities.insert(activity.id, activity.clone());
        activity
    }

    pub fn get_activity(&self, id: u64) -> Option<Activity> {
        self.inner.activities.get(&id).map(|a| a.clone())
    }

    /// Activities for one athlete, most recent start first.
    pub fn list_activities(&self, athlete_id: u64) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self
            .inner
            .activities
            .iter()
            .filter(|a| a.athlete_id == athlete_id)
            .map(|a| a.clone())
            .collect();
        activities.sort_by(|a, b| b.start_date_time.cmp(&a.start_date_time));
        activities
    }

    pub fn delete_activity(&self, id: u64) -> Result<(), AppError> {
        self.inner
            .activities
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;
        self.inner.efforts.retain(|_, e| e.activity_id != id);
        Ok(())
    }

    // ─── Track Effort Operations ─────────────────────────────────

    pub fn create_effort(
        &self,
        athlete_id: u64,
        input: TrackEffortCreate,
    ) -> Result<TrackEffort, AppError> {
        if self.get_track(input.track_id).is_none() {
            return Err(AppError::NotFound(format!(
                "Track {} not found",
                input.track_id
            )));
        }
        if self.get_activity(input.activity_id).is_none() {
            return Err(AppError::NotFound(format!(
                "Activity {} not found",
                input.activity_id
            )));
        }

        let now = chrono::Utc::now();
        let effort = TrackEffort {
            id: self.next_id(),
            track_id: input.track_id,
            athlete_id,
            activity_id: input.activity_id,
            start_time: input.start_time,
            end_time: input.end_time,
            elapsed_time: (input.end_time - input.start_time).num_seconds(),
            polyline: input.polyline,
            created_at: now,
            updated_at: now,
        };
        self.inner.efforts.insert(effort.id, effort.clone());
        Ok(effort)
    }

    /// Efforts on a track, fastest first.
    pub fn list_efforts_by_track(&self, track_id: u64) -> Vec<TrackEffort> {
        let mut efforts: Vec<TrackEffort> = self
            .inner
            .efforts
            .iter()
            .filter(|e| e.track_id == track_id)
            .map(|e| e.clone())
            .collect();
        efforts.sort_by_key(|e| e.elapsed_time);
        efforts
    }

    /// Efforts recorded in an activity, in start order.
    pub fn list_efforts_by_activity(&self, activity_id: u64) -> Vec<TrackEffort> {
        let mut efforts: Vec<TrackEffort> = self
            .inner
            .efforts
            .iter()
            .filter(|e| e.activity_id == activity_id)
            .map(|e| e.clone())
            .collect();
        efforts.sort_by_key(|e| e.start_time);
        efforts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn track_input(name: &str) -> TrackCreate {
        TrackCreate {
            name: name.to_string(),
            activity_type: "Ride".to_string(),
            distance: 5_000.0,
            elevation_gain: 120.0,
            elevation_loss: Some(110.0),
            start_lat_lng: [37.0, -122.0],
            end_lat_lng: [37.1, -122.1],
            polyline: Some("abc".to_string()),
            city: "Santa Cruz".to_string(),
            state: "CA".to_string(),
            country: "USA".to_string(),
        }
    }

    #[test]
    fn test_athlete_email_uniqueness() {
        let db = MemoryDb::new();
        db.create_athlete("a@example.com", None, None, None).unwrap();
        let err = db
            .create_athlete("A@Example.com", None, None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_track_crud_roundtrip() {
        let db = MemoryDb::new();
        let track = db.create_track(track_input("Flow Trail"));

        assert_eq!(db.get_track(track.id).unwrap().name, "Flow Trail");

        let updated = db
            .update_track(
                track.id,
                TrackUpdate {
                    name: Some("Upper Flow Trail".to_string()),
                    distance: None,
                    elevation_gain: None,
                    elevation_loss: None,
                    polyline: None,
                    city: None,
                    state: None,
                    country: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Upper Flow Trail");
        assert_eq!(updated.distance, 5_000.0);

        db.delete_track(track.id).unwrap();
        assert!(db.get_track(track.id).is_none());
        assert!(matches!(
            db.delete_track(track.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_track_details_lifecycle() {
        use crate::models::{Stream, StreamData, StreamType, TrackDetailsCreate};

        let db = MemoryDb::new();
        let track = db.create_track(track_input("Flow Trail"));

        let input = TrackDetailsCreate {
            track_id: track.id,
            streams: vec![Stream {
                stream_type: StreamType::Altitude,
                data: StreamData::Scalars(vec![100.0, 110.0]),
                size: 2,
            }],
        };
        let details = db.create_track_details(input.clone()).unwrap();
        assert_eq!(details.track_id, track.id);
        assert_eq!(db.get_track_details(track.id).unwrap().id, details.id);

        // One details record per track
        assert!(matches!(
            db.create_track_details(input.clone()),
            Err(AppError::BadRequest(_))
        ));

        db.delete_track(track.id).unwrap();
        assert!(db.get_track_details(track.id).is_none());
        assert!(matches!(
            db.create_track_details(input),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_deleting_athlete_removes_owned_records() {
        let db = MemoryDb::new();
        let athlete = db.create_athlete("a@example.com", None, None, None).unwrap();
        let track = db.create_track(track_input("Flow Trail"));
        let activity = db.create_activity(
            athlete.id,
            ActivityCreate {
                name: "Morning ride".to_string(),
                activity_type: "ride".to_string(),
                distance: 10_000.0,
                elevation_gain: 200.0,
                elevation_loss: None,
                average_speed: None,
                max_speed: None,
                start_lat_lng: [37.0, -122.0],
                end_lat_lng: [37.0, -122.0],
                polyline: "xyz".to_string(),
                elapsed_time: 3600,
                start_date_time: Utc::now(),
                timezone: "America/Los_Angeles".to_string(),
                source: "upload".to_string(),
                source_id: None,
                city: "Santa Cruz".to_string(),
            },
        );
        let start = Utc::now();
        db.create_effort(
            athlete.id,
            TrackEffortCreate {
                track_id: track.id,
                activity_id: activity.id,
                start_time: start,
                end_time: start + Duration::seconds(300),
                polyline: "xyz".to_string(),
            },
        )
        .unwrap();

        db.delete_athlete(athlete.id).unwrap();
        assert!(db.get_activity(activity.id).is_none());
        assert!(db.list_efforts_by_track(track.id).is_empty());
        // Tracks are shared, not owned
        assert!(db.get_track(track.id).is_some());
    }

    #[test]
    fn test_efforts_sorted_fastest_first() {
        let db = MemoryDb::new();
        let athlete = db.create_athlete("a@example.com", None, None, None).unwrap();
        let track = db.create_track(track_input("Flow Trail"));
        let activity = db.create_activity(
            athlete.id,
            ActivityCreate {
                name: "Ride".to_string(),
                activity_type: "ride".to_string(),
                distance: 1.0,
                elevation_gain: 0.0,
                elevation_loss: None,
                average_speed: None,
                max_speed: None,
                start_lat_lng: [0.0, 0.0],
                end_lat_lng: [0.0, 0.0],
                polyline: String::new(),
                elapsed_time: 0,
                start_date_time: Utc::now(),
                timezone: "UTC".to_string(),
                source: "upload".to_string(),
                source_id: None,
                city: String::new(),
            },
        );

        let start = Utc::now();
        for seconds in [420, 300, 360] {
            db.create_effort(
                athlete.id,
                TrackEffortCreate {
                    track_id: track.id,
                    activity_id: activity.id,
                    start_time: start,
                    end_time: start + Duration::seconds(seconds),
                    polyline: String::new(),
                },
            )
            .unwrap();
        }

        let times: Vec<i64> = db
            .list_efforts_by_track(track.id)
            .iter()
            .map(|e| e.elapsed_time)
            .collect();
        assert_eq!(times, vec![300, 360, 420]);
    }
}
