// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FIT activity decoding pipeline.
//!
//! Three stages, composed in sequence:
//! 1. `decode` - turn raw FIT bytes into a sequence of [`ActivityRecord`]s
//! 2. `geometry` - filter records with a position fix and build a [`GeoTrack`]
//! 3. `summary` - derive the coarse track summary the application persists

pub mod decode;
pub mod geometry;
pub mod record;
pub mod summary;

pub use decode::decode_records;
pub use geometry::{build_track, semicircles_to_degrees};
pub use record::{ActivityRecord, GeoTrack, TrackChannels};
pub use summary::TrackSummary;
