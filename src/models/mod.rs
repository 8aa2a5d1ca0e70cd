// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod athlete;
pub mod effort;
pub mod track;

pub use activity::{Activity, ActivityCreate};
pub use athlete::{Athlete, AthleteToken, AthleteUpdate};
pub use effort::{TrackEffort, TrackEffortCreate};
pub use track::{
    Stream, StreamData, StreamType, Track, TrackCreate, TrackDetails, TrackDetailsCreate,
    TrackUpdate,
};
