use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mtb_tracker::fit::{build_track, ActivityRecord, TrackSummary};

/// Synthesize a ride at 1 Hz: a gently curving path with climbing and
/// speed data, the shape a real head unit produces.
fn synthetic_records(count: usize) -> Vec<ActivityRecord> {
    let start = Utc.with_ymd_and_hms(2026, 8, 1, 14, 30, 0).unwrap();
    (0..count)
        .map(|i| {
            let t = i as f64;
            ActivityRecord {
                // ~37.4 N, ~122.2 W in semicircles, drifting north-east
                position_lat: Some(446_221_396 + (i as i32) * 40),
                position_long: Some(-1_457_905_853 + (i as i32) * 55),
                timestamp: Some(start + Duration::seconds(i as i64)),
                altitude: Some(100.0 + (t / 10.0).sin() * 5.0),
                enhanced_altitude: Some(100.5 + (t / 10.0).sin() * 5.0),
                speed: Some(4.0),
                enhanced_speed: Some(4.0 + (t / 60.0).cos()),
                distance: Some(t * 4.0),
            }
        })
        .collect()
}

fn benchmark_build_track(c: &mut Criterion) {
    // One hour and four hours of riding at 1 Hz
    let short_ride = synthetic_records(3_600);
    let long_ride = synthetic_records(14_400);

    let mut group = c.benchmark_group("build_track");

    group.bench_function("one_hour_ride", |b| {
        b.iter(|| build_track(black_box(&short_ride)))
    });

    group.bench_function("four_hour_ride", |b| {
        b.iter(|| build_track(black_box(&long_ride)))
    });

    group.finish();
}

fn benchmark_track_summary(c: &mut Criterion) {
    let records = synthetic_records(14_400);
    let track = build_track(&records).expect("synthetic ride should produce geometry");

    c.bench_function("track_summary_four_hour_ride", |b| {
        b.iter(|| TrackSummary::from_track(black_box(&track)))
    });
}

criterion_group!(benches, benchmark_build_track, benchmark_track_summary);
criterion_main!(benches);
