//! Benchmark utilities.

#![warn(missing_docs)]

use nktk_codec::{Point, TrackRecord, Waypoint};
use rand::Rng;

/// Generate a random walk of `len` points starting near `start`.
///
/// Steps are a few metres long, like a recorded GPS track.
pub fn random_walk(start: Point, len: usize) -> Vec<Point> {
    let mut rng = rand::thread_rng();
    let mut point = start;
    (0..len)
        .map(|_| {
            point.lat = (point.lat + rng.gen_range(-0.0005..0.0005)).clamp(-90.0, 90.0);
            point.lng = (point.lng + rng.gen_range(-0.0005..0.0005)).clamp(-180.0, 180.0);
            point
        })
        .collect()
}

/// Generate a track with `segments` segments of `points` points each and
/// `waypoints` waypoints.
pub fn random_track(segments: usize, points: usize, waypoints: usize) -> TrackRecord {
    let mut rng = rand::thread_rng();
    let start = Point::new(rng.gen_range(-60.0..60.0), rng.gen_range(-170.0..170.0));
    let mut track = TrackRecord::new("Benchmark track").with_color(3);
    for _ in 0..segments {
        track = track.with_segment(random_walk(start, points));
    }
    for (i, point) in random_walk(start, waypoints).into_iter().enumerate() {
        track = track.with_waypoint(Waypoint::at(format!("Waypoint {}", i), point));
    }
    track
}
