//! Sample tracks and helpers for comparing decoded geometry.

use nktk_codec::{encode_sequence, Point, TrackRecord, Waypoint};
use std::io::Write;
use tempfile::NamedTempFile;

/// Largest expected distance between an encoded and a decoded coordinate.
pub const COORDINATE_TOLERANCE: f64 = 1.08e-5;

/// A loop in the Alps with a summit and a hut.
pub fn mountain_loop() -> TrackRecord {
    TrackRecord::new("Mountain loop")
        .with_segment([
            Point::new(46.5475, 7.9853),
            Point::new(46.5512, 7.9921),
            Point::new(46.5580, 7.9989),
            Point::new(46.5531, 8.0102),
            Point::new(46.5475, 7.9853),
        ])
        .with_waypoint(Waypoint::new("Summit", 46.5580, 7.9989))
        .with_waypoint(Waypoint::new("Hütte", 46.5531, 8.0102))
        .with_color(2)
        .with_measure_ticks(true)
}

/// A track crossing the antimeridian and the equator, split in two segments.
pub fn world_crossing() -> TrackRecord {
    TrackRecord::new("Crossing")
        .with_segment([
            Point::new(-0.5, 179.9),
            Point::new(0.5, 180.0),
        ])
        .with_segment([
            Point::new(0.5, -180.0),
            Point::new(1.5, -179.5),
            Point::new(89.9, -10.0),
        ])
        .with_hidden(true)
}

/// A track with multi-byte names and no segments.
pub fn multilingual_markers() -> TrackRecord {
    TrackRecord::new("鉄道 Ö")
        .with_waypoint(Waypoint::new("Ö", 60.0, 25.0))
        .with_waypoint(Waypoint::new("鉄道", 35.68, 139.76))
        .with_waypoint(Waypoint::new("", -33.86, 151.21))
}

/// All sample tracks.
pub fn sample_tracks() -> Vec<TrackRecord> {
    vec![mountain_loop(), world_crossing(), multilingual_markers()]
}

/// Writes tracks as a stored response body, the way a storage server
/// returns them, and returns the file.
pub fn stored_response(tracks: &[TrackRecord]) -> NamedTempFile {
    let body = encode_sequence(tracks).expect("Failed to encode tracks");
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(body.as_bytes())
        .expect("Failed to write response body");
    file
}

/// Returns true if two points agree within quantization error.
pub fn points_close(a: Point, b: Point) -> bool {
    (a.lat - b.lat).abs() <= COORDINATE_TOLERANCE && (a.lng - b.lng).abs() <= COORDINATE_TOLERANCE
}

/// Asserts that `decoded` reproduces `original` up to quantization.
///
/// Segments with fewer than two points are not encoded, so they are
/// skipped on the original side. Empty names decode as the default name.
pub fn assert_tracks_match(original: &TrackRecord, decoded: &TrackRecord) {
    if !original.name.is_empty() {
        assert_eq!(original.name, decoded.name, "name");
    }
    assert_eq!(original.color, decoded.color, "color");
    assert_eq!(original.measure_ticks_shown, decoded.measure_ticks_shown, "ticks");
    assert_eq!(original.track_hidden, decoded.track_hidden, "hidden");

    let segments: Vec<_> = original.drawable_segments().collect();
    assert_eq!(segments.len(), decoded.segments.len(), "segment count");
    for (expected, actual) in segments.iter().zip(&decoded.segments) {
        assert_eq!(expected.len(), actual.len(), "point count");
        for (a, b) in expected.iter().zip(actual) {
            assert!(points_close(*a, *b), "point {:?} decoded as {:?}", a, b);
        }
    }

    assert_eq!(original.waypoints.len(), decoded.waypoints.len(), "waypoint count");
    for (a, b) in original.waypoints.iter().zip(&decoded.waypoints) {
        assert_eq!(a.label, b.label);
        assert!(points_close(a.point(), b.point()), "waypoint {:?} decoded as {:?}", a, b);
    }
}
