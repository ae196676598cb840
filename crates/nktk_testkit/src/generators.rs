//! Property-based test generators using proptest.
//!
//! Coordinates stay within the valid globe, labels mix ASCII with
//! multi-byte characters.

use nktk_codec::{Point, TrackRecord, Waypoint, MAX_PACKED, MIN_PACKED};
use proptest::prelude::*;

/// Strategy for latitudes in degrees.
pub fn latitude_strategy() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

/// Strategy for longitudes in degrees.
pub fn longitude_strategy() -> impl Strategy<Value = f64> {
    -180.0f64..=180.0
}

/// Strategy for points anywhere on the globe.
pub fn point_strategy() -> impl Strategy<Value = Point> {
    (latitude_strategy(), longitude_strategy()).prop_map(|(lat, lng)| Point::new(lat, lng))
}

/// Strategy for drawable segments (two points or more).
pub fn segment_strategy(max_points: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(point_strategy(), 2..=max_points.max(2))
}

/// Strategy for track names and waypoint labels.
pub fn label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ÖöÜüß鉄道山川-]{0,24}").expect("Invalid regex")
}

/// Strategy for waypoints.
pub fn waypoint_strategy() -> impl Strategy<Value = Waypoint> {
    (label_strategy(), point_strategy()).prop_map(|(label, point)| Waypoint::at(label, point))
}

/// Strategy for numbers that fit a packed varint.
pub fn packable_number_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        3 => MIN_PACKED..=MAX_PACKED,
        1 => -70i64..=70,
        1 => -8200i64..=8200,
    ]
}

/// Strategy for complete, encodable tracks.
///
/// Colours stay small and all segments are drawable, so a track survives an
/// encode and decode unchanged up to quantization.
pub fn track_strategy() -> impl Strategy<Value = TrackRecord> {
    (
        label_strategy(),
        prop::collection::vec(segment_strategy(12), 0..4),
        prop::collection::vec(waypoint_strategy(), 0..6),
        0i64..=64,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(name, segments, waypoints, color, ticks, hidden)| TrackRecord {
            name,
            segments,
            waypoints,
            color,
            measure_ticks_shown: ticks,
            track_hidden: hidden,
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
