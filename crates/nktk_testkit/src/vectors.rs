//! Wire vectors for nktk.
//!
//! These vectors pin the byte layout so that every implementation of the
//! format produces and accepts identical links.

use nktk_codec::{Point, TrackRecord, Waypoint};
use serde::{Deserialize, Serialize};

/// A test vector that can be shared across implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Input: a decimal number or fragment text.
    pub input: String,
    /// Expected bytes (hex-encoded).
    pub expected_hex: String,
    /// Expected error message (if this should fail).
    pub expected_error: Option<String>,
}

fn number_vector(value: i64, expected_hex: &str, description: &str) -> TestVector {
    TestVector {
        id: format!("varint_{}", value).replace('-', "neg"),
        description: description.into(),
        input: value.to_string(),
        expected_hex: expected_hex.into(),
        expected_error: None,
    }
}

/// Packed number vectors, covering every tier boundary.
pub fn varint_vectors() -> Vec<TestVector> {
    vec![
        number_vector(0, "40", "zero"),
        number_vector(-64, "00", "smallest 1-byte"),
        number_vector(63, "7f", "largest 1-byte"),
        number_vector(64, "c040", "smallest positive 2-byte"),
        number_vector(-65, "bf3f", "largest negative 2-byte"),
        number_vector(8191, "ff7f", "largest 2-byte"),
        number_vector(-8192, "8000", "smallest 2-byte"),
        number_vector(8192, "80c040", "smallest positive 3-byte"),
        number_vector(-8193, "ffbf3f", "largest negative 3-byte"),
        number_vector(1048575, "ffff7f", "largest 3-byte"),
        number_vector(-1048576, "808000", "smallest 3-byte"),
        number_vector(1048576, "8080c080", "smallest positive 4-byte"),
        number_vector(-1048577, "ffffbf7f", "largest negative 4-byte"),
        number_vector(268435455, "ffffffff", "largest 4-byte"),
        number_vector(-268435456, "80808000", "smallest 4-byte"),
        TestVector {
            id: "varint_overflow".into(),
            description: "one past the largest packable number".into(),
            input: "268435456".into(),
            expected_hex: String::new(),
            expected_error: Some("number 268435456 too big to pack in 29 bits".into()),
        },
    ]
}

/// Fragment vectors paired with the tracks that encode to them.
pub fn fragment_vectors() -> Vec<(TestVector, TrackRecord)> {
    vec![
        (
            TestVector {
                id: "fragment_minimal".into(),
                description: "one segment from the origin, no waypoints".into(),
                input: "Q0FBQUJAQIvsQovsQkBAQEA=".into(),
                expected_hex: "434141414240408bec428bec4240404040".into(),
                expected_error: None,
            },
            TrackRecord::new("A").with_segment([Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
        ),
        (
            TestVector {
                id: "fragment_full".into(),
                description: "multi-byte names, flags, waypoints, dropped single-point segment"
                    .into(),
                input: "Q0nDliDpiYTpgZNBQriA64Cyyp6B0EBlRUFBQuyA64DMyp6BRVN0YXJ0QSg0RumJhOmBk0FXSw=="
                    .into(),
                expected_hex: concat!(
                    "4349c39620e98984e981934142b880eb80b2ca9e81d04065454141",
                    "42ec80eb80ccca9e8145537461727441283446e98984e9819341574b"
                )
                .into(),
                expected_error: None,
            },
            full_track(),
        ),
    ]
}

/// The track behind the `fragment_full` vector.
pub fn full_track() -> TrackRecord {
    TrackRecord::new("Ö 鉄道")
        .with_segment([Point::new(55.7512, 37.6184), Point::new(55.752, 37.6201)])
        .with_segment([Point::new(1.0, 1.0)])
        .with_color(5)
        .with_measure_ticks(true)
        .with_hidden(true)
        .with_waypoint(Waypoint::new("Start", 55.7515, 37.619))
        .with_waypoint(Waypoint::new("鉄道", 55.752, 37.62))
}

/// First decoded point of `fragment_full` as `(lat, lng)`.
pub const FULL_TRACK_FIRST_POINT: (f64, f64) = (55.75119827694883, 37.61839137186953);

/// Generate all test vectors as JSON for cross-implementation use.
pub fn all_vectors_json() -> String {
    let vectors = AllTestVectors {
        varint: varint_vectors(),
        fragment: fragment_vectors().into_iter().map(|(vector, _)| vector).collect(),
    };

    serde_json::to_string_pretty(&vectors).expect("Failed to serialize vectors")
}

#[derive(Debug, Serialize, Deserialize)]
struct AllTestVectors {
    varint: Vec<TestVector>,
    fragment: Vec<TestVector>,
}

/// Encodes bytes as hexadecimal string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes hexadecimal string to bytes.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex = hex.replace([' ', '\n', '\r'], "");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}
