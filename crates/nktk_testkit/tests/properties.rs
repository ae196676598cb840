//! Property tests for the track codec.

use nktk_codec::{
    anchor, decode_fragment, decode_fragments, decode_legacy, delta_decode, delta_encode,
    encode_fragment, encode_legacy, encode_url_safe, pack_number, packed_len, unpack_number,
    GridPoint, LegacyVersion, PackedReader, DEFAULT_TRACK_NAME, MAX_PACKED, MIN_PACKED,
};
use nktk_testkit::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn delta_roundtrip_within_tolerance(points in prop::collection::vec(point_strategy(), 0..64)) {
        let decoded = delta_decode(delta_encode(&points).unwrap());
        prop_assert_eq!(decoded.len(), points.len());
        for (a, b) in points.iter().zip(&decoded) {
            prop_assert!(points_close(*a, *b), "{:?} decoded as {:?}", a, b);
        }
    }

    #[test]
    fn legacy_roundtrip(track in track_strategy()) {
        let decoded = decode_fragment(&encode_fragment(&track).unwrap()).unwrap();
        prop_assert!(!decoded.is_corrupt());
        assert_tracks_match(&track, &decoded.track);
        if track.name.is_empty() {
            prop_assert_eq!(decoded.track.name, DEFAULT_TRACK_NAME);
        }
    }

    #[test]
    fn truncated_prefixes_are_corrupt(track in track_strategy()) {
        let bytes = encode_legacy(&track).unwrap();
        let body = &bytes[1..];
        let full = decode_legacy(body, LegacyVersion::V3).unwrap();
        let layout = BodyLayout::walk(body);

        for cut in 0..body.len() {
            let partial = decode_legacy(&body[..cut], LegacyVersion::V3).unwrap();
            prop_assert!(partial.is_corrupt(), "prefix of {} bytes", cut);

            // Segments that end before the cut come back whole; the cut one
            // may follow as a shorter prefix.
            let whole = layout.segments_before(cut);
            let segments = &partial.track.segments;
            prop_assert!(segments.len() == whole || segments.len() == whole + 1);
            prop_assert_eq!(&segments[..whole], &full.track.segments[..whole]);
            if let Some(cut_segment) = segments.get(whole) {
                let original = &full.track.segments[whole];
                prop_assert!(!cut_segment.is_empty() && cut_segment.len() < original.len());
                prop_assert_eq!(&original[..cut_segment.len()], &cut_segment[..]);
            }

            if cut >= layout.flags_end {
                prop_assert_eq!(partial.track.color, full.track.color);
                prop_assert_eq!(partial.track.measure_ticks_shown, full.track.measure_ticks_shown);
                prop_assert_eq!(partial.track.track_hidden, full.track.track_hidden);
            }

            let whole = layout.waypoints_before(cut);
            prop_assert_eq!(&partial.track.waypoints[..], &full.track.waypoints[..whole]);
        }
    }

    #[test]
    fn corrupt_fragment_isolated(first in track_strategy(), last in track_strategy()) {
        let a = encode_fragment(&first).unwrap();
        let b = encode_fragment(&last).unwrap();
        let results = decode_fragments([a.as_str(), "not-valid-base64!!", b.as_str()]).unwrap();

        prop_assert_eq!(results.len(), 3);
        prop_assert!(!results[0].is_corrupt());
        prop_assert!(results[1].is_corrupt());
        prop_assert_eq!(results[1].track.name.as_str(), DEFAULT_TRACK_NAME);
        prop_assert!(!results[2].is_corrupt());
        assert_tracks_match(&first, &results[0].track);
        assert_tracks_match(&last, &results[2].track);
    }

    #[test]
    fn labels_roundtrip(label in label_strategy()) {
        let track = nktk_codec::TrackRecord::new(label.clone())
            .with_waypoint(nktk_codec::Waypoint::new(label.clone(), 1.0, 2.0));
        let decoded = decode_fragment(&encode_fragment(&track).unwrap()).unwrap().track;
        prop_assert_eq!(&decoded.waypoints[0].label, &label);
        if !label.is_empty() {
            prop_assert_eq!(&decoded.name, &label);
        }
    }

    #[test]
    fn unknown_versions_are_corrupt(marker in prop_oneof![-64i64..=0, 5i64..=63], tail in prop::collection::vec(any::<u8>(), 0..16)) {
        let mut bytes = Vec::new();
        pack_number(marker, &mut bytes).unwrap();
        bytes.extend(tail);
        let decoded = decode_fragment(&encode_url_safe(&bytes)).unwrap();
        prop_assert!(decoded.is_corrupt());
        prop_assert_eq!(decoded.track.name.as_str(), DEFAULT_TRACK_NAME);
        prop_assert!(decoded.track.segments.is_empty());
    }

    #[test]
    fn anchor_is_within_bounds(points in prop::collection::vec(point_strategy(), 1..16)) {
        let mid = anchor(points.iter().copied());
        let grid: Vec<_> = points.iter().copied().map(GridPoint::from_point).collect();
        let min_x = grid.iter().map(|p| p.x).min().unwrap();
        let max_x = grid.iter().map(|p| p.x).max().unwrap();
        prop_assert!(mid.x >= min_x - 1 && mid.x <= max_x + 1);
    }
}

proptest! {
    #![proptest_config(PropTestConfig::thorough().to_proptest_config())]

    #[test]
    fn varint_roundtrip(value in packable_number_strategy()) {
        let mut out = Vec::new();
        let len = pack_number(value, &mut out).unwrap();
        prop_assert_eq!(len, out.len());
        prop_assert_eq!(Some(len), packed_len(value));
        prop_assert_eq!(unpack_number(&out, 0).unwrap(), (value, len));
    }

    #[test]
    fn varint_rejects_out_of_range(excess in 1i64..1_000_000) {
        let mut out = Vec::new();
        prop_assert!(pack_number(MAX_PACKED + excess, &mut out).is_err());
        prop_assert!(pack_number(MIN_PACKED - excess, &mut out).is_err());
        prop_assert!(out.is_empty());
    }
}

/// Byte offsets at which each field group of a packed body ends.
struct BodyLayout {
    segment_ends: Vec<usize>,
    flags_end: usize,
    waypoint_ends: Vec<usize>,
}

impl BodyLayout {
    /// Walks an intact version 3 body.
    fn walk(body: &[u8]) -> Self {
        let mut reader = PackedReader::new(body);
        reader.read_text().unwrap();

        let mut segment_ends = Vec::new();
        for _ in 0..reader.read_count().unwrap() {
            for _ in 0..reader.read_count().unwrap() {
                reader.read_grid_point().unwrap();
            }
            segment_ends.push(reader.position());
        }

        reader.read_number().unwrap();
        reader.read_flag().unwrap();
        reader.read_flag().unwrap();
        let flags_end = reader.position();

        let mut waypoint_ends = Vec::new();
        let count = reader.read_count().unwrap();
        if count > 0 {
            reader.read_grid_point().unwrap();
            for _ in 0..count {
                reader.read_text().unwrap();
                reader.read_number().unwrap();
                reader.read_grid_point().unwrap();
                waypoint_ends.push(reader.position());
            }
        }
        assert!(reader.is_empty());

        Self {
            segment_ends,
            flags_end,
            waypoint_ends,
        }
    }

    fn segments_before(&self, cut: usize) -> usize {
        self.segment_ends.iter().filter(|&&end| end <= cut).count()
    }

    fn waypoints_before(&self, cut: usize) -> usize {
        self.waypoint_ends.iter().filter(|&&end| end <= cut).count()
    }
}

#[test]
fn multi_byte_labels_roundtrip() {
    let track = multilingual_markers();
    let decoded = decode_fragment(&encode_fragment(&track).unwrap()).unwrap();
    assert_eq!(decoded.track.name, "鉄道 Ö");
    assert_eq!(decoded.track.waypoints[0].label, "Ö");
    assert_eq!(decoded.track.waypoints[1].label, "鉄道");
}

#[test]
fn unknown_version_five() {
    let decoded = decode_fragment(&encode_url_safe(&[69])).unwrap();
    assert!(decoded.is_corrupt());
    assert_eq!(decoded.track.name, DEFAULT_TRACK_NAME);
}

#[test]
fn vectors_hold_for_samples() {
    for (vector, track) in fragment_vectors() {
        assert_eq!(encode_fragment(&track).unwrap(), vector.input);
    }
}
