//! Fuzz testing harnesses for nktk.
//!
//! This module provides fuzz targets that can be used with cargo-fuzz
//! or other fuzzing frameworks. Decoding must never panic and never
//! return `Err` for damaged input.

use nktk_codec::{
    decode_fragment_bytes, decode_legacy, decode_schema, decode_sequence, encode_fragment,
    unpack_number, LegacyVersion, LinkResolver, MAX_VARINT_LEN,
};

/// Fuzz target for fragment bytes.
///
/// Every byte sequence decodes to exactly one result.
pub fn fuzz_fragment_bytes(data: &[u8]) {
    decode_fragment_bytes(data).expect("Damaged input must not fail");
}

/// Fuzz target for each packed layout without a version marker.
pub fn fuzz_legacy_layouts(data: &[u8]) {
    for version in [
        LegacyVersion::V0,
        LegacyVersion::V1,
        LegacyVersion::V2,
        LegacyVersion::V3,
    ] {
        decode_legacy(data, version).expect("Damaged input must not fail");
    }
}

/// Fuzz target for the protobuf layout.
pub fn fuzz_schema(data: &[u8]) {
    let _ = decode_schema(data);
}

/// Fuzz target for sequence text, including link response bodies.
pub fn fuzz_sequence_text(data: &[u8]) {
    let text = String::from_utf8_lossy(data);
    let results = decode_sequence(&text).expect("Damaged input must not fail");
    let fragments = text.split('/').filter(|f| !f.is_empty()).count();
    assert_eq!(results.len(), fragments, "One result per fragment");

    let resolved = LinkResolver::default()
        .parse_responses(&[data])
        .expect("A single response body must not fail");
    assert_eq!(resolved.len(), results.len(), "Response decodes like the sequence");
}

/// Fuzz target for number unpacking.
pub fn fuzz_unpack_number(data: &[u8]) {
    if let Ok((_, len)) = unpack_number(data, 0) {
        assert!((1..=MAX_VARINT_LEN).contains(&len));
    }
}

/// Fuzz target for decode, encode, decode.
///
/// Whatever a fragment decodes to must encode again and decode to the
/// same track.
pub fn fuzz_reencode(data: &[u8]) {
    let Ok(first) = decode_fragment_bytes(data) else {
        return;
    };
    // Values read from damaged bytes can be out of range for packing.
    let Ok(text) = encode_fragment(&first.track) else {
        return;
    };
    let second = nktk_codec::decode_fragment(&text).expect("Re-encoded fragment must decode");
    assert!(!second.is_corrupt(), "Re-encoded fragment is damaged");
    assert_eq!(first.track.name, second.track.name);
    assert_eq!(
        first.track.drawable_segments().count(),
        second.track.segments.len()
    );
}
