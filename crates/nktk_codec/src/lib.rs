//! # nktk Codec
//!
//! Compact text encoding of GPS tracks for embedding in URLs.
//!
//! A track (name, polylines, waypoints and display flags) is packed into a
//! short URL-safe string, a *fragment*. Several fragments joined by `/`
//! follow `nktk=` in the hash of a share URL.
//!
//! ## Wire format
//!
//! - Numbers use a 1 to 4 byte variable-length layout with per-tier offsets
//! - Coordinates are quantized to 2^24 - 1 steps per 360 degrees
//! - Segment points are delta-coded, waypoints are offsets from their mean
//! - Fragments open with a version marker: 1 to 3 are packed layouts,
//!   4 is protobuf (decode only)
//!
//! ## Damaged input
//!
//! Decoding never fails because of bad input. A damaged fragment yields a
//! [`DecodedTrack`] holding whatever could be read, with its error set to
//! [`TrackError::Corrupt`]. Only misuse of the API, such as packing an
//! out-of-range value, surfaces as an `Err`.
//!
//! ## Usage
//!
//! ```
//! use nktk_codec::{decode_sequence, encode_fragment, Point, TrackRecord, Waypoint};
//!
//! let track = TrackRecord::new("Morning ride")
//!     .with_segment([Point::new(55.75, 37.61), Point::new(55.76, 37.63)])
//!     .with_waypoint(Waypoint::new("Cafe", 55.755, 37.62));
//!
//! let fragment = encode_fragment(&track).unwrap();
//! let decoded = decode_sequence(&fragment).unwrap();
//! assert_eq!(decoded[0].track.name, "Morning ride");
//! assert!(!decoded[0].is_corrupt());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod fragment;
mod legacy;
mod link;
mod quantize;
mod reader;
mod schema;
mod sequence;
mod track;
mod transcode;
mod varint;
mod writer;

pub use config::{LinkConfig, DEFAULT_STORAGE_URL};
pub use error::{CodecError, CodecResult, LinkError, LinkResult};
pub use fragment::{
    decode_fragment, decode_fragment_bytes, decode_track_url_data, encode_fragment, Fragment,
    SCHEMA_VERSION,
};
pub use legacy::{decode_legacy, encode_legacy, LegacyVersion, WAYPOINT_SYMBOL};
pub use link::{FetchDescriptor, LinkResolver, ResponseType};
pub use quantize::{
    anchor, delta_decode, delta_encode, dequantize, quantize, DeltaChain, GridPoint, ARC_UNIT,
    MAX_QUANTIZATION_ERROR,
};
pub use reader::PackedReader;
pub use schema::decode_schema;
pub use sequence::{
    decode_fragments, decode_sequence, encode_sequence, parse_track_url, share_parameter,
    FRAGMENT_SEPARATOR, SEQUENCE_KEY,
};
pub use track::{DecodedTrack, Point, Segment, TrackError, TrackRecord, Waypoint, DEFAULT_TRACK_NAME};
pub use transcode::{decode_url_safe, encode_url_safe};
pub use varint::{pack_number, packed_len, unpack_number, MAX_PACKED, MAX_VARINT_LEN, MIN_PACKED};
pub use writer::PackedWriter;

/// Latest layout version written by [`encode_fragment`].
pub const FORMAT_VERSION: u8 = LegacyVersion::LATEST.number();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_layout_is_three() {
        assert_eq!(FORMAT_VERSION, 3);
    }

    #[test]
    fn public_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrackRecord>();
        assert_send_sync::<DecodedTrack>();
        assert_send_sync::<LinkResolver>();
        assert_send_sync::<CodecError>();
        assert_send_sync::<LinkError>();
    }

    #[test]
    fn unknown_version_five() {
        let mut bytes = Vec::new();
        pack_number(5, &mut bytes).unwrap();
        let decoded = decode_sequence(&encode_url_safe(&bytes)).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].track.name, DEFAULT_TRACK_NAME);
        assert_eq!(decoded[0].error, Some(TrackError::Corrupt));
    }
}
