//! Single fragment dispatch.
//!
//! A fragment is the URL-safe text of one track. Its bytes open with a
//! packed version marker that selects the layout of the rest.

use tracing::trace;

use crate::error::CodecResult;
use crate::legacy::{decode_legacy, encode_legacy, LegacyVersion};
use crate::schema::decode_schema;
use crate::track::{DecodedTrack, TrackRecord};
use crate::transcode::{decode_url_safe, encode_url_safe};
use crate::varint::unpack_number;

/// Version marker of the protobuf layout.
pub const SCHEMA_VERSION: i64 = 4;

/// The bytes of one fragment, split by version marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Packed layout, versions 1 to 3.
    Legacy {
        /// Layout revision.
        version: LegacyVersion,
        /// Bytes after the marker.
        body: &'a [u8],
    },
    /// Protobuf layout, version 4.
    Schema(&'a [u8]),
    /// Unknown marker, or none could be read.
    Unknown(Option<i64>),
}

impl<'a> Fragment<'a> {
    /// Reads the version marker at the start of `bytes`.
    pub fn parse(bytes: &'a [u8]) -> Self {
        let Ok((marker, len)) = unpack_number(bytes, 0) else {
            return Fragment::Unknown(None);
        };
        let body = &bytes[len..];
        match LegacyVersion::from_marker(marker) {
            Some(version) => Fragment::Legacy { version, body },
            None if marker == SCHEMA_VERSION => Fragment::Schema(body),
            None => Fragment::Unknown(Some(marker)),
        }
    }

    /// The version marker, if one was read.
    pub fn marker(&self) -> Option<i64> {
        match self {
            Fragment::Legacy { version, .. } => Some(i64::from(version.number())),
            Fragment::Schema(_) => Some(SCHEMA_VERSION),
            Fragment::Unknown(marker) => *marker,
        }
    }

    /// Decodes the fragment with the layout its marker names.
    pub fn decode(self) -> CodecResult<DecodedTrack> {
        match self {
            Fragment::Legacy { version, body } => decode_legacy(body, version),
            Fragment::Schema(body) => Ok(decode_schema(body)),
            Fragment::Unknown(marker) => {
                trace!(?marker, "unsupported fragment version");
                Ok(DecodedTrack::corrupt())
            }
        }
    }
}

/// Decodes the bytes of one fragment.
pub fn decode_fragment_bytes(bytes: &[u8]) -> CodecResult<DecodedTrack> {
    Fragment::parse(bytes).decode()
}

/// Decodes the text of one fragment.
///
/// Text that is not URL-safe base64 decodes to a corrupt result.
pub fn decode_fragment(text: &str) -> CodecResult<DecodedTrack> {
    match decode_url_safe(text) {
        Some(bytes) => decode_fragment_bytes(&bytes),
        None => Ok(DecodedTrack::corrupt()),
    }
}

/// Encodes a track as fragment text in the latest packed layout.
pub fn encode_fragment(track: &TrackRecord) -> CodecResult<String> {
    encode_legacy(track).map(|bytes| encode_url_safe(&bytes))
}

/// Decodes a legacy URL parameter value: version 0, no marker.
pub fn decode_track_url_data(text: &str) -> CodecResult<DecodedTrack> {
    match decode_url_safe(text) {
        Some(bytes) => decode_legacy(&bytes, LegacyVersion::V0),
        None => Ok(DecodedTrack::corrupt()),
    }
}
