//! Packed track layouts, versions 0 to 3.
//!
//! Every field is a packed number or length-prefixed UTF-8 text, in this
//! order:
//!
//! 1. name
//! 2. segment count, then per segment a point count and `(dlng, dlat)` steps
//! 3. colour
//! 4. measure ticks flag
//! 5. hidden flag (version 3)
//! 6. waypoint count, then if non-zero the anchor `(lng, lat)` and per
//!    waypoint: label, symbol (always 1), `(dlng, dlat)` from the anchor
//!    (version 2 and later)
//!
//! The version itself is not part of the layout. Damage is contained per
//! field group: everything read before the damaged group is kept and the
//! result is marked [`TrackError::Corrupt`].

use tracing::debug;

use crate::error::CodecResult;
use crate::quantize::{anchor, delta_encode, DeltaChain, GridPoint};
use crate::reader::PackedReader;
use crate::track::{DecodedTrack, TrackError, TrackRecord, Waypoint};
use crate::writer::PackedWriter;

/// Value written in the reserved waypoint symbol field.
pub const WAYPOINT_SYMBOL: i64 = 1;

/// Revision of the packed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LegacyVersion {
    /// Original layout, carried without a version marker.
    V0,
    /// Adds the version marker.
    V1,
    /// Adds waypoints.
    V2,
    /// Adds the hidden flag.
    V3,
}

impl LegacyVersion {
    /// Layout produced by [`encode_legacy`].
    pub const LATEST: LegacyVersion = LegacyVersion::V3;

    /// Maps a version marker to a packed layout. Version 0 has no marker.
    pub fn from_marker(marker: i64) -> Option<Self> {
        match marker {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            3 => Some(Self::V3),
            _ => None,
        }
    }

    /// The version number.
    pub const fn number(self) -> u8 {
        match self {
            Self::V0 => 0,
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
        }
    }

    /// Version 0 links may end right after the segments.
    fn requires_display_flags(self) -> bool {
        self > Self::V0
    }

    fn has_hidden_flag(self) -> bool {
        self >= Self::V3
    }

    fn has_waypoints(self) -> bool {
        self >= Self::V2
    }
}

/// Field groups that fail independently.
#[derive(Debug, Clone, Copy)]
enum FieldGroup {
    Segments,
    DisplayFlags,
    HiddenFlag,
    Waypoints,
}

/// Packs `track` in the latest layout, version marker first.
///
/// Segments with fewer than two points are left out.
///
/// # Errors
///
/// Returns [`CodecError::OutOfRange`](crate::CodecError::OutOfRange) if a
/// coordinate, count or text length does not fit a packed number.
pub fn encode_legacy(track: &TrackRecord) -> CodecResult<Vec<u8>> {
    let mut writer = PackedWriter::with_capacity(64 + track.point_count() * 4);
    writer.write_number(i64::from(LegacyVersion::LATEST.number()))?;
    writer.write_text(&track.name)?;

    let segments: Vec<_> = track.drawable_segments().collect();
    writer.write_count(segments.len())?;
    for segment in segments {
        writer.write_count(segment.len())?;
        for delta in delta_encode(segment)? {
            writer.write_grid_point(delta)?;
        }
    }

    writer.write_number(track.color)?;
    writer.write_flag(track.measure_ticks_shown)?;
    writer.write_flag(track.track_hidden)?;

    writer.write_count(track.waypoints.len())?;
    if !track.waypoints.is_empty() {
        let mid = anchor(track.waypoints.iter().map(Waypoint::point));
        writer.write_grid_point(mid)?;
        for waypoint in &track.waypoints {
            writer.write_text(&waypoint.label)?;
            writer.write_number(WAYPOINT_SYMBOL)?;
            let offset = GridPoint::from_point(waypoint.point()).offset_from(mid)?;
            writer.write_grid_point(offset)?;
        }
    }

    Ok(writer.into_bytes())
}

/// Unpacks a track body laid out as `version`.
///
/// Damaged input never fails: the result carries what was read and is
/// marked corrupt.
///
/// # Errors
///
/// Only errors that do not describe damaged input are returned.
pub fn decode_legacy(data: &[u8], version: LegacyVersion) -> CodecResult<DecodedTrack> {
    let mut track = TrackRecord::default();
    let intact = decode_into(&mut PackedReader::new(data), version, &mut track)?;
    Ok(DecodedTrack::new(track, (!intact).then_some(TrackError::Corrupt)))
}

/// Returns `Ok(false)` as soon as a field group turns out damaged.
fn decode_into(
    reader: &mut PackedReader<'_>,
    version: LegacyVersion,
    track: &mut TrackRecord,
) -> CodecResult<bool> {
    if recover(read_segments(reader, track), FieldGroup::Segments, version)?.is_none() {
        return Ok(false);
    }

    let flags = recover(read_display_flags(reader), FieldGroup::DisplayFlags, version)?;
    let Some((color, ticks)) = flags else {
        return Ok(!version.requires_display_flags());
    };
    track.color = color;
    track.measure_ticks_shown = ticks;

    if version.has_hidden_flag() {
        match recover(reader.read_flag(), FieldGroup::HiddenFlag, version)? {
            Some(hidden) => track.track_hidden = hidden,
            None => return Ok(false),
        }
    }

    if version.has_waypoints() {
        let waypoints = read_waypoints(reader, &mut track.waypoints);
        return Ok(recover(waypoints, FieldGroup::Waypoints, version)?.is_some());
    }

    Ok(true)
}

/// Turns a damaged-input error into `None`, passing anything else through.
fn recover<T>(
    outcome: CodecResult<T>,
    group: FieldGroup,
    version: LegacyVersion,
) -> CodecResult<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_corruption() => {
            debug!(?group, version = version.number(), %err, "packed track damaged");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn read_segments(reader: &mut PackedReader<'_>, track: &mut TrackRecord) -> CodecResult<()> {
    track.name = reader.read_text()?;
    let segment_count = reader.read_count()?;
    for _ in 0..segment_count {
        let point_count = reader.read_count()?;
        let mut chain = DeltaChain::new();
        let mut segment = Vec::new();
        for _ in 0..point_count {
            match reader.read_grid_point() {
                Ok(delta) => segment.push(chain.step(delta).to_point()),
                Err(err) => {
                    if !segment.is_empty() {
                        track.segments.push(segment);
                    }
                    return Err(err);
                }
            }
        }
        track.segments.push(segment);
    }
    Ok(())
}

fn read_display_flags(reader: &mut PackedReader<'_>) -> CodecResult<(i64, bool)> {
    let color = reader.read_number()?;
    let ticks = reader.read_flag()?;
    Ok((color, ticks))
}

fn read_waypoints(reader: &mut PackedReader<'_>, waypoints: &mut Vec<Waypoint>) -> CodecResult<()> {
    let count = reader.read_count()?;
    if count == 0 {
        return Ok(());
    }
    let mid = reader.read_grid_point()?;
    for _ in 0..count {
        let label = reader.read_text()?;
        let _symbol = reader.read_number()?;
        let offset = reader.read_grid_point()?;
        waypoints.push(Waypoint::at(label, (mid + offset).to_point()));
    }
    Ok(())
}
