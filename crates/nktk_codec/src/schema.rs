//! Protobuf track layout, version 4. Decode only.
//!
//! Unlike the packed layouts there is no partial recovery: a message that
//! fails to parse, or lacks its track or view part, decodes to a bare
//! corrupt result.

use prost::Message;
use tracing::debug;

use crate::quantize::{delta_decode, dequantize, GridPoint};
use crate::track::{DecodedTrack, TrackRecord, Waypoint};

#[derive(Clone, PartialEq, Message)]
struct TrackView {
    #[prost(message, optional, tag = "1")]
    track: Option<TrackMessage>,
    #[prost(message, optional, tag = "2")]
    view: Option<ViewMessage>,
}

#[derive(Clone, PartialEq, Message)]
struct TrackMessage {
    #[prost(string, tag = "1")]
    name: String,
    #[prost(message, repeated, tag = "2")]
    segments: Vec<SegmentMessage>,
    #[prost(message, optional, tag = "3")]
    waypoints: Option<WaypointsMessage>,
}

/// Delta-coded coordinates; `lats[i]` and `lons[i]` form one step.
#[derive(Clone, PartialEq, Message)]
struct SegmentMessage {
    #[prost(sint32, repeated, tag = "1")]
    lats: Vec<i32>,
    #[prost(sint32, repeated, tag = "2")]
    lons: Vec<i32>,
}

#[derive(Clone, PartialEq, Message)]
struct WaypointsMessage {
    #[prost(sint32, tag = "1")]
    mid_lat: i32,
    #[prost(sint32, tag = "2")]
    mid_lon: i32,
    #[prost(message, repeated, tag = "3")]
    waypoints: Vec<WaypointMessage>,
}

/// Coordinates are offsets from the enclosing anchor.
#[derive(Clone, PartialEq, Message)]
struct WaypointMessage {
    #[prost(string, tag = "1")]
    name: String,
    #[prost(sint32, tag = "2")]
    lat: i32,
    #[prost(sint32, tag = "3")]
    lon: i32,
}

#[derive(Clone, PartialEq, Message)]
struct ViewMessage {
    #[prost(uint32, tag = "1")]
    color: u32,
    #[prost(bool, tag = "2")]
    shown: bool,
    #[prost(bool, tag = "3")]
    ticks_shown: bool,
}

/// Decodes a version 4 track body.
pub fn decode_schema(data: &[u8]) -> DecodedTrack {
    let parsed = TrackView::decode(data)
        .map_err(|err| err.to_string())
        .and_then(|view| track_from_view(view).map_err(str::to_owned));
    match parsed {
        Ok(track) => DecodedTrack::new(track, None),
        Err(reason) => {
            debug!(%reason, "protobuf track rejected");
            DecodedTrack::corrupt()
        }
    }
}

fn track_from_view(message: TrackView) -> Result<TrackRecord, &'static str> {
    let track = message.track.ok_or("missing track")?;
    let view = message.view.ok_or("missing view")?;

    let segments = track
        .segments
        .into_iter()
        .map(|segment| {
            if segment.lats.len() != segment.lons.len() {
                return Err("segment lats and lons differ in length");
            }
            let steps = segment
                .lons
                .iter()
                .zip(&segment.lats)
                .map(|(&lon, &lat)| GridPoint::new(i64::from(lon), i64::from(lat)));
            Ok(delta_decode(steps))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let waypoints = track
        .waypoints
        .map(|group| {
            let mid = GridPoint::new(i64::from(group.mid_lon), i64::from(group.mid_lat));
            group
                .waypoints
                .into_iter()
                .map(|w| {
                    let at = mid + GridPoint::new(i64::from(w.lon), i64::from(w.lat));
                    Waypoint::new(w.name, dequantize(at.y), dequantize(at.x))
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(TrackRecord {
        name: track.name,
        segments,
        waypoints,
        color: i64::from(view.color),
        measure_ticks_shown: view.ticks_shown,
        track_hidden: !view.shown,
    })
}
