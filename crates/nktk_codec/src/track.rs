//! Track records and decode results.

use serde::{Deserialize, Serialize};

/// Name given to decoded tracks that carry none.
pub const DEFAULT_TRACK_NAME: &str = "Text encoded track";

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Point {
    /// Creates a point from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An ordered polyline.
pub type Segment = Vec<Point>;

/// A labelled marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Display label.
    #[serde(alias = "name")]
    pub label: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Waypoint {
    /// Creates a waypoint.
    pub fn new(label: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            label: label.into(),
            lat,
            lng,
        }
    }

    /// Creates a waypoint at `point`.
    pub fn at(label: impl Into<String>, point: Point) -> Self {
        Self::new(label, point.lat, point.lng)
    }

    /// Position of the waypoint.
    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lng)
    }
}

/// A complete track: the unit of encoding and decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackRecord {
    /// Track name.
    pub name: String,
    /// Polylines, in drawing order.
    pub segments: Vec<Segment>,
    /// Markers.
    pub waypoints: Vec<Waypoint>,
    /// Colour index.
    pub color: i64,
    /// Whether distance ticks are drawn along the track.
    pub measure_ticks_shown: bool,
    /// Whether the track is hidden on the map.
    pub track_hidden: bool,
}

impl TrackRecord {
    /// Creates an empty track with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a segment.
    #[must_use]
    pub fn with_segment(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.segments.push(points.into_iter().collect());
        self
    }

    /// Adds a waypoint.
    #[must_use]
    pub fn with_waypoint(mut self, waypoint: Waypoint) -> Self {
        self.waypoints.push(waypoint);
        self
    }

    /// Sets the colour index.
    #[must_use]
    pub fn with_color(mut self, color: i64) -> Self {
        self.color = color;
        self
    }

    /// Sets whether distance ticks are shown.
    #[must_use]
    pub fn with_measure_ticks(mut self, shown: bool) -> Self {
        self.measure_ticks_shown = shown;
        self
    }

    /// Sets whether the track is hidden.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.track_hidden = hidden;
        self
    }

    /// Segments that can be drawn as a line (two points or more).
    pub fn drawable_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|segment| segment.len() > 1)
    }

    /// Total number of points over all segments.
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// Marker attached to a decode result when the input was damaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackError {
    /// Input bytes were truncated or ill-formed.
    #[serde(rename = "CORRUPT")]
    Corrupt,
}

/// Outcome of decoding one fragment.
///
/// Decoding damaged input still yields a value: whatever could be read,
/// with [`error`](Self::error) set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedTrack {
    /// The recovered track. Missing fields hold their defaults.
    #[serde(flatten)]
    pub track: TrackRecord,
    /// Set when the input was damaged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TrackError>,
}

impl DecodedTrack {
    /// Wraps a decoded record, naming it [`DEFAULT_TRACK_NAME`] if it has no name.
    pub fn new(mut track: TrackRecord, error: Option<TrackError>) -> Self {
        if track.name.is_empty() {
            track.name = DEFAULT_TRACK_NAME.to_owned();
        }
        Self { track, error }
    }

    /// A result with no data, marked corrupt.
    pub fn corrupt() -> Self {
        Self::new(TrackRecord::default(), Some(TrackError::Corrupt))
    }

    /// Returns true if the input was damaged.
    pub fn is_corrupt(&self) -> bool {
        self.error == Some(TrackError::Corrupt)
    }

    /// Discards the error marker and returns the record.
    pub fn into_track(self) -> TrackRecord {
        self.track
    }
}
