//! Degree to grid conversion and running-delta chains.
//!
//! Coordinates live on a fixed grid of `2^24 - 1` steps per 360 degrees.
//! Consecutive points are stored as the difference from their predecessor,
//! which keeps most values inside the one- and two-byte varint tiers.

use std::ops::Add;

use crate::error::{CodecError, CodecResult};
use crate::track::Point;

/// Grid steps per degree.
pub const ARC_UNIT: f64 = ((1u32 << 24) - 1) as f64 / 360.0;

/// Largest absolute error introduced by quantization, in degrees.
pub const MAX_QUANTIZATION_ERROR: f64 = 0.5 / ARC_UNIT;

/// Rounds half-way values up, the same way previously issued links were rounded.
#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Converts degrees to grid steps.
pub fn quantize(degrees: f64) -> i64 {
    round_half_up(degrees * ARC_UNIT)
}

/// Converts grid steps back to degrees.
#[allow(clippy::cast_precision_loss)]
pub fn dequantize(steps: i64) -> f64 {
    steps as f64 / ARC_UNIT
}

/// A point on the quantized grid, `x` east (longitude) and `y` north (latitude).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Longitude steps.
    pub x: i64,
    /// Latitude steps.
    pub y: i64,
}

impl GridPoint {
    /// The grid origin.
    pub const ORIGIN: GridPoint = GridPoint { x: 0, y: 0 };

    /// Creates a grid point from raw steps.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Snaps a point to the grid.
    pub fn from_point(point: Point) -> Self {
        Self::new(quantize(point.lng), quantize(point.lat))
    }

    /// Converts back to degrees.
    pub fn to_point(self) -> Point {
        Point::new(dequantize(self.y), dequantize(self.x))
    }

    /// Step from `origin` to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OutOfRange`] if either axis overflows.
    pub fn offset_from(self, origin: GridPoint) -> CodecResult<GridPoint> {
        let axis = |to: i64, from: i64| {
            to.checked_sub(from)
                .ok_or_else(|| CodecError::out_of_range(to.saturating_sub(from)))
        };
        Ok(GridPoint::new(axis(self.x, origin.x)?, axis(self.y, origin.y)?))
    }
}

impl From<Point> for GridPoint {
    fn from(point: Point) -> Self {
        Self::from_point(point)
    }
}

impl Add for GridPoint {
    type Output = GridPoint;

    fn add(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Running state of a delta chain: the last absolute grid point.
///
/// The same chain type drives both directions. Every chain starts at
/// [`GridPoint::ORIGIN`], so the first delta is the absolute position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaChain {
    last: GridPoint,
}

impl DeltaChain {
    /// Starts a chain at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the step from the previous point to `next` and advances.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OutOfRange`] if the step overflows. The chain
    /// does not advance in that case.
    pub fn push(&mut self, next: GridPoint) -> CodecResult<GridPoint> {
        let delta = next.offset_from(self.last)?;
        self.last = next;
        Ok(delta)
    }

    /// Applies a step and returns the resulting absolute point.
    pub fn step(&mut self, delta: GridPoint) -> GridPoint {
        self.last = self.last + delta;
        self.last
    }

    /// The last absolute point seen.
    pub fn last(&self) -> GridPoint {
        self.last
    }
}

/// Quantizes `points` and returns the delta of each from its predecessor.
///
/// # Errors
///
/// Returns [`CodecError::OutOfRange`] if two consecutive points are too far
/// apart to subtract.
pub fn delta_encode(points: &[Point]) -> CodecResult<Vec<GridPoint>> {
    let mut chain = DeltaChain::new();
    points
        .iter()
        .map(|&point| chain.push(GridPoint::from_point(point)))
        .collect()
}

/// Sums a delta sequence back into points.
pub fn delta_decode<I>(deltas: I) -> Vec<Point>
where
    I: IntoIterator<Item = GridPoint>,
{
    deltas
        .into_iter()
        .scan(DeltaChain::new(), |chain, delta| Some(chain.step(delta).to_point()))
        .collect()
}

/// Rounded centroid of `points` on the grid.
///
/// Returns [`GridPoint::ORIGIN`] for an empty input.
#[allow(clippy::cast_precision_loss)]
pub fn anchor<I>(points: I) -> GridPoint
where
    I: IntoIterator<Item = Point>,
{
    let (count, sum_lng, sum_lat) = points
        .into_iter()
        .fold((0usize, 0.0f64, 0.0f64), |(count, lng, lat), point| {
            (count + 1, lng + point.lng, lat + point.lat)
        });
    if count == 0 {
        return GridPoint::ORIGIN;
    }
    let count = count as f64;
    GridPoint::new(
        round_half_up(sum_lng * ARC_UNIT / count),
        round_half_up(sum_lat * ARC_UNIT / count),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1.08e-5;

    #[test]
    fn unit_value() {
        assert!((ARC_UNIT - 46_603.375).abs() < 1e-9);
        assert!(MAX_QUANTIZATION_ERROR < TOLERANCE);
    }

    #[test]
    fn quantize_known_values() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 46_603);
        assert_eq!(quantize(-1.0), -46_603);
        assert_eq!(quantize(180.0), 8_388_608);
        assert_eq!(quantize(-180.0), -8_388_607);
    }

    #[test]
    fn half_way_rounds_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn dequantize_inverts_within_resolution() {
        for degrees in [0.0, 12.345_678, -77.777_7, 179.999_99, -89.5] {
            let back = dequantize(quantize(degrees));
            assert!((back - degrees).abs() < TOLERANCE);
        }
    }

    #[test]
    fn delta_chain_starts_at_origin() {
        let points = [
            Point::new(55.75, 37.61),
            Point::new(55.76, 37.60),
            Point::new(55.76, 37.60),
        ];
        let deltas = delta_encode(&points).unwrap();
        assert_eq!(deltas[0], GridPoint::from_point(points[0]));
        assert_eq!(deltas[2], GridPoint::ORIGIN);

        let decoded = delta_decode(deltas);
        assert_eq!(decoded.len(), points.len());
        for (a, b) in decoded.iter().zip(points.iter()) {
            assert!((a.lat - b.lat).abs() < TOLERANCE);
            assert!((a.lng - b.lng).abs() < TOLERANCE);
        }
    }

    #[test]
    fn chain_push_and_step_are_inverse() {
        let mut encoder = DeltaChain::new();
        let mut decoder = DeltaChain::new();
        for p in [GridPoint::new(5, -5), GridPoint::new(-100, 40), GridPoint::new(0, 0)] {
            let delta = encoder.push(p).unwrap();
            assert_eq!(decoder.step(delta), p);
        }
        assert_eq!(encoder.last(), decoder.last());
    }

    #[test]
    fn overflowing_step_is_out_of_range() {
        let mut chain = DeltaChain::new();
        chain.push(GridPoint::new(i64::MAX, 0)).unwrap();
        assert_eq!(
            chain.push(GridPoint::new(i64::MIN, 0)),
            Err(CodecError::out_of_range(i64::MIN))
        );
        assert_eq!(chain.last(), GridPoint::new(i64::MAX, 0));

        let far = [Point::new(0.0, 1e14), Point::new(0.0, -1e14)];
        assert!(matches!(delta_encode(&far), Err(CodecError::OutOfRange { .. })));
    }

    #[test]
    fn anchor_is_rounded_mean() {
        let points = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        assert_eq!(anchor(points), GridPoint::new(quantize(3.0), quantize(2.0)));
        assert_eq!(anchor(std::iter::empty()), GridPoint::ORIGIN);
    }
}
