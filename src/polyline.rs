//! Encoded polyline codec for route geometries.
//!
//! Directions services ship route shapes in the Encoded Polyline
//! Algorithm Format: each coordinate is stored as a delta from the previous
//! point, zig-zag encoded, split into 5-bit chunks and biased by 63 into
//! printable ASCII. Precision is fixed at 1e-5 degrees.
//!
//! Decoding happens once at the boundary; everything downstream works on
//! [`GeoPoint`] sequences.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;

/// Coordinates are stored as integers scaled by this factor.
const PRECISION: f64 = 1e5;

/// Every encoded byte is offset by this value.
const ASCII_BIAS: u8 = 63;

/// Set on every chunk except the last one of a value.
const CONTINUATION_BIT: i64 = 0x20;

const CHUNK_MASK: i64 = 0x1f;

/// A 32-bit zig-zag value needs at most seven 5-bit chunks.
const MAX_SHIFT: u32 = 35;

/// Largest zig-zag encoded value whose delta fits an `i32`.
const MAX_ZIGZAG: i64 = u32::MAX as i64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolylineError {
    #[error("Byte {byte:#04x} at index {index} is not a valid polyline character")]
    InvalidByte { index: usize, byte: u8 },
    #[error("Polyline ends in the middle of a coordinate at index {index}")]
    Truncated { index: usize },
    #[error("Coordinate value starting at index {index} does not fit 32 bits")]
    Overflow { index: usize },
    #[error("Decoded coordinate ({lat}, {lng}) is outside the valid range")]
    OutOfRange { lat: f64, lng: f64 },
}

/// Decodes an encoded polyline into its points, in path order.
///
/// The empty string decodes to an empty path.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += read_value(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(PolylineError::Truncated { index });
        }
        lng += read_value(bytes, &mut index)?;

        let (lat_deg, lng_deg) = (lat as f64 / PRECISION, lng as f64 / PRECISION);
        let point = GeoPoint::new(lat_deg, lng_deg).map_err(|_| PolylineError::OutOfRange {
            lat: lat_deg,
            lng: lng_deg,
        })?;
        points.push(point);
    }

    Ok(points)
}

/// Reads one zig-zag encoded delta starting at `index`, advancing it past
/// the terminating chunk.
fn read_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated { index: *index });
        };
        if !(ASCII_BIAS..=ASCII_BIAS + 63).contains(&byte) {
            return Err(PolylineError::InvalidByte {
                index: *index,
                byte,
            });
        }
        if shift >= MAX_SHIFT {
            return Err(PolylineError::Overflow { index: start });
        }

        let chunk = i64::from(byte - ASCII_BIAS);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *index += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    if result > MAX_ZIGZAG {
        return Err(PolylineError::Overflow { index: start });
    }

    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

/// Encodes points into the polyline format, rounding to 1e-5 degrees.
pub fn encode(points: &[GeoPoint]) -> String {
    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = scale(point.lat);
        let lng = scale(point.lng);
        write_value(lat - prev_lat, &mut encoded);
        write_value(lng - prev_lng, &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn scale(coordinate: f64) -> i64 {
    (coordinate * PRECISION).round() as i64
}

fn write_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };

    while value >= CONTINUATION_BIT {
        out.push(((CONTINUATION_BIT | (value & CHUNK_MASK)) as u8 + ASCII_BIAS) as char);
        value >>= 5;
    }
    out.push((value as u8 + ASCII_BIAS) as char);
}

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        decode(encoded).map(Self::new)
    }

    pub fn encode(&self) -> String {
        encode(&self.points)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at index `len / 2`, or `None` for an empty path.
    pub fn midpoint(&self) -> Option<GeoPoint> {
        self.points.get(self.points.len() / 2).copied()
    }
}
