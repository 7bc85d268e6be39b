//! Encoded polyline decoder.
//!
//! Decodes the compact ASCII polyline format used by directions APIs:
//! signed zig-zag deltas in 5-bit groups, each byte offset by 63 with
//! bit 0x20 as a continuation flag, accumulated at 1e-5 degree
//! precision.
//!
//! Truncated or malformed input returns a typed error; the decoder
//! never indexes past the end of the input.

use crate::domain::Coordinate;

/// Scale factor of the encoding: five decimal places.
const PRECISION: f64 = 1e5;

/// Maximum shift before a varint no longer fits the accumulator.
/// Coordinates at 1e-5 precision fit comfortably in 32 bits.
const MAX_SHIFT: u32 = 30;

/// Errors from polyline decoding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolylineError {
    /// Input ended while a value's continuation bit was still set,
    /// or a latitude was present without its longitude.
    #[error("truncated polyline at byte {offset}")]
    Truncated { offset: usize },

    /// Byte outside the valid encoding range (63..=126).
    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },

    /// A single value ran over the accumulator width; the input is not
    /// a well-formed polyline.
    #[error("polyline value overflow at byte {offset}")]
    Overflow { offset: usize },

    /// Accumulated coordinate left the valid lat/lon range.
    #[error("decoded coordinate out of range at byte {offset}: {lat},{lon}")]
    OutOfRange { offset: usize, lat: f64, lon: f64 },
}

/// Decode an encoded polyline into a coordinate sequence.
///
/// An empty string decodes to an empty sequence.
///
/// # Examples
///
/// ```
/// use trip_server::polyline;
///
/// let points = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert!((points[0].lat() - 38.5).abs() < 1e-9);
/// assert!((points[0].lon() - -120.2).abs() < 1e-9);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        let value_start = index;
        lat += decode_value(bytes, &mut index)?;

        if index >= bytes.len() {
            // A latitude delta without its longitude pair.
            return Err(PolylineError::Truncated { offset: index });
        }
        lon += decode_value(bytes, &mut index)?;

        let point = (lat as f64 / PRECISION, lon as f64 / PRECISION);
        let coordinate =
            Coordinate::new(point.0, point.1).map_err(|_| PolylineError::OutOfRange {
                offset: value_start,
                lat: point.0,
                lon: point.1,
            })?;
        points.push(coordinate);
    }

    Ok(points)
}

/// Decode one signed zig-zag varint, advancing `index` past it.
fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut shift: u32 = 0;
    let mut result: i64 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated { offset: *index });
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte {
                byte,
                offset: *index,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { offset: *index });
        }

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    // Undo the zig-zag: low bit is the sign.
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}
