//! Color samples and 8-bit conversion.
//!
//! All integration and reconstruction happens on normalized `0.0..=1.0`
//! values. Only convert to/from bytes at the image boundary.
//!
//! No color-space transfer is applied: a byte `b` maps to `b / 255` and back.

use nalgebra::Vector4;

/// An 8-bit RGBA sample as stored in a cube-map face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Normalized channels `(r, g, b, a)` in `0.0..=1.0`.
    pub fn to_unit(self) -> Vector4<f64> {
        Vector4::new(
            u8_to_unit(self.r),
            u8_to_unit(self.g),
            u8_to_unit(self.b),
            u8_to_unit(self.a),
        )
    }

    /// Quantize normalized channels back to bytes.
    pub fn from_unit(v: &Vector4<f64>) -> Self {
        Self {
            r: unit_to_u8(v.x),
            g: unit_to_u8(v.y),
            b: unit_to_u8(v.z),
            a: unit_to_u8(v.w),
        }
    }
}

/// Convert a byte to a normalized value.
///
/// # Arguments
/// * `u` - channel byte (0-255)
///
/// # Returns
/// * `u / 255` (0.0-1.0)
///
/// # Example
/// ```
/// use shcube_rs::core::color::u8_to_unit;
///
/// assert_eq!(u8_to_unit(255), 1.0);
/// assert!((u8_to_unit(51) - 0.2).abs() < 1e-12);
/// ```
pub fn u8_to_unit(u: u8) -> f64 {
    u as f64 / 255.0
}

/// Clamp to `[0, 1]` and quantize to a byte (round to nearest).
///
/// # Arguments
/// * `x` - normalized value, any range
///
/// # Returns
/// * Channel byte (0-255); NaN maps to 0
///
/// # Example
/// ```
/// use shcube_rs::core::color::unit_to_u8;
///
/// assert_eq!(unit_to_u8(0.6), 153);
/// assert_eq!(unit_to_u8(1.4), 255);
/// assert_eq!(unit_to_u8(-0.2), 0);
/// ```
pub fn unit_to_u8(x: f64) -> u8 {
    if x.is_nan() {
        return 0;
    }
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}
