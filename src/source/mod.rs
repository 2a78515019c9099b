//! Data sources consumed by the estimators.
//!
//! - [`CubeMapSource`]: six square faces sampled per texel
//! - [`SphereSource`]: a continuous function of `(θ, φ)`
//!
//! Image decoding stays behind these traits; the estimators only ever see
//! texel resolution and color samples.

mod cube_images;

pub use cube_images::ImageCubeSource;

use crate::core::{polar_of, CubeFace, PolarSample, Rgba};
use nalgebra::Vector4;

/// A cube map that can be sampled texel by texel.
pub trait CubeMapSource {
    /// Edge length of every face, in texels.
    fn texel_size(&self) -> u32;

    /// Color at texel `(u, v)` of `face`. Coordinates wrap modulo the texel size.
    fn value(&self, face: CubeFace, u: u32, v: u32) -> Rgba;

    /// Polar angles and center distance of a texel of this map.
    fn polar(&self, face: CubeFace, u: u32, v: u32) -> PolarSample {
        polar_of(face, self.texel_size(), u, v)
    }
}

/// A signal defined on the sphere, returning normalized `(r, g, b, a)`.
pub trait SphereSource {
    /// Color at polar angle `theta` from +Y and azimuth `phi`.
    fn value(&self, theta: f64, phi: f64) -> Vector4<f64>;
}

/// [`SphereSource`] backed by a closure.
pub struct FnSphereSource<F>(pub F);

impl<F> SphereSource for FnSphereSource<F>
where
    F: Fn(f64, f64) -> Vector4<f64>,
{
    fn value(&self, theta: f64, phi: f64) -> Vector4<f64> {
        (self.0)(theta, phi)
    }
}

impl<T: CubeMapSource + ?Sized> CubeMapSource for &T {
    fn texel_size(&self) -> u32 {
        (**self).texel_size()
    }

    fn value(&self, face: CubeFace, u: u32, v: u32) -> Rgba {
        (**self).value(face, u, v)
    }
}
