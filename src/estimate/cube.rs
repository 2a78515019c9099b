//! Projection of a cube map onto the SH basis.
//!
//! The coefficient of basis function `Y_i` for channel `c` is the spherical integral
//! `∫ f_c(ω) Y_i(ω) dω`. Over the cube this becomes a Riemann sum over texels:
//!
//! ```text
//! c_i ≈ (4 / N²) Σ_faces Σ_texels f_c(t) Y_i(θ_t, φ_t) / d_t³
//! ```
//!
//! where `N` is the face resolution, `4 / N²` the area of one texel on a face of
//! half-extent 1, and `1 / d_t³` the solid-angle Jacobian at a texel whose
//! center lies at distance `d_t` from the cube center.

use crate::core::{validate_level, CubeFace, ShBasis, ShResult};
use crate::estimate::Progress;
use crate::source::CubeMapSource;
use crate::{Result, ShError};
use log::{debug, info};

/// Estimates SH coefficients from a [`CubeMapSource`].
#[derive(Clone, Copy, Debug)]
pub struct CubeEstimator {
    max_level: u32,
    with_alpha: bool,
}

impl CubeEstimator {
    /// Fails if `max_level` exceeds [`crate::core::MAX_LEVEL`].
    pub fn new(max_level: u32) -> Result<Self> {
        Ok(Self {
            max_level: validate_level(max_level)?,
            with_alpha: false,
        })
    }

    /// Also project the alpha channel as a fourth coefficient list.
    pub fn with_alpha(mut self, with_alpha: bool) -> Self {
        self.with_alpha = with_alpha;
        self
    }

    /// Band level the estimator projects onto.
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Integrate every channel of `cube` against the basis.
    ///
    /// `progress` is invoked once per texel with `(texels_done, total_texels)`.
    ///
    /// # Example
    /// ```
    /// use shcube_rs::core::{ColorChannel, ImageBlock, Rgba};
    /// use shcube_rs::estimate::NoProgress;
    /// use shcube_rs::{CubeEstimator, ImageCubeSource};
    ///
    /// let gray = ImageBlock::filled(16, 16, 3, Rgba::rgb(128, 128, 128));
    /// let cube = ImageCubeSource::from_blocks(vec![gray; 6]).unwrap();
    /// let result = CubeEstimator::new(0).unwrap().estimate(&cube, &mut NoProgress).unwrap();
    ///
    /// // DC coefficient times Y_0^0 recovers the mean color.
    /// let dc = result.param(ColorChannel::R, 0, 0).value() * 0.282_094_791_773_878_14;
    /// assert!((dc - 128.0 / 255.0).abs() < 1e-2);
    /// ```
    pub fn estimate<C, P>(&self, cube: &C, progress: &mut P) -> Result<ShResult>
    where
        C: CubeMapSource + ?Sized,
        P: Progress + ?Sized,
    {
        let width = cube.texel_size();
        if width == 0 {
            return Err(ShError::InvalidSource("cube map has no texels".into()));
        }

        let basis = ShBasis::new(self.max_level);
        let channels = if self.with_alpha { 4 } else { 3 };
        let total = width as u64 * width as u64 * CubeFace::ALL.len() as u64;
        info!(
            "estimating SH level {} ({} functions) from {} texels ({}x{} per face)",
            self.max_level,
            basis.len(),
            total,
            width,
            width
        );

        let mut sums = vec![vec![0.0f64; basis.len()]; channels];
        let mut y = vec![0.0f64; basis.len()];
        let mut done = 0u64;

        for face in CubeFace::ALL {
            debug!("projecting face {:?}", face);
            for v in 0..width {
                for u in 0..width {
                    if progress.is_cancelled() {
                        return Err(ShError::Cancelled { done, total });
                    }

                    let color = cube.value(face, u, v).to_unit();
                    let sample = cube.polar(face, u, v);
                    let weight = sample.solid_angle_weight();
                    basis.evaluate_into(sample.theta, sample.phi, &mut y);

                    for (c, sum) in sums.iter_mut().enumerate() {
                        let value = color[c] * weight;
                        for (acc, yi) in sum.iter_mut().zip(&y) {
                            *acc += value * yi;
                        }
                    }

                    progress.report(done, total);
                    done += 1;
                }
            }
        }

        let scale = 4.0 / (width as f64 * width as f64);
        for sum in &mut sums {
            for acc in sum.iter_mut() {
                *acc *= scale;
            }
        }

        info!("estimation complete");
        Ok(ShResult::from_coefficients(self.max_level, sums))
    }
}
