//! Cube-map synthesis from estimated SH coefficients.
//!
//! For every output texel the direction `(θ, φ)` is evaluated against the basis
//! and the color is `Σ_i c_i Y_i(θ, φ)` per channel, clamped to `[0, 1]` and
//! quantized to 8 bits. The texel's distance from the cube center is ignored:
//! this reconstructs radiance along a direction, not a solid-angle weighted value.

use crate::core::{
    polar_of, validate_level, ColorChannel, CubeFace, ImageBlock, Rgba, ShBasis, ShResult,
};
use crate::estimate::Progress;
use crate::render::layout::{compose_horizontal_cross, CubeMapLayout};
use crate::{Result, ShError};
use log::{debug, info};
use nalgebra::Vector4;

/// Evaluates the SH series stored in a result at arbitrary directions.
#[derive(Clone, Debug)]
pub struct Reconstructor {
    basis: ShBasis,
    coefficients: Vec<Vec<f64>>,
    has_alpha: bool,
    scratch: Vec<f64>,
}

impl Reconstructor {
    /// Fails if the result's level is out of range or it lacks R, G or B.
    pub fn new(result: &ShResult) -> Result<Self> {
        let level = validate_level(result.max_level())?;
        if result.channel_count() < ColorChannel::RGB.len() {
            return Err(ShError::InvalidSource(format!(
                "result has {} color channels, expected at least 3",
                result.channel_count()
            )));
        }

        let basis = ShBasis::new(level);
        let channels: &[ColorChannel] = if result.has_alpha() {
            &ColorChannel::RGBA
        } else {
            &ColorChannel::RGB
        };

        // Missing trailing coefficients read as zero.
        let coefficients = channels
            .iter()
            .map(|&channel| {
                let mut values = result.values(channel);
                values.resize(basis.len(), 0.0);
                values
            })
            .collect();

        Ok(Self {
            scratch: vec![0.0; basis.len()],
            basis,
            coefficients,
            has_alpha: result.has_alpha(),
        })
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Unclamped `(r, g, b, a)` at `(θ, φ)`. Alpha is 1 when not modeled.
    pub fn radiance(&mut self, theta: f64, phi: f64) -> Vector4<f64> {
        self.basis.evaluate_into(theta, phi, &mut self.scratch);
        let mut out = Vector4::new(0.0, 0.0, 0.0, 1.0);
        for (c, coefs) in self.coefficients.iter().enumerate() {
            out[c] = coefs.iter().zip(&self.scratch).map(|(a, y)| a * y).sum();
        }
        out
    }

    /// Render one face at `size × size` texels.
    fn render_face<P>(
        &mut self,
        face: CubeFace,
        size: u32,
        progress: &mut P,
        done: &mut u64,
        total: u64,
    ) -> Result<ImageBlock>
    where
        P: Progress + ?Sized,
    {
        let bpp = if self.has_alpha { 4 } else { 3 };
        let mut block = ImageBlock::new(size, size, bpp);
        for tv in 0..size {
            for tu in 0..size {
                if progress.is_cancelled() {
                    return Err(ShError::Cancelled { done: *done, total });
                }
                let sample = polar_of(face, size, tu, tv);
                let color = self.radiance(sample.theta, sample.phi);
                block.set_pixel(tu, tv, Rgba::from_unit(&color));

                progress.report(*done, total);
                *done += 1;
            }
        }
        Ok(block)
    }
}

/// Re-synthesize a cube map from coefficients.
///
/// Returns six face images for [`CubeMapLayout::Separable`] or one 4×3 atlas for
/// [`CubeMapLayout::HorizontalCross`]. Faces are RGB, or RGBA when the result
/// carries alpha coefficients.
pub fn synthesize<P>(
    result: &ShResult,
    face_size: u32,
    layout: CubeMapLayout,
    progress: &mut P,
) -> Result<Vec<ImageBlock>>
where
    P: Progress + ?Sized,
{
    let layout = layout.ensure_supported()?;
    if face_size == 0 {
        return Err(ShError::InvalidSource("face size must be non-zero".into()));
    }
    let mut reconstructor = Reconstructor::new(result)?;

    let total = face_size as u64 * face_size as u64 * CubeFace::ALL.len() as u64;
    info!(
        "synthesizing {}x{} faces from SH level {} ({})",
        face_size,
        face_size,
        result.max_level(),
        layout
    );

    let mut done = 0u64;
    let mut faces = Vec::with_capacity(CubeFace::ALL.len());
    for face in CubeFace::ALL {
        debug!("synthesizing face {:?}", face);
        faces.push(reconstructor.render_face(face, face_size, progress, &mut done, total)?);
    }

    match layout {
        CubeMapLayout::Separable => Ok(faces),
        CubeMapLayout::HorizontalCross => Ok(vec![compose_horizontal_cross(&faces)?]),
        CubeMapLayout::VerticalCross => Err(ShError::UnsupportedLayout(layout.name())),
    }
}
