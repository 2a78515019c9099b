//! Projection of a continuous spherical signal onto the SH basis.
//!
//! Integrates over a midpoint grid in `(θ, φ)`:
//!
//! ```text
//! c_i ≈ Σ_j Σ_k f(θ_j, φ_k) Y_i(θ_j, φ_k) sin θ_j Δθ Δφ
//! ```

use crate::core::{validate_level, ShBasis, ShResult};
use crate::estimate::Progress;
use crate::source::SphereSource;
use crate::{Result, ShError};
use log::info;
use std::f64::consts::PI;

/// Estimates SH coefficients from a [`SphereSource`].
#[derive(Clone, Copy, Debug)]
pub struct SphereEstimator {
    max_level: u32,
    theta_steps: u32,
    phi_steps: u32,
    with_alpha: bool,
}

impl SphereEstimator {
    pub const DEFAULT_THETA_STEPS: u32 = 128;
    pub const DEFAULT_PHI_STEPS: u32 = 256;

    pub fn new(max_level: u32) -> Result<Self> {
        Ok(Self {
            max_level: validate_level(max_level)?,
            theta_steps: Self::DEFAULT_THETA_STEPS,
            phi_steps: Self::DEFAULT_PHI_STEPS,
            with_alpha: false,
        })
    }

    /// Integration grid resolution. Both counts must be non-zero.
    pub fn with_grid(mut self, theta_steps: u32, phi_steps: u32) -> Result<Self> {
        if theta_steps == 0 || phi_steps == 0 {
            return Err(ShError::InvalidSource(format!(
                "integration grid {}x{} is empty",
                theta_steps, phi_steps
            )));
        }
        self.theta_steps = theta_steps;
        self.phi_steps = phi_steps;
        Ok(self)
    }

    pub fn with_alpha(mut self, with_alpha: bool) -> Self {
        self.with_alpha = with_alpha;
        self
    }

    /// Band level the estimator projects onto.
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn estimate<S, P>(&self, sphere: &S, progress: &mut P) -> Result<ShResult>
    where
        S: SphereSource + ?Sized,
        P: Progress + ?Sized,
    {
        let basis = ShBasis::new(self.max_level);
        let channels = if self.with_alpha { 4 } else { 3 };
        let d_theta = PI / self.theta_steps as f64;
        let d_phi = 2.0 * PI / self.phi_steps as f64;
        let total = self.theta_steps as u64 * self.phi_steps as u64;
        info!(
            "estimating SH level {} ({} functions) on a {}x{} sphere grid",
            self.max_level,
            basis.len(),
            self.theta_steps,
            self.phi_steps
        );

        let mut sums = vec![vec![0.0f64; basis.len()]; channels];
        let mut y = vec![0.0f64; basis.len()];
        let mut done = 0u64;

        for j in 0..self.theta_steps {
            let theta = (j as f64 + 0.5) * d_theta;
            let area = theta.sin() * d_theta * d_phi;
            for k in 0..self.phi_steps {
                if progress.is_cancelled() {
                    return Err(ShError::Cancelled { done, total });
                }

                let phi = -PI + (k as f64 + 0.5) * d_phi;
                let color = sphere.value(theta, phi);
                basis.evaluate_into(theta, phi, &mut y);

                for (c, sum) in sums.iter_mut().enumerate() {
                    let value = color[c] * area;
                    for (acc, yi) in sum.iter_mut().zip(&y) {
                        *acc += value * yi;
                    }
                }

                progress.report(done, total);
                done += 1;
            }
        }

        info!("estimation complete");
        Ok(ShResult::from_coefficients(self.max_level, sums))
    }
}
