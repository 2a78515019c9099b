//! Estimation: projecting sampled radiance onto the SH basis.
//!
//! - `CubeEstimator`: six cube faces, solid-angle weighted Riemann sum
//! - `SphereEstimator`: continuous `(θ, φ)` signal, midpoint quadrature
//!
//! Both run synchronously on the calling thread and report through [`Progress`].

mod cube;
mod progress;
mod sphere;

pub use cube::CubeEstimator;
pub use progress::{Cancellable, LogProgress, NoProgress, Progress};
pub use sphere::SphereEstimator;
