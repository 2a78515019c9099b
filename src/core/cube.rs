//! Cube-map geometry: face texels to directions and polar angles.
//!
//! Each face of a cube with half-extent 1 is split into a `resolution × resolution`
//! grid. Texel `(tu, tv)` is sampled at its center `(tu + 0.5, tv + 0.5)`, mapped
//! onto the face plane and then onto the sphere by normalization.
//!
//! The per-face axis conventions follow the usual cube-map layout:
//!
//! ```text
//! face   x        y        z
//! +X     1        -b       -a
//! -X     -1       -b       a
//! +Y     a        1        b
//! -Y     a        -1       -b
//! +Z     a        -b       1
//! -Z     -a       -b       -1
//! ```
//!
//! where `a` and `b` are the texel center coordinates in `[-1, 1]` along `tu`
//! and `tv` respectively.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One of the six faces of a cube map, in file order `_px, _nx, _py, _ny, _pz, _nz`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    /// All faces in their canonical order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Position of this face in [`CubeFace::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// File name suffix used for this face, e.g. `_px`.
    pub fn suffix(self) -> &'static str {
        match self {
            CubeFace::PosX => "_px",
            CubeFace::NegX => "_nx",
            CubeFace::PosY => "_py",
            CubeFace::NegY => "_ny",
            CubeFace::PosZ => "_pz",
            CubeFace::NegZ => "_nz",
        }
    }

    /// Outward unit axis of this face.
    pub fn axis(self) -> Vector3<f64> {
        match self {
            CubeFace::PosX => Vector3::x(),
            CubeFace::NegX => -Vector3::x(),
            CubeFace::PosY => Vector3::y(),
            CubeFace::NegY => -Vector3::y(),
            CubeFace::PosZ => Vector3::z(),
            CubeFace::NegZ => -Vector3::z(),
        }
    }
}

/// Polar coordinates of a texel center plus its distance from the cube center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarSample {
    /// Angle from the +Y pole, in `[0, π]`.
    pub theta: f64,
    /// Azimuth `atan2(z, x)`, in `[-π, π]`.
    pub phi: f64,
    /// Length of the unnormalized cube-surface point (always >= 1).
    pub distance: f64,
}

impl PolarSample {
    /// Solid-angle weight of the texel relative to a face-center texel: `1 / distance³`.
    pub fn solid_angle_weight(&self) -> f64 {
        1.0 / (self.distance * self.distance * self.distance)
    }
}

/// Point on the cube surface (each coordinate in `[-1, 1]`) for a texel center.
///
/// `tu` and `tv` wrap modulo `resolution`.
pub fn surface_point(face: CubeFace, resolution: u32, tu: u32, tv: u32) -> Vector3<f64> {
    let w = resolution.max(1);
    let half = 0.5 * w as f64;
    let a = ((tu % w) as f64 + 0.5 - half) / half;
    let b = ((tv % w) as f64 + 0.5 - half) / half;

    match face {
        CubeFace::PosX => Vector3::new(1.0, -b, -a),
        CubeFace::NegX => Vector3::new(-1.0, -b, a),
        CubeFace::PosY => Vector3::new(a, 1.0, b),
        CubeFace::NegY => Vector3::new(a, -1.0, -b),
        CubeFace::PosZ => Vector3::new(a, -b, 1.0),
        CubeFace::NegZ => Vector3::new(-a, -b, -1.0),
    }
}

/// Unit direction from the cube center through a texel center.
pub fn direction_of(face: CubeFace, resolution: u32, tu: u32, tv: u32) -> Vector3<f64> {
    surface_point(face, resolution, tu, tv).normalize()
}

/// Polar angles and center distance for a texel.
///
/// θ = acos(y), φ = atan2(z, x) on the normalized direction.
pub fn polar_of(face: CubeFace, resolution: u32, tu: u32, tv: u32) -> PolarSample {
    let point = surface_point(face, resolution, tu, tv);
    let distance = point.norm();
    let dir = point / distance;

    PolarSample {
        theta: dir.y.clamp(-1.0, 1.0).acos(),
        phi: dir.z.atan2(dir.x),
        distance,
    }
}
