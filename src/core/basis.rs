//! Real spherical harmonics basis of arbitrary band level.
//!
//! The basis is built in two layers:
//!
//! 1. A [`LegendreTable`] describing how every associated Legendre polynomial
//!    `P_l^m(x)` is obtained from the ones before it:
//!    - `P_0^0 = 1`
//!    - `P_m^m = (-1)^m (2m-1)!! (1-x²)^(m/2)`
//!    - `P_{m+1}^m = x (2m+1) P_m^m`
//!    - `P_l^m = (x (2l-1) P_{l-1}^m - (l+m-1) P_{l-2}^m) / (l-m)` for `l >= m+2`
//!    - `P_l^{-m} = P_l^m` (sign and normalization live in the trig factor)
//! 2. An [`ShBasis`] holding the normalization constant of every `Y_l^m`:
//!    - `Y_l^0 = sqrt((2l+1)/4π) P_l^0(cos θ)`
//!    - `Y_l^m = sqrt((2l+1)/2π (l-m)!/(l+m)!) P_l^m(cos θ) cos(mφ)`
//!    - `Y_l^{-m} = sqrt((2l+1)/2π (l-m)!/(l+m)!) P_l^m(cos θ) sin(mφ)`
//!
//! Functions are addressed by `index = l² + l + m`, so a level-`L` basis has
//! exactly `(L+1)²` entries.

use crate::core::params::{to_index, to_lm};
use std::f64::consts::PI;

/// Highest band level supported by estimation and synthesis.
///
/// Factorials up to `(2L)!` enter the normalization constants, so precision
/// degrades quickly beyond this.
pub const MAX_LEVEL: u32 = 10;

/// Number of basis functions for a maximum band level.
///
/// # Example
/// ```
/// use shcube_rs::core::basis_len;
///
/// assert_eq!(basis_len(0), 1);
/// assert_eq!(basis_len(3), 16);
/// ```
pub fn basis_len(level: u32) -> usize {
    let n = level as usize + 1;
    n * n
}

/// How one associated Legendre polynomial is computed from earlier table entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LegendreTerm {
    /// `P_0^0 = 1`.
    Unit,
    /// `P_m^m = coefficient · (1-x²)^(m/2)` where `coefficient = (-1)^m (2m-1)!!`.
    Diagonal { m: u32, coefficient: f64 },
    /// `P_{m+1}^m = x (2m+1) P_m^m`, with `diagonal` the index of `P_m^m`.
    SuperDiagonal { m: u32, diagonal: usize },
    /// Three-term recurrence over `P_{l-1}^m` (`prev`) and `P_{l-2}^m` (`prev2`).
    Recurrence {
        l: u32,
        m: u32,
        prev: usize,
        prev2: usize,
    },
    /// Negative order: same value as the positive-order entry at `of`.
    Mirror { of: usize },
}

/// Table of associated Legendre polynomial terms for `0 <= l <= level`, `-l <= m <= l`.
#[derive(Clone, Debug)]
pub struct LegendreTable {
    level: u32,
    terms: Vec<LegendreTerm>,
}

impl LegendreTable {
    /// Build the term table for bands `0..=level`.
    pub fn new(level: u32) -> Self {
        let mut terms = vec![LegendreTerm::Unit; basis_len(level)];

        // Diagonal: double factorial accumulates (2m-1)!!
        let mut double_fact = 1.0;
        for m in 1..=level {
            double_fact *= 2.0 * m as f64 - 1.0;
            let sign = if m % 2 == 1 { -1.0 } else { 1.0 };
            terms[to_index(m, m as i32)] = LegendreTerm::Diagonal {
                m,
                coefficient: sign * double_fact,
            };
        }

        for m in 0..level {
            terms[to_index(m + 1, m as i32)] = LegendreTerm::SuperDiagonal {
                m,
                diagonal: to_index(m, m as i32),
            };
        }

        for m in 0..level.saturating_sub(1) {
            for l in (m + 2)..=level {
                terms[to_index(l, m as i32)] = LegendreTerm::Recurrence {
                    l,
                    m,
                    prev: to_index(l - 1, m as i32),
                    prev2: to_index(l - 2, m as i32),
                };
            }
        }

        for l in 1..=level {
            for m in 1..=l as i32 {
                terms[to_index(l, -m)] = LegendreTerm::Mirror {
                    of: to_index(l, m),
                };
            }
        }

        Self { level, terms }
    }

    /// Highest band in the table.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Number of terms, `(level+1)²`.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term(&self, index: usize) -> Option<&LegendreTerm> {
        self.terms.get(index)
    }

    /// Evaluate every `P_l^m(x)` into `out` (length must be at least [`Self::len`]).
    pub fn evaluate_into(&self, x: f64, out: &mut [f64]) {
        let sin_theta = (1.0 - x * x).max(0.0).sqrt();

        // Every non-mirror term only depends on lower indices.
        for (index, term) in self.terms.iter().enumerate() {
            out[index] = match *term {
                LegendreTerm::Unit => 1.0,
                LegendreTerm::Diagonal { m, coefficient } => coefficient * sin_theta.powi(m as i32),
                LegendreTerm::SuperDiagonal { m, diagonal } => {
                    x * (2.0 * m as f64 + 1.0) * out[diagonal]
                }
                LegendreTerm::Recurrence { l, m, prev, prev2 } => {
                    let (l, m) = (l as f64, m as f64);
                    (x * (2.0 * l - 1.0) * out[prev] - (l + m - 1.0) * out[prev2]) / (l - m)
                }
                LegendreTerm::Mirror { .. } => 0.0,
            };
        }

        for (index, term) in self.terms.iter().enumerate() {
            if let LegendreTerm::Mirror { of } = *term {
                out[index] = out[of];
            }
        }
    }

    /// Evaluate every `P_l^m(x)` into a fresh vector.
    pub fn evaluate(&self, x: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.len()];
        self.evaluate_into(x, &mut out);
        out
    }
}

/// One real SH basis function `Y_l^m`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasisFunction {
    pub l: u32,
    pub m: i32,
    /// Constant in front of `P_l^|m|(cos θ) · trig(mφ)`.
    pub normalization: f64,
}

impl BasisFunction {
    pub fn index(&self) -> usize {
        to_index(self.l, self.m)
    }

    /// Angular factor: 1 for `m = 0`, `cos(mφ)` for `m > 0`, `sin(|m|φ)` for `m < 0`.
    fn azimuthal(&self, phi: f64) -> f64 {
        match self.m {
            0 => 1.0,
            m if m > 0 => (m as f64 * phi).cos(),
            m => (-m as f64 * phi).sin(),
        }
    }
}

/// Complete set of `(L+1)²` real SH basis functions for a band level `L`.
///
/// Building the set is cheap; estimators and the synthesizer rebuild it per call.
#[derive(Clone, Debug)]
pub struct ShBasis {
    legendre: LegendreTable,
    functions: Vec<BasisFunction>,
}

impl ShBasis {
    /// Build the basis for bands `0..=level`.
    ///
    /// # Arguments
    /// * `level` - maximum band `L`; callers gate it with `validate_level`
    ///
    /// # Returns
    /// * `(L+1)²` functions in index order
    ///
    /// # Example
    /// ```
    /// use shcube_rs::core::ShBasis;
    ///
    /// let basis = ShBasis::new(1);
    /// assert_eq!(basis.len(), 4);
    ///
    /// // Y_0^0 is the constant 1 / (2 sqrt(π)).
    /// let y = basis.evaluate_all(0.4, 1.3);
    /// assert!((y[0] - 0.282_094_791_773_878_14).abs() < 1e-12);
    /// ```
    pub fn new(level: u32) -> Self {
        let legendre = LegendreTable::new(level);

        let factorials: Vec<f64> = (0..=2 * level as usize)
            .scan(1.0, |acc, i| {
                if i > 0 {
                    *acc *= i as f64;
                }
                Some(*acc)
            })
            .collect();

        let functions = (0..basis_len(level))
            .map(|index| {
                let (l, m) = to_lm(index);
                let two_l1 = 2.0 * l as f64 + 1.0;
                let normalization = if m == 0 {
                    (two_l1 / (4.0 * PI)).sqrt()
                } else {
                    let am = m.unsigned_abs() as usize;
                    let ratio = factorials[l as usize - am] / factorials[l as usize + am];
                    (two_l1 / (2.0 * PI) * ratio).sqrt()
                };
                BasisFunction { l, m, normalization }
            })
            .collect();

        Self { legendre, functions }
    }

    pub fn level(&self) -> u32 {
        self.legendre.level()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn functions(&self) -> &[BasisFunction] {
        &self.functions
    }

    pub fn legendre(&self) -> &LegendreTable {
        &self.legendre
    }

    /// Evaluate all basis functions at `(θ, φ)` into `out`, in index order.
    ///
    /// `out` must hold at least [`Self::len`] values.
    pub fn evaluate_into(&self, theta: f64, phi: f64, out: &mut [f64]) {
        // Legendre values first, then scaled in place: Y[i] only needs P[i].
        self.legendre.evaluate_into(theta.cos(), out);
        for (value, function) in out.iter_mut().zip(&self.functions) {
            *value *= function.normalization * function.azimuthal(phi);
        }
    }

    /// Evaluate all basis functions at `(θ, φ)`.
    pub fn evaluate_all(&self, theta: f64, phi: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.len()];
        self.evaluate_into(theta, phi, &mut out);
        out
    }

    /// Evaluate a single basis function. Returns `None` for an index outside the set.
    pub fn evaluate(&self, index: usize, theta: f64, phi: f64) -> Option<f64> {
        let function = self.functions.get(index)?;
        let legendre = self.legendre.evaluate(theta.cos());
        Some(function.normalization * legendre[index] * function.azimuthal(phi))
    }
}
