//! Estimated SH coefficients and their `(l, m)` bookkeeping.
//!
//! Coefficients of each color channel are stored in index order
//! `(0,0), (1,-1), (1,0), (1,1), (2,-2), ...` where `index = l² + l + m`.

use serde::{Deserialize, Serialize};

/// Flatten `(l, m)` into a basis index: `l² + l + m`.
///
/// Defined for `|m| <= l`. Computed in `u64`, so any `u32` band is accepted
/// without overflow.
///
/// # Example
///
/// ```
/// use shcube_rs::core::{to_index, to_lm};
///
/// assert_eq!(to_index(2, -1), 5);
/// assert_eq!(to_lm(5), (2, -1));
/// ```
pub fn to_index(l: u32, m: i32) -> usize {
    let l = u64::from(l);
    (l * l + l).saturating_add_signed(i64::from(m)) as usize
}

/// Inverse of [`to_index`]: `l = floor(sqrt(index))`, `m = index - l² - l`.
pub fn to_lm(index: usize) -> (u32, i32) {
    let mut l = (index as f64).sqrt() as usize;
    // Guard against sqrt rounding for large indices.
    while l * l > index {
        l -= 1;
    }
    while (l + 1) * (l + 1) <= index {
        l += 1;
    }
    let m = index as i64 - (l * l + l) as i64;
    (l as u32, m as i32)
}

/// A single estimated coefficient for basis function `Y_l^m`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    l: u32,
    m: i32,
    value: f64,
}

impl Parameter {
    const INVALID_LEVEL: u32 = u32::MAX;

    pub fn new(l: u32, m: i32, value: f64) -> Self {
        Self { l, m, value }
    }

    /// Sentinel returned for out-of-range lookups.
    pub fn invalid() -> Self {
        Self {
            l: Self::INVALID_LEVEL,
            m: 0,
            value: 0.0,
        }
    }

    /// Build the parameter stored at a basis index.
    pub fn from_index(index: usize, value: f64) -> Self {
        let (l, m) = to_lm(index);
        Self { l, m, value }
    }

    pub fn l(&self) -> u32 {
        self.l
    }

    pub fn m(&self) -> i32 {
        self.m
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_valid(&self) -> bool {
        self.l != Self::INVALID_LEVEL
    }

    pub fn index(&self) -> Option<usize> {
        self.is_valid().then(|| to_index(self.l, self.m))
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Color channel of a coefficient list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorChannel {
    R,
    G,
    B,
    A,
}

impl ColorChannel {
    pub const RGB: [ColorChannel; 3] = [ColorChannel::R, ColorChannel::G, ColorChannel::B];
    pub const RGBA: [ColorChannel; 4] = [
        ColorChannel::R,
        ColorChannel::G,
        ColorChannel::B,
        ColorChannel::A,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> char {
        match self {
            ColorChannel::R => 'R',
            ColorChannel::G => 'G',
            ColorChannel::B => 'B',
            ColorChannel::A => 'A',
        }
    }

    pub fn from_label(label: char) -> Option<Self> {
        match label.to_ascii_uppercase() {
            'R' => Some(ColorChannel::R),
            'G' => Some(ColorChannel::G),
            'B' => Some(ColorChannel::B),
            'A' => Some(ColorChannel::A),
            _ => None,
        }
    }
}

/// State of an estimation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateState {
    Ok,
    #[default]
    NotEstimated,
    InvalidData,
    InvalidParam,
}

/// Immutable snapshot of an estimation: per-channel coefficient lists in index order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShResult {
    max_level: u32,
    channels: Vec<Vec<Parameter>>,
    state: EstimateState,
}

impl ShResult {
    /// Package raw per-channel coefficients (index order) into a result.
    ///
    /// Channels are R, G, B and optionally A.
    pub fn from_coefficients(max_level: u32, coefficients: Vec<Vec<f64>>) -> Self {
        let channels = coefficients
            .into_iter()
            .map(|values| {
                values
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| Parameter::from_index(i, v))
                    .collect()
            })
            .collect();

        Self {
            max_level,
            channels,
            state: EstimateState::Ok,
        }
    }

    pub fn state(&self) -> EstimateState {
        self.state
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Number of stored color channels (3 or 4).
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn has_alpha(&self) -> bool {
        self.channels.len() > ColorChannel::A.index()
    }

    /// Coefficient list for a channel; empty if the channel is not stored.
    pub fn params(&self, channel: ColorChannel) -> &[Parameter] {
        self.channels
            .get(channel.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Coefficient for `(l, m)`; [`Parameter::invalid`] when out of range.
    pub fn param(&self, channel: ColorChannel, l: u32, m: i32) -> Parameter {
        if l > self.max_level || m.unsigned_abs() > l {
            return Parameter::invalid();
        }
        self.params(channel)
            .get(to_index(l, m))
            .copied()
            .unwrap_or_else(Parameter::invalid)
    }

    /// Coefficient values of one channel, index order.
    pub fn values(&self, channel: ColorChannel) -> Vec<f64> {
        self.params(channel).iter().map(Parameter::value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for l in 0..=20u32 {
            for m in -(l as i32)..=(l as i32) {
                assert_eq!(to_lm(to_index(l, m)), (l, m));
            }
        }
    }

    #[test]
    fn test_index_order() {
        assert_eq!(to_index(0, 0), 0);
        assert_eq!(to_index(1, -1), 1);
        assert_eq!(to_index(1, 1), 3);
        assert_eq!(to_index(2, -2), 4);
        assert_eq!(to_lm(8), (2, 2));
        assert_eq!(to_lm(9), (3, -3));
    }

    #[test]
    fn test_param_lookup() {
        let result = ShResult::from_coefficients(
            1,
            vec![vec![1.0, 2.0, 3.0, 4.0], vec![0.0; 4], vec![0.5; 4]],
        );
        assert_eq!(result.state(), EstimateState::Ok);
        let p = result.param(ColorChannel::R, 1, 0);
        assert!(p.is_valid());
        assert_eq!((p.l(), p.m(), p.value()), (1, 0, 3.0));
    }

    #[test]
    fn test_param_out_of_range_is_invalid() {
        let result = ShResult::from_coefficients(1, vec![vec![1.0; 4], vec![1.0; 4], vec![1.0; 4]]);
        assert!(!result.param(ColorChannel::R, 2, 0).is_valid());
        assert!(!result.param(ColorChannel::R, 1, 2).is_valid());
        assert!(!result.param(ColorChannel::R, 1, -2).is_valid());
        assert!(!result.param(ColorChannel::A, 0, 0).is_valid());
        assert!(result.params(ColorChannel::A).is_empty());
        assert!(!result.has_alpha());
    }

    #[test]
    fn test_param_huge_band_is_invalid() {
        let result = ShResult::from_coefficients(1, vec![vec![1.0; 4], vec![1.0; 4], vec![1.0; 4]]);
        assert!(!result.param(ColorChannel::R, u32::MAX, 0).is_valid());
        assert!(!result.param(ColorChannel::R, u32::MAX, i32::MIN).is_valid());
        assert!(!result.param(ColorChannel::B, 3_000_000_000, 7).is_valid());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_index_of_largest_band_does_not_overflow() {
        let l = u32::MAX as u64;
        assert_eq!(to_index(u32::MAX, 0) as u64, l * l + l);
    }

    #[test]
    fn test_default_result_not_estimated() {
        let result = ShResult::default();
        assert_eq!(result.state(), EstimateState::NotEstimated);
        assert!(!result.param(ColorChannel::G, 0, 0).is_valid());
    }

    #[test]
    fn test_channel_labels() {
        for channel in ColorChannel::RGBA {
            assert_eq!(ColorChannel::from_label(channel.label()), Some(channel));
        }
        assert_eq!(ColorChannel::from_label('x'), None);
    }
}
