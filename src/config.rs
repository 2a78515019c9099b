//! Run configuration shared by the library entry points and the CLI.

use crate::core::validate_level;
use crate::render::CubeMapLayout;
use crate::{Result, ShError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for estimation and synthesis. Missing JSON fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Maximum SH band level, `0..=10`.
    pub level: u32,
    /// Edge length of synthesized faces, in texels.
    pub face_size: u32,
    pub layout: CubeMapLayout,
    /// Number of progress log lines per pass.
    pub progress_steps: u32,
    /// Also project and write the alpha channel.
    pub with_alpha: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            level: 3,
            face_size: 128,
            layout: CubeMapLayout::HorizontalCross,
            progress_steps: 40,
            with_alpha: false,
        }
    }
}

impl ProbeConfig {
    /// Load from a JSON file and validate.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()
    }

    /// Reject settings that would fail before any computation starts.
    pub fn validate(self) -> Result<Self> {
        validate_level(self.level)?;
        self.layout.ensure_supported()?;
        if self.face_size == 0 {
            return Err(ShError::InvalidSource("face_size must be non-zero".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ProbeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_level_eleven_rejected() {
        let config = ProbeConfig {
            level: 11,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ShError::LevelOutOfRange(11))));
    }

    #[test]
    fn test_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "level": 5, "layout": "separable" }}"#).unwrap();
        let config = ProbeConfig::load(file.path()).unwrap();
        assert_eq!(config.level, 5);
        assert_eq!(config.layout, CubeMapLayout::Separable);
        assert_eq!(config.face_size, 128);
    }

    #[test]
    fn test_vertical_cross_rejected() {
        let config = ProbeConfig {
            layout: CubeMapLayout::VerticalCross,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ShError::UnsupportedLayout(_))));
    }
}
