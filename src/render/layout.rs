//! Cube-map output layouts.
//!
//! Horizontal cross, 4×3 cells of one face each:
//!
//! ```text
//!        col 0   col 1   col 2   col 3
//! row 0          +Y
//! row 1  -X      +Z      +X      -Z
//! row 2          -Y
//! ```
//!
//! Cells without a face are zero-filled.

use crate::core::{CubeFace, ImageBlock};
use crate::{Result, ShError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How synthesized faces are packaged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CubeMapLayout {
    /// One 4×3 atlas.
    #[default]
    HorizontalCross,
    /// Declared for completeness; synthesis rejects it.
    VerticalCross,
    /// Six independent face images in face order.
    Separable,
}

impl CubeMapLayout {
    pub fn name(self) -> &'static str {
        match self {
            CubeMapLayout::HorizontalCross => "horizontal-cross",
            CubeMapLayout::VerticalCross => "vertical-cross",
            CubeMapLayout::Separable => "separable",
        }
    }

    /// Fail for layouts that cannot be produced.
    pub fn ensure_supported(self) -> Result<Self> {
        match self {
            CubeMapLayout::VerticalCross => Err(ShError::UnsupportedLayout(self.name())),
            _ => Ok(self),
        }
    }
}

impl fmt::Display for CubeMapLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CubeMapLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "horizontal-cross" | "hcross" => Ok(CubeMapLayout::HorizontalCross),
            "vertical-cross" | "vcross" => Ok(CubeMapLayout::VerticalCross),
            "separable" | "faces" => Ok(CubeMapLayout::Separable),
            other => Err(format!(
                "unknown layout '{}' (expected horizontal-cross, vertical-cross or separable)",
                other
            )),
        }
    }
}

/// `(column, row)` of a face in the horizontal cross.
pub fn horizontal_cross_cell(face: CubeFace) -> (u32, u32) {
    match face {
        CubeFace::PosX => (2, 1),
        CubeFace::NegX => (0, 1),
        CubeFace::PosY => (1, 0),
        CubeFace::NegY => (1, 2),
        CubeFace::PosZ => (1, 1),
        CubeFace::NegZ => (3, 1),
    }
}

/// Pack six equally sized square faces (face order) into a 4×3 cross atlas.
pub fn compose_horizontal_cross(faces: &[ImageBlock]) -> Result<ImageBlock> {
    if faces.len() != CubeFace::ALL.len() {
        return Err(ShError::LackOfFiles { found: faces.len() });
    }
    let size = faces[0].width();
    let bpp = faces[0].bytes_per_pixel();
    for (face, block) in CubeFace::ALL.into_iter().zip(faces) {
        if block.width() != size || block.height() != size {
            return Err(ShError::SizeMismatch {
                path: face.suffix().into(),
                width: block.width(),
                height: block.height(),
                expected: size,
            });
        }
        if block.bytes_per_pixel() != bpp {
            return Err(ShError::InvalidSource(format!(
                "face {} has {} bytes per pixel, expected {}",
                face.suffix(),
                block.bytes_per_pixel(),
                bpp
            )));
        }
    }

    let mut atlas = ImageBlock::new(size * 4, size * 3, bpp);
    for (face, block) in CubeFace::ALL.into_iter().zip(faces) {
        let (col, row) = horizontal_cross_cell(face);
        atlas.blit(block, col * size, row * size);
    }
    Ok(atlas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba;

    #[test]
    fn test_cross_places_faces() {
        let colors = [
            Rgba::rgb(255, 0, 0),
            Rgba::rgb(0, 255, 0),
            Rgba::rgb(0, 0, 255),
            Rgba::rgb(255, 255, 0),
            Rgba::rgb(0, 255, 255),
            Rgba::rgb(255, 0, 255),
        ];
        let faces: Vec<_> = colors
            .iter()
            .map(|&c| ImageBlock::filled(3, 3, 3, c))
            .collect();
        let atlas = compose_horizontal_cross(&faces).unwrap();
        assert_eq!((atlas.width(), atlas.height()), (12, 9));

        for (face, color) in CubeFace::ALL.into_iter().zip(colors) {
            let (col, row) = horizontal_cross_cell(face);
            assert_eq!(atlas.pixel(col * 3 + 1, row * 3 + 1), color, "{:?}", face);
        }
        for (col, row) in [(0, 0), (2, 0), (3, 0), (0, 2), (2, 2), (3, 2)] {
            assert_eq!(atlas.pixel(col * 3 + 2, row * 3), Rgba::rgb(0, 0, 0));
        }
    }

    #[test]
    fn test_cross_rejects_mixed_sizes() {
        let mut faces = vec![ImageBlock::new(2, 2, 3); 6];
        faces[5] = ImageBlock::new(4, 4, 3);
        assert!(compose_horizontal_cross(&faces).is_err());
        assert!(compose_horizontal_cross(&faces[..5]).is_err());
    }

    #[test]
    fn test_layout_parsing() {
        assert_eq!("separable".parse::<CubeMapLayout>(), Ok(CubeMapLayout::Separable));
        assert_eq!("Horizontal_Cross".parse::<CubeMapLayout>(), Ok(CubeMapLayout::HorizontalCross));
        assert!("diagonal".parse::<CubeMapLayout>().is_err());
        assert!(CubeMapLayout::VerticalCross.ensure_supported().is_err());
    }
}
