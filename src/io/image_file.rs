//! Image decode/encode at the boundary, via the `image` crate.

use crate::core::{CubeFace, ImageBlock};
use crate::io::paths::{extension_of, with_suffix};
use crate::{Result, ShError};
use image::{ImageFormat, RgbImage, RgbaImage};
use log::debug;
use std::path::Path;

/// Decode an image file into an RGB or RGBA block (RGBA if the file has alpha).
pub fn load_image_block(path: &Path) -> Result<ImageBlock> {
    let img = image::open(path)?;
    let (width, height) = (img.width(), img.height());

    let block = if img.color().has_alpha() {
        ImageBlock::from_raw(width, height, 4, img.to_rgba8().into_raw())
    } else {
        ImageBlock::from_raw(width, height, 3, img.to_rgb8().into_raw())
    };
    block.ok_or_else(|| ShError::InvalidSource(format!("{}: decoded size mismatch", path.display())))
}

/// Encoder for a destination path, chosen from its extension.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    let ext = extension_of(path).to_ascii_lowercase();
    match ext.as_str() {
        "bmp" => Ok(ImageFormat::Bmp),
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "tga" => Ok(ImageFormat::Tga),
        _ => Err(ShError::UnsupportedExtension(ext)),
    }
}

/// Encode a block to `path`; the format follows the extension.
pub fn save_image_block(block: &ImageBlock, path: &Path) -> Result<()> {
    let format = output_format(path)?;

    // JPEG has no alpha channel.
    let drop_alpha = block.has_alpha() && format == ImageFormat::Jpeg;

    if block.has_alpha() && !drop_alpha {
        let img = RgbaImage::from_raw(block.width(), block.height(), block.data().to_vec())
            .ok_or_else(|| ShError::InvalidSource("RGBA buffer size mismatch".into()))?;
        img.save_with_format(path, format)?;
    } else {
        let data = if drop_alpha {
            block
                .data()
                .chunks_exact(4)
                .flat_map(|p| [p[0], p[1], p[2]])
                .collect()
        } else {
            block.data().to_vec()
        };
        let img = RgbImage::from_raw(block.width(), block.height(), data)
            .ok_or_else(|| ShError::InvalidSource("RGB buffer size mismatch".into()))?;
        img.save_with_format(path, format)?;
    }

    debug!("wrote {}x{} image to {}", block.width(), block.height(), path.display());
    Ok(())
}

/// Write synthesized output: one block goes to `path`, six blocks go to the
/// per-face names `<stem>_px.<ext>` ... `<stem>_nz.<ext>`.
pub fn save_cube_map(blocks: &[ImageBlock], path: &Path) -> Result<()> {
    output_format(path)?;
    match blocks.len() {
        1 => save_image_block(&blocks[0], path),
        6 => {
            for (face, block) in CubeFace::ALL.into_iter().zip(blocks) {
                save_image_block(block, &with_suffix(path, face.suffix()))?;
            }
            Ok(())
        }
        n => Err(ShError::InvalidSource(format!(
            "expected 1 or 6 images to write, got {}",
            n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba;

    #[test]
    fn test_output_format_by_extension() {
        assert_eq!(output_format(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("a.jpeg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(output_format(Path::new("a.tga")).unwrap(), ImageFormat::Tga);
        assert!(matches!(
            output_format(Path::new("a.gif")),
            Err(ShError::UnsupportedExtension(e)) if e == "gif"
        ));
        assert!(output_format(Path::new("noext")).is_err());
    }

    #[test]
    fn test_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        let mut block = ImageBlock::new(3, 2, 3);
        block.set_pixel(2, 1, Rgba::rgb(10, 200, 30));
        save_image_block(&block, &path).unwrap();

        let loaded = load_image_block(&path).unwrap();
        assert_eq!(loaded, block);
    }

    #[test]
    fn test_rgba_png_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        let block = ImageBlock::filled(2, 2, 4, Rgba::new(1, 2, 3, 4));
        save_image_block(&block, &path).unwrap();
        let loaded = load_image_block(&path).unwrap();
        assert_eq!(loaded.pixel(1, 1), Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn test_save_cube_map_separable_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        let blocks = vec![ImageBlock::new(2, 2, 3); 6];
        save_cube_map(&blocks, &path).unwrap();
        for suffix in ["_px", "_nx", "_py", "_ny", "_pz", "_nz"] {
            assert!(dir.path().join(format!("out{}.bmp", suffix)).exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let blocks = vec![ImageBlock::new(2, 2, 3)];
        assert!(matches!(
            save_cube_map(&blocks, &dir.path().join("out.webp")),
            Err(ShError::UnsupportedExtension(_))
        ));
    }
}
