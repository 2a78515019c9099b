//! Cube map backed by six decoded face images.

use crate::core::{CubeFace, ImageBlock, Rgba};
use crate::io::load_image_block;
use crate::source::CubeMapSource;
use crate::{Result, ShError};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Six square, equally sized faces in order +X, -X, +Y, -Y, +Z, -Z.
#[derive(Clone, Debug)]
pub struct ImageCubeSource {
    faces: Vec<ImageBlock>,
}

impl ImageCubeSource {
    /// Decode six face files, ordered `_px, _nx, _py, _ny, _pz, _nz`.
    ///
    /// Fails if fewer than six names are given, a file does not decode, or a
    /// face is non-square or differs in size from the first face.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        if paths.len() < CubeFace::ALL.len() {
            return Err(ShError::LackOfFiles { found: paths.len() });
        }
        if paths.len() > CubeFace::ALL.len() {
            warn!(
                "{} cube map files given, ignoring all after the first 6",
                paths.len()
            );
        }

        let mut faces: Vec<ImageBlock> = Vec::with_capacity(CubeFace::ALL.len());
        for path in paths.iter().take(CubeFace::ALL.len()) {
            let path = path.as_ref();
            let block = load_image_block(path).map_err(|e| match e {
                ShError::Image(source) => ShError::InvalidFile {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })?;
            debug!(
                "loaded face {} ({}x{}, {} bpp)",
                path.display(),
                block.width(),
                block.height(),
                block.bytes_per_pixel()
            );
            check_face(path, &block, faces.first())?;
            faces.push(block);
        }

        Ok(Self { faces })
    }

    /// Build from already decoded faces, ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn from_blocks(blocks: Vec<ImageBlock>) -> Result<Self> {
        if blocks.len() < CubeFace::ALL.len() {
            return Err(ShError::LackOfFiles {
                found: blocks.len(),
            });
        }

        let mut faces: Vec<ImageBlock> = Vec::with_capacity(CubeFace::ALL.len());
        for (face, block) in CubeFace::ALL.into_iter().zip(blocks) {
            let label = PathBuf::from(face.suffix());
            check_face(&label, &block, faces.first())?;
            faces.push(block);
        }
        Ok(Self { faces })
    }

    pub fn face(&self, face: CubeFace) -> &ImageBlock {
        &self.faces[face.index()]
    }
}

fn check_face(path: &Path, block: &ImageBlock, first: Option<&ImageBlock>) -> Result<()> {
    if block.is_empty() {
        return Err(ShError::InvalidSource(format!(
            "face {} has no pixels",
            path.display()
        )));
    }
    if let Some(first) = first {
        if first.width() != block.width() || first.height() != block.height() {
            return Err(ShError::SizeMismatch {
                path: path.to_path_buf(),
                width: block.width(),
                height: block.height(),
                expected: first.width(),
            });
        }
    }
    if block.width() != block.height() {
        return Err(ShError::NotSquare {
            path: path.to_path_buf(),
            width: block.width(),
            height: block.height(),
        });
    }
    Ok(())
}

impl CubeMapSource for ImageCubeSource {
    fn texel_size(&self) -> u32 {
        self.faces[0].width()
    }

    fn value(&self, face: CubeFace, u: u32, v: u32) -> Rgba {
        let block = &self.faces[face.index()];
        let w = block.width();
        block.pixel(u % w, v % w)
    }
}
