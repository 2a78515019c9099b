//! File naming helpers for cube-map face sets.

use crate::core::CubeFace;
use std::path::{Path, PathBuf};

/// Extension of a path without the dot; empty if there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File stem of a path (no directory, no extension); empty if there is none.
pub fn base_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Path with `suffix` inserted between stem and extension: `dir/probe.png` → `dir/probe_px.png`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let ext = extension_of(path);
    let mut name = base_name_of(path);
    name.push_str(suffix);
    if !ext.is_empty() {
        name.push('.');
        name.push_str(&ext);
    }
    path.with_file_name(name)
}

/// The six face file names derived from a base name, ordered +X, -X, +Y, -Y, +Z, -Z.
pub fn face_paths(base: &Path) -> [PathBuf; 6] {
    CubeFace::ALL.map(|face| with_suffix(base, face.suffix()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_paths() {
        let paths = face_paths(Path::new("probes/sky.png"));
        let expected = [
            "probes/sky_px.png",
            "probes/sky_nx.png",
            "probes/sky_py.png",
            "probes/sky_ny.png",
            "probes/sky_pz.png",
            "probes/sky_nz.png",
        ];
        for (p, e) in paths.iter().zip(expected) {
            assert_eq!(p, Path::new(e));
        }
    }

    #[test]
    fn test_name_parts() {
        assert_eq!(extension_of(Path::new("a/b.tga")), "tga");
        assert_eq!(extension_of(Path::new("a/b")), "");
        assert_eq!(base_name_of(Path::new("a/b.c.bmp")), "b.c");
        assert_eq!(with_suffix(Path::new("cube"), "_nz"), PathBuf::from("cube_nz"));
    }
}
