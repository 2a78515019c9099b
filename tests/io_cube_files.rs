//! Cube-map and coefficient files on disk: face naming, validation, end-to-end.

use shcube_rs::core::Rgba;
use shcube_rs::estimate::NoProgress;
use shcube_rs::io::{
    face_paths, load_coefficients, load_image_block, save_coefficients, save_cube_map,
    save_image_block,
};
use shcube_rs::{
    synthesize, CubeEstimator, CubeMapLayout, EstimateState, ImageBlock, ImageCubeSource,
    ShError,
};
use std::path::{Path, PathBuf};

/// Write six PNG faces of the given sizes under `dir/cube_*.png`; returns the base path.
fn write_faces(dir: &Path, sizes: [(u32, u32); 6]) -> PathBuf {
    let base = dir.join("cube.png");
    let colors = [
        Rgba::rgb(200, 40, 40),
        Rgba::rgb(40, 200, 40),
        Rgba::rgb(40, 40, 200),
        Rgba::rgb(200, 200, 40),
        Rgba::rgb(40, 200, 200),
        Rgba::rgb(200, 40, 200),
    ];
    for ((path, (w, h)), color) in face_paths(&base).iter().zip(sizes).zip(colors) {
        save_image_block(&ImageBlock::filled(w, h, 3, color), path).unwrap();
    }
    base
}

#[test]
fn test_missing_faces() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_faces(dir.path(), [(8, 8); 6]);
    let paths = face_paths(&base);

    let err = ImageCubeSource::open(&paths[..5]).unwrap_err();
    assert!(matches!(err, ShError::LackOfFiles { found: 5 }));
    assert_eq!(err.state(), EstimateState::InvalidData);

    std::fs::remove_file(&paths[3]).unwrap();
    let err = ImageCubeSource::open(&paths[..]).unwrap_err();
    assert!(matches!(err, ShError::InvalidFile { .. }), "{}", err);
}

#[test]
fn test_mismatched_face_size() {
    let dir = tempfile::tempdir().unwrap();
    let mut sizes = [(8, 8); 6];
    sizes[2] = (16, 16);
    let base = write_faces(dir.path(), sizes);

    let err = ImageCubeSource::open(&face_paths(&base)[..]).unwrap_err();
    match err {
        ShError::SizeMismatch {
            width,
            height,
            expected,
            ..
        } => assert_eq!((width, height, expected), (16, 16, 8)),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_non_square_faces() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_faces(dir.path(), [(8, 4); 6]);
    let err = ImageCubeSource::open(&face_paths(&base)[..]).unwrap_err();
    assert!(matches!(err, ShError::NotSquare { width: 8, height: 4, .. }));
}

#[test]
fn test_unknown_output_extension() {
    let dir = tempfile::tempdir().unwrap();
    let block = ImageBlock::filled(4, 4, 3, Rgba::rgb(1, 2, 3));
    let err = save_image_block(&block, &dir.path().join("out.xyz")).unwrap_err();
    assert!(matches!(err, ShError::UnsupportedExtension(ref e) if e == "xyz"));
}

#[test]
fn test_png_faces_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_faces(dir.path(), [(16, 16); 6]);

    let cube = ImageCubeSource::open(&face_paths(&base)[..]).unwrap();
    let result = CubeEstimator::new(2)
        .unwrap()
        .estimate(&cube, &mut NoProgress)
        .unwrap();

    let coef_path = dir.path().join("cube.dat");
    save_coefficients(&result, &coef_path).unwrap();
    let loaded = load_coefficients(&coef_path).unwrap();
    assert_eq!(loaded, result);

    // Separable output lands next to the requested name with face suffixes.
    let out = dir.path().join("recon.png");
    let blocks = synthesize(&loaded, 8, CubeMapLayout::Separable, &mut NoProgress).unwrap();
    save_cube_map(&blocks, &out).unwrap();
    for path in face_paths(&out) {
        let face = load_image_block(&path).unwrap();
        assert_eq!((face.width(), face.height()), (8, 8));
    }

    let cross = dir.path().join("cross.bmp");
    let blocks =
        synthesize(&loaded, 8, CubeMapLayout::HorizontalCross, &mut NoProgress).unwrap();
    save_cube_map(&blocks, &cross).unwrap();
    let atlas = load_image_block(&cross).unwrap();
    assert_eq!((atlas.width(), atlas.height()), (32, 24));
}

#[test]
fn test_vertical_cross_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_faces(dir.path(), [(4, 4); 6]);
    let cube = ImageCubeSource::open(&face_paths(&base)[..]).unwrap();
    let result = CubeEstimator::new(0)
        .unwrap()
        .estimate(&cube, &mut NoProgress)
        .unwrap();

    let err = synthesize(&result, 4, CubeMapLayout::VerticalCross, &mut NoProgress).unwrap_err();
    assert!(matches!(err, ShError::UnsupportedLayout(_)));
    assert_eq!(err.state(), EstimateState::InvalidParam);
}
