//! Projection / synthesis round trips on in-memory cube maps.

use approx::assert_relative_eq;
use shcube_rs::core::{ColorChannel, Rgba, ShBasis};
use shcube_rs::estimate::NoProgress;
use shcube_rs::render::Reconstructor;
use shcube_rs::source::FnSphereSource;
use shcube_rs::{
    synthesize, CubeEstimator, CubeMapLayout, EstimateState, ImageBlock, ImageCubeSource,
    ShError, ShResult, SphereEstimator,
};
use nalgebra::Vector4;
use std::f64::consts::{FRAC_PI_2, PI};

const Y00: f64 = 0.282_094_791_773_878_14;

/// Low-frequency level-2 signal that stays inside `[0, 1]` everywhere.
fn smooth_result() -> ShResult {
    let bands = [0.05, -0.04, 0.03, 0.02, -0.05, 0.04, 0.03, -0.02];
    let mut r = vec![0.5 / Y00];
    r.extend(bands);
    let mut g = vec![0.4 / Y00];
    g.extend(bands.iter().map(|b| -b));
    let mut b = vec![0.6 / Y00];
    b.extend(bands.iter().rev());
    ShResult::from_coefficients(2, vec![r, g, b])
}

fn max_channel_diff(a: &[ImageBlock], b: &[ImageBlock]) -> u8 {
    a.iter()
        .zip(b)
        .flat_map(|(x, y)| x.data().iter().zip(y.data()))
        .map(|(p, q)| p.abs_diff(*q))
        .max()
        .unwrap_or(0)
}

#[test]
fn test_roundtrip_level_two() {
    let truth = smooth_result();
    for size in [24, 32] {
        let faces = synthesize(&truth, size, CubeMapLayout::Separable, &mut NoProgress).unwrap();
        let cube = ImageCubeSource::from_blocks(faces.clone()).unwrap();

        let estimated = CubeEstimator::new(2)
            .unwrap()
            .estimate(&cube, &mut NoProgress)
            .unwrap();
        assert_eq!(estimated.state(), EstimateState::Ok);

        let again =
            synthesize(&estimated, size, CubeMapLayout::Separable, &mut NoProgress).unwrap();
        let diff = max_channel_diff(&faces, &again);
        assert!(diff <= 1, "size {}: max channel difference {}", size, diff);
    }
}

#[test]
fn test_constant_map_projects_to_dc() {
    let color = Rgba::rgb(153, 64, 230);
    let faces = vec![ImageBlock::filled(32, 32, 3, color); 6];
    let cube = ImageCubeSource::from_blocks(faces).unwrap();
    let result = CubeEstimator::new(1)
        .unwrap()
        .estimate(&cube, &mut NoProgress)
        .unwrap();

    let expected = [153.0 / 255.0, 64.0 / 255.0, 230.0 / 255.0];
    for (channel, want) in ColorChannel::RGB.iter().zip(expected) {
        let dc = result.param(*channel, 0, 0).value();
        assert_relative_eq!(dc * Y00, want, max_relative = 1e-3);
        for m in -1..=1 {
            assert!(result.param(*channel, 1, m).value().abs() < 1e-9);
        }
    }
}

#[test]
fn test_constant_map_roundtrips_at_level_zero() {
    let color = Rgba::rgb(153, 64, 230);
    let faces = vec![ImageBlock::filled(32, 32, 3, color); 6];
    let cube = ImageCubeSource::from_blocks(faces.clone()).unwrap();
    let result = CubeEstimator::new(0)
        .unwrap()
        .estimate(&cube, &mut NoProgress)
        .unwrap();
    assert_eq!(result.params(ColorChannel::R).len(), 1);

    let again = synthesize(&result, 32, CubeMapLayout::Separable, &mut NoProgress).unwrap();
    assert_eq!(again, faces);
}

#[test]
fn test_single_lit_face() {
    // +X white, everything else black: the DC term integrates one sixth of the sphere.
    let mut faces = vec![ImageBlock::new(32, 32, 3); 6];
    faces[0] = ImageBlock::filled(32, 32, 3, Rgba::rgb(255, 255, 255));
    let cube = ImageCubeSource::from_blocks(faces).unwrap();
    let result = CubeEstimator::new(1)
        .unwrap()
        .estimate(&cube, &mut NoProgress)
        .unwrap();

    let dc = result.param(ColorChannel::R, 0, 0).value();
    assert_relative_eq!(dc, 4.0 * PI / 6.0 * Y00, max_relative = 1e-3);

    // The reconstruction is brighter toward +X than toward -X.
    let mut recon = Reconstructor::new(&result).unwrap();
    let toward = recon.radiance(FRAC_PI_2, 0.0);
    let away = recon.radiance(FRAC_PI_2, PI);
    assert!(toward.x > away.x + 0.1, "{} vs {}", toward.x, away.x);
}

#[test]
fn test_cross_atlas_dimensions() {
    let faces = synthesize(&smooth_result(), 16, CubeMapLayout::HorizontalCross, &mut NoProgress)
        .unwrap();
    assert_eq!(faces.len(), 1);
    let atlas = &faces[0];
    assert_eq!((atlas.width(), atlas.height()), (64, 48));

    // Top-left cell is empty.
    assert_eq!(atlas.pixel(0, 0), Rgba::rgb(0, 0, 0));
    // +Z sits in cell (1, 1).
    assert_ne!(atlas.pixel(24, 24), Rgba::rgb(0, 0, 0));
}

#[test]
fn test_level_out_of_range_rejected_before_work() {
    assert!(matches!(
        CubeEstimator::new(11),
        Err(ShError::LevelOutOfRange(11))
    ));

    let bad = ShResult::from_coefficients(11, vec![vec![0.0; 144]; 3]);
    let mut calls = 0u64;
    let mut count = |_: u64, _: u64| calls += 1;
    let err = synthesize(&bad, 8, CubeMapLayout::Separable, &mut count).unwrap_err();
    assert!(matches!(err, ShError::LevelOutOfRange(11)));
    assert_eq!(err.state(), EstimateState::InvalidParam);
    assert_eq!(calls, 0);
}

#[test]
fn test_sphere_and_cube_estimators_agree() {
    let truth = smooth_result();
    let basis = ShBasis::new(2);
    let channels: Vec<Vec<f64>> = ColorChannel::RGB.iter().map(|&c| truth.values(c)).collect();
    let sphere = FnSphereSource(|theta: f64, phi: f64| {
        let y = basis.evaluate_all(theta, phi);
        let eval = |c: &Vec<f64>| c.iter().zip(&y).map(|(a, b)| a * b).sum::<f64>();
        Vector4::new(eval(&channels[0]), eval(&channels[1]), eval(&channels[2]), 1.0)
    });
    let from_sphere = SphereEstimator::new(2)
        .unwrap()
        .estimate(&sphere, &mut NoProgress)
        .unwrap();

    let faces = synthesize(&truth, 32, CubeMapLayout::Separable, &mut NoProgress).unwrap();
    let cube = ImageCubeSource::from_blocks(faces).unwrap();
    let from_cube = CubeEstimator::new(2)
        .unwrap()
        .estimate(&cube, &mut NoProgress)
        .unwrap();

    for channel in ColorChannel::RGB {
        let expected = truth.values(channel);
        for (i, (s, c)) in from_sphere
            .values(channel)
            .iter()
            .zip(from_cube.values(channel))
            .enumerate()
        {
            assert!((s - expected[i]).abs() < 1e-3, "sphere {:?}[{}] = {}", channel, i, s);
            assert!((s - c).abs() < 2e-2, "{:?}[{}]: sphere {} vs cube {}", channel, i, s, c);
        }
    }
}
