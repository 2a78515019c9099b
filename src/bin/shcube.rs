//! shcube: Estimate SH coefficients from a cube map, or reconstruct one from coefficients
//!
//! Usage:
//!   shcube estimate -f probe.png -o probe.dat -l 3 --preview probe_sh.png
//!   shcube reconstruct -i probe.dat -o probe_sh.png --size 128 --layout separable
//!
//! `-f probe.png` reads the six faces `probe_px.png`, `probe_nx.png`, ... `probe_nz.png`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shcube_rs::estimate::LogProgress;
use log::info;
use shcube_rs::io::{
    face_paths, load_coefficients, output_format, save_coefficients, save_cube_map,
};
use shcube_rs::{synthesize, CubeEstimator, CubeMapLayout, ImageCubeSource, ProbeConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Spherical harmonics projection and reconstruction of cube maps"
)]
struct Cli {
    /// JSON settings file; command-line flags take precedence.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a six-face cube map onto SH coefficients.
    Estimate {
        /// Base face file name; `_px` ... `_nz` are appended before the extension.
        #[arg(short = 'f', long = "faces", value_name = "BASE")]
        faces: PathBuf,

        /// Coefficient output (`.txt` text, `.json` JSON, anything else binary).
        #[arg(short, long)]
        output: PathBuf,

        /// Maximum band level (0..=10).
        #[arg(short, long)]
        level: Option<u32>,

        /// Also write a reconstruction of the estimate to this image.
        #[arg(long, value_name = "IMAGE")]
        preview: Option<PathBuf>,

        /// Project the alpha channel as well.
        #[arg(long)]
        alpha: bool,
    },

    /// Synthesize a cube map from a coefficient file.
    Reconstruct {
        /// Coefficient file written by `estimate`.
        #[arg(short, long)]
        input: PathBuf,

        /// Output image; the extension selects the encoder.
        #[arg(short, long)]
        output: PathBuf,

        /// Face edge length in texels.
        #[arg(long)]
        size: Option<u32>,

        /// `horizontal-cross` or `separable`.
        #[arg(long)]
        layout: Option<CubeMapLayout>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("shcube v{}", shcube_rs::VERSION);

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ProbeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ProbeConfig::default(),
    };

    match cli.command {
        Command::Estimate {
            faces,
            output,
            level,
            preview,
            alpha,
        } => {
            if let Some(level) = level {
                config.level = level;
            }
            config.with_alpha |= alpha;
            let config = config.validate()?;
            run_estimate(&config, &faces, &output, preview.as_deref())
        }
        Command::Reconstruct {
            input,
            output,
            size,
            layout,
        } => {
            if let Some(size) = size {
                config.face_size = size;
            }
            if let Some(layout) = layout {
                config.layout = layout;
            }
            let config = config.validate()?;
            run_reconstruct(&config, &input, &output)
        }
    }
}

fn run_estimate(
    config: &ProbeConfig,
    base: &Path,
    output: &Path,
    preview: Option<&Path>,
) -> Result<()> {
    // Fail on an unwritable preview before any file is read or written.
    if let Some(preview) = preview {
        output_format(preview)
            .with_context(|| format!("cannot write preview {}", preview.display()))?;
    }
    let estimator = CubeEstimator::new(config.level)?.with_alpha(config.with_alpha);

    let paths = face_paths(base);
    let cube = ImageCubeSource::open(&paths[..])
        .with_context(|| format!("failed to open cube map {}", base.display()))?;

    let mut progress = LogProgress::new("estimate", config.progress_steps);
    let result = estimator.estimate(&cube, &mut progress)?;

    save_coefficients(&result, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("saved coefficients to {}", output.display());

    if let Some(preview) = preview {
        let mut progress = LogProgress::new("preview", config.progress_steps);
        let blocks = synthesize(&result, config.face_size, config.layout, &mut progress)?;
        save_cube_map(&blocks, preview)
            .with_context(|| format!("failed to write preview {}", preview.display()))?;
        info!("saved preview to {}", preview.display());
    }
    Ok(())
}

fn run_reconstruct(
    config: &ProbeConfig,
    input: &Path,
    output: &Path,
) -> Result<()> {
    output_format(output).with_context(|| format!("cannot write {}", output.display()))?;
    let result = load_coefficients(input)
        .with_context(|| format!("failed to read coefficients {}", input.display()))?;

    let mut progress = LogProgress::new("reconstruct", config.progress_steps);
    let blocks = synthesize(&result, config.face_size, config.layout, &mut progress)?;
    save_cube_map(&blocks, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("saved {} to {}", config.layout, output.display());
    Ok(())
}
