//! Coefficient file formats.
//!
//! Binary layout (little endian):
//! ```text
//! Header (20 bytes):
//!   - Header size: u32 (= 20)
//!   - Max band level: u32
//!   - Channel count: u32 (3 = RGB, 4 = RGBA)
//!   - Has alpha: u32 (0 or 1)
//!   - Reserved: u32
//!
//! Coefficients:
//!   - channel count × (level+1)² × f64, channel-major, index order
//! ```
//!
//! The text dump writes `#` header lines followed by one `channel l m value`
//! line per coefficient. JSON is the serde form of [`ShResult`].

use crate::core::{basis_len, to_index, to_lm, ColorChannel, ShResult, MAX_LEVEL};
use crate::io::paths::extension_of;
use crate::{Result, ShError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

const HEADER_SIZE: u32 = 20;

/// Coefficient file flavors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoefficientFormat {
    Binary,
    Text,
    Json,
}

impl CoefficientFormat {
    /// `txt` → text, `json` → JSON, anything else → binary.
    pub fn from_path(path: &Path) -> Self {
        match extension_of(path).to_ascii_lowercase().as_str() {
            "txt" => CoefficientFormat::Text,
            "json" => CoefficientFormat::Json,
            _ => CoefficientFormat::Binary,
        }
    }
}

fn channels_of(result: &ShResult) -> &'static [ColorChannel] {
    if result.has_alpha() {
        &ColorChannel::RGBA
    } else {
        &ColorChannel::RGB
    }
}

/// Write the binary form.
pub fn write_binary<W: Write>(writer: &mut W, result: &ShResult) -> Result<()> {
    let channels = channels_of(result);
    let count = basis_len(result.max_level());

    writer.write_u32::<LittleEndian>(HEADER_SIZE)?;
    writer.write_u32::<LittleEndian>(result.max_level())?;
    writer.write_u32::<LittleEndian>(channels.len() as u32)?;
    writer.write_u32::<LittleEndian>(result.has_alpha() as u32)?;
    writer.write_u32::<LittleEndian>(0)?;

    for &channel in channels {
        let mut values = result.values(channel);
        values.resize(count, 0.0);
        for v in values {
            writer.write_f64::<LittleEndian>(v)?;
        }
    }
    Ok(())
}

/// Read the binary form.
pub fn read_binary<R: Read>(reader: &mut R) -> Result<ShResult> {
    let header_size = reader.read_u32::<LittleEndian>()?;
    if header_size < HEADER_SIZE {
        return Err(ShError::InvalidFormat(format!(
            "header size {} is smaller than {}",
            header_size, HEADER_SIZE
        )));
    }
    let max_level = reader.read_u32::<LittleEndian>()?;
    let channel_count = reader.read_u32::<LittleEndian>()?;
    let has_alpha = reader.read_u32::<LittleEndian>()?;
    let _reserved = reader.read_u32::<LittleEndian>()?;

    // Skip header fields newer than this reader.
    let extra = (header_size - HEADER_SIZE) as u64;
    if extra > 0 {
        std::io::copy(&mut reader.by_ref().take(extra), &mut std::io::sink())?;
    }

    if max_level > MAX_LEVEL {
        return Err(ShError::InvalidFormat(format!(
            "band level {} exceeds {}",
            max_level, MAX_LEVEL
        )));
    }
    let expected_channels = if has_alpha != 0 { 4 } else { 3 };
    if channel_count != expected_channels {
        return Err(ShError::InvalidFormat(format!(
            "{} channels with alpha flag {}",
            channel_count, has_alpha
        )));
    }

    let count = basis_len(max_level);
    let mut coefficients = Vec::with_capacity(channel_count as usize);
    for _ in 0..channel_count {
        let mut values = vec![0.0f64; count];
        reader.read_f64_into::<LittleEndian>(&mut values)?;
        coefficients.push(values);
    }

    Ok(ShResult::from_coefficients(max_level, coefficients))
}

/// Write the human-readable dump.
pub fn write_text<W: Write>(writer: &mut W, result: &ShResult) -> Result<()> {
    let channels = channels_of(result);
    writeln!(writer, "# shcube SH coefficients")?;
    writeln!(writer, "# max_level {}", result.max_level())?;
    writeln!(writer, "# channels {}", channels.len())?;
    writeln!(writer, "# channel l m value")?;

    for &channel in channels {
        for p in result.params(channel) {
            writeln!(writer, "{} {} {} {}", channel.label(), p.l(), p.m(), p.value())?;
        }
    }
    Ok(())
}

/// Read the human-readable dump.
pub fn read_text<R: BufRead>(reader: R) -> Result<ShResult> {
    let mut max_level = None;
    let mut coefficients: Vec<Vec<f64>> = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            let mut parts = comment.split_whitespace();
            if parts.next() == Some("max_level") {
                max_level = parts.next().and_then(|v| v.parse::<u32>().ok());
                if let Some(level) = max_level.filter(|&level| level > MAX_LEVEL) {
                    return Err(ShError::InvalidFormat(format!(
                        "band level {} exceeds {}",
                        level, MAX_LEVEL
                    )));
                }
            }
            continue;
        }

        let bad = || ShError::InvalidFormat(format!("line {}: '{}'", n + 1, line));
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(bad());
        }
        let channel = fields[0]
            .chars()
            .next()
            .and_then(ColorChannel::from_label)
            .ok_or_else(bad)?;
        let l: u32 = fields[1].parse().map_err(|_| bad())?;
        let m: i32 = fields[2].parse().map_err(|_| bad())?;
        let value: f64 = fields[3].parse().map_err(|_| bad())?;
        if m.unsigned_abs() > l {
            return Err(bad());
        }
        let limit = max_level.unwrap_or(MAX_LEVEL);
        if l > limit {
            return Err(ShError::InvalidFormat(format!(
                "line {}: band {} exceeds level {}",
                n + 1,
                l,
                limit
            )));
        }

        let ci = channel.index();
        if coefficients.len() <= ci {
            coefficients.resize_with(ci + 1, Vec::new);
        }
        let index = to_index(l, m);
        let list = &mut coefficients[ci];
        if list.len() <= index {
            list.resize(index + 1, 0.0);
        }
        list[index] = value;
    }

    if coefficients.len() < 3 {
        return Err(ShError::InvalidFormat(format!(
            "found {} channels, expected at least 3",
            coefficients.len()
        )));
    }

    let longest = coefficients.iter().map(Vec::len).max().unwrap_or(1);
    let level = match max_level {
        Some(level) => level,
        None => to_lm(longest.saturating_sub(1)).0,
    };
    // Every band was checked against MAX_LEVEL while reading.
    for list in &mut coefficients {
        list.resize(basis_len(level), 0.0);
    }

    Ok(ShResult::from_coefficients(level, coefficients))
}

/// Save coefficients; the format follows the extension (see [`CoefficientFormat::from_path`]).
pub fn save_coefficients(result: &ShResult, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let format = CoefficientFormat::from_path(path);
    match format {
        CoefficientFormat::Binary => write_binary(&mut writer, result)?,
        CoefficientFormat::Text => write_text(&mut writer, result)?,
        CoefficientFormat::Json => serde_json::to_writer_pretty(&mut writer, result)?,
    }
    writer.flush()?;
    debug!("wrote {:?} coefficients to {}", format, path.display());
    Ok(())
}

/// Load coefficients written by [`save_coefficients`].
pub fn load_coefficients(path: &Path) -> Result<ShResult> {
    let mut reader = BufReader::new(File::open(path)?);
    match CoefficientFormat::from_path(path) {
        CoefficientFormat::Binary => read_binary(&mut reader),
        CoefficientFormat::Text => read_text(reader),
        CoefficientFormat::Json => Ok(serde_json::from_reader(reader)?),
    }
}
