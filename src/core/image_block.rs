//! Raw pixel buffers exchanged with image decoders and encoders.

use crate::core::color::Rgba;

/// A row-major block of 3 (RGB) or 4 (RGBA) byte pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlock {
    width: u32,
    height: u32,
    bytes_per_pixel: u8,
    data: Vec<u8>,
}

impl ImageBlock {
    /// Zero-filled block.
    pub fn new(width: u32, height: u32, bytes_per_pixel: u8) -> Self {
        debug_assert!(bytes_per_pixel == 3 || bytes_per_pixel == 4);
        let len = width as usize * height as usize * bytes_per_pixel as usize;
        Self {
            width,
            height,
            bytes_per_pixel,
            data: vec![0; len],
        }
    }

    /// Wrap an existing buffer. Returns `None` if the length does not match.
    pub fn from_raw(width: u32, height: u32, bytes_per_pixel: u8, data: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * bytes_per_pixel as usize;
        if !(bytes_per_pixel == 3 || bytes_per_pixel == 4) || data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    /// Block filled with a single color.
    pub fn filled(width: u32, height: u32, bytes_per_pixel: u8, color: Rgba) -> Self {
        let mut block = Self::new(width, height, bytes_per_pixel);
        for y in 0..height {
            for x in 0..width {
                block.set_pixel(x, y, color);
            }
        }
        block
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> u8 {
        self.bytes_per_pixel
    }

    pub fn has_alpha(&self) -> bool {
        self.bytes_per_pixel == 4
    }

    /// True when the block holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.bytes_per_pixel as usize
    }

    /// Read a pixel. Alpha is 255 for RGB blocks.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let o = self.offset(x, y);
        let p = &self.data[o..o + self.bytes_per_pixel as usize];
        let a = if self.has_alpha() { p[3] } else { 255 };
        Rgba::new(p[0], p[1], p[2], a)
    }

    /// Write a pixel. Alpha is dropped for RGB blocks.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let o = self.offset(x, y);
        let has_alpha = self.has_alpha();
        let p = &mut self.data[o..o + self.bytes_per_pixel as usize];
        p[0] = color.r;
        p[1] = color.g;
        p[2] = color.b;
        if has_alpha {
            p[3] = color.a;
        }
    }

    /// Copy `src` into this block with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, src: &ImageBlock, x: u32, y: u32) {
        debug_assert_eq!(src.bytes_per_pixel, self.bytes_per_pixel);
        debug_assert!(x + src.width <= self.width && y + src.height <= self.height);
        let row_bytes = src.width as usize * src.bytes_per_pixel as usize;
        for row in 0..src.height {
            let dst = self.offset(x, y + row);
            let s = src.offset(0, row);
            self.data[dst..dst + row_bytes].copy_from_slice(&src.data[s..s + row_bytes]);
        }
    }
}
