//! Pixel sources the recognizer reads from.
//!
//! The library never grabs the screen itself; a [`Capture`] implementation hands over a [`Raster`] once per refresh.

use image::RgbaImage;

use crate::error::RasterError;

/// A read-only rectangular grid of RGBA samples, addressed `(row, col)` in image space.
pub trait Raster {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// The `[r, g, b, a]` sample at `(row, col)`. Callers stay in bounds.
    fn rgba(&self, row: u32, col: u32) -> [u8; 4];
}

impl Raster for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgba(&self, row: u32, col: u32) -> [u8; 4] {
        self.get_pixel(col, row).0
    }
}

/// A borrowed row-major RGBA buffer, 4 bytes per pixel.
#[derive(Clone, Copy, Debug)]
pub struct RgbaFrame<'a> {
    width: u32,
    height: u32,
    bytes: &'a [u8],
}

impl<'a> RgbaFrame<'a> {
    /// Wrap `bytes`, which must hold exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, bytes: &'a [u8]) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(RasterError::BufferSize { expected, actual: bytes.len() });
        }

        Ok(Self { width, height, bytes })
    }

    /// Swap the red and blue channels of a BGRA buffer in place, making it usable as RGBA.
    pub fn reorder_bgra(bytes: &mut [u8]) {
        for pixel in bytes.chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
    }
}

impl Raster for RgbaFrame<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgba(&self, row: u32, col: u32) -> [u8; 4] {
        let start = (row as usize * self.width as usize + col as usize) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.bytes[start..start + 4]);
        out
    }
}

/// Fixed-point perceptual luminance; the weights sum to 128 so the shift divides without floats.
pub fn luminance(rgba: [u8; 4]) -> u8 {
    let [r, g, b, _] = rgba;
    ((38 * r as u32 + 75 * g as u32 + 15 * b as u32) >> 7) as u8
}

/// Something that can grab the current state of the game window.
pub trait Capture {
    /// The raster produced by one capture.
    type Frame: Raster;
    /// Why a capture failed.
    type Error: std::error::Error;

    /// Take a fresh snapshot.
    fn capture(&mut self) -> Result<Self::Frame, Self::Error>;
}
