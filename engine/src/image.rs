//! Owned RGBA images and PNG loading.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::error::EngineError;

/// Straight (non-premultiplied) RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaImage {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EngineError> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if expected == 0 || pixels.len() != expected {
            return Err(EngineError::ImageSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A single-color image, mostly useful in tests.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let len = (width as usize) * (height as usize);
        let pixels = color.iter().copied().cycle().take(len * 4).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn load_png(path: &Path) -> Result<Self, EngineError> {
        let file = File::open(path)?;
        decode_png(BufReader::new(file))
    }

    pub fn decode_png_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        decode_png(Cursor::new(bytes))
    }
}

/// Upper bound on the decoded RGBA size of a single image.
pub const MAX_IMAGE_BYTES: usize = 64 * 1024 * 1024;

fn decode_png<R>(reader: R) -> Result<RgbaImage, EngineError>
where
    R: std::io::BufRead + std::io::Seek,
{
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let (color, _) = reader.output_color_type();
    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let samples = color.samples();
    // Checked against the RGBA output so every color type shares one budget.
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .filter(|&n| n.checked_mul(4).is_some_and(|bytes| bytes <= MAX_IMAGE_BYTES))
        .ok_or(EngineError::ImageTooLarge { width, height })?;
    let mut buf = vec![0u8; pixel_count * samples];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    let rgba = match color {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        other => return Err(EngineError::UnsupportedColor(other)),
    };

    RgbaImage::from_rgba(width, height, rgba)
}
