//! Favicon generation.
//!
//! Renders a single configurable letter on a solid background into a
//! multi-resolution `favicon.ico` (16, 32 and 48 px frames). The glyph
//! comes from an embedded 5x7 bitmap font scaled by integer factors,
//! so the output is deterministic and needs no font files at runtime.

use crate::config::{FaviconConfig, parse_hex_color};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaviconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported glyph {0:?}, expected A-Z")]
    Glyph(char),
    #[error("invalid color {0:?}")]
    Color(String),
}

/// Frame edge lengths in the generated ICO.
const SIZES: [u32; 3] = [16, 32, 48];

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// 5x7 bitmaps for A-Z, one byte per row, bit 4 is the leftmost pixel.
const GLYPHS: [[u8; 7]; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

fn glyph_for(letter: char) -> Result<&'static [u8; 7], FaviconError> {
    let upper = letter.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() {
        return Err(FaviconError::Glyph(letter));
    }
    Ok(&GLYPHS[(upper as u8 - b'A') as usize])
}

/// Draw one square frame with the glyph centered at roughly 65% of the
/// frame height.
fn draw_frame(size: u32, glyph: &[u8; 7], bg: [u8; 3], fg: [u8; 3]) -> RgbaImage {
    let scale = ((size * 65 / 100) / GLYPH_HEIGHT).max(1);
    let glyph_w = GLYPH_WIDTH * scale;
    let glyph_h = GLYPH_HEIGHT * scale;
    let x0 = (size.saturating_sub(glyph_w)) / 2;
    let y0 = (size.saturating_sub(glyph_h)) / 2;

    let mut img = RgbaImage::from_pixel(size, size, Rgba([bg[0], bg[1], bg[2], 255]));
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let x = x0 + col * scale + dx;
                    let y = y0 + row as u32 * scale + dy;
                    if x < size && y < size {
                        img.put_pixel(x, y, Rgba([fg[0], fg[1], fg[2], 255]));
                    }
                }
            }
        }
    }
    img
}

/// Generate `favicon.ico` at `out_path` from the configured style.
pub fn generate_favicon(out_path: &Path, config: &FaviconConfig) -> Result<PathBuf, FaviconError> {
    let letter = config
        .letter
        .chars()
        .next()
        .ok_or(FaviconError::Glyph(' '))?;
    let glyph = glyph_for(letter)?;
    let bg = parse_hex_color(&config.background)
        .ok_or_else(|| FaviconError::Color(config.background.clone()))?;
    let fg = parse_hex_color(&config.foreground)
        .ok_or_else(|| FaviconError::Color(config.foreground.clone()))?;

    let frames = SIZES
        .iter()
        .map(|&size| {
            let img = draw_frame(size, glyph, bg, fg);
            IcoFrame::as_png(img.as_raw(), size, size, ExtendedColorType::Rgba8)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(out_path)?;
    IcoEncoder::new(BufWriter::new(file)).encode_images(&frames)?;
    Ok(out_path.to_path_buf())
}
