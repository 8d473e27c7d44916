//! Glyph segmentation: slice a font sheet into fixed-size cells.
//!
//! Font rows stacked vertically are read as if they were concatenated side
//! by side into one strip of height `cell_height`; glyphs are then taken
//! left to right across that strip.

use crate::bitmap::Bitmap;
use crate::error::FontError;
use crate::size::GlyphSize;

/// One glyph cell as a row-major block of 0/1 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Glyph {
    /// Create a blank glyph.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width * height) as usize],
        }
    }

    /// Get the pixel at column `x`, row `y`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at column `x`, row `y`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, val: u8) {
        self.pixels[(y * self.width + x) as usize] = (val != 0) as u8;
    }
}

/// Split a binarized bitmap into glyphs in reading order.
///
/// The bitmap height must be a multiple of the cell height, and the strip
/// width `width * (height / cell_height)` a multiple of the cell width.
pub fn segment(bitmap: &Bitmap, size: GlyphSize) -> Result<Vec<Glyph>, FontError> {
    let (cw, ch) = (size.width, size.height);

    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(FontError::Empty);
    }
    if bitmap.height % ch != 0 {
        return Err(FontError::Geometry {
            dimension: "image height",
            actual: bitmap.height,
            cell: "height",
            expected: ch,
        });
    }

    let font_rows = bitmap.height / ch;
    let strip_width = bitmap.width * font_rows;
    if strip_width % cw != 0 {
        return Err(FontError::Geometry {
            dimension: "strip width",
            actual: strip_width,
            cell: "width",
            expected: cw,
        });
    }

    let count = strip_width / cw;
    tracing::debug!(
        font_rows,
        strip_width,
        glyphs = count,
        "segmenting {}x{} bitmap into {} cells",
        bitmap.width,
        bitmap.height,
        size
    );

    let mut glyphs = Vec::with_capacity(count as usize);
    for g in 0..count {
        let mut glyph = Glyph::new(cw, ch);
        for c in 0..cw {
            // Map the strip column back to its source band.
            let sx = g * cw + c;
            let band = sx / bitmap.width;
            let x = sx % bitmap.width;
            for r in 0..ch {
                glyph.set(c, r, bitmap.get(x, band * ch + r));
            }
        }
        glyphs.push(glyph);
    }

    Ok(glyphs)
}
