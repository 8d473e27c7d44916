use std::fmt;
use std::str::FromStr;

use crate::error::FontError;

/// Width and height of one glyph cell, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSize {
    pub width: u32,
    pub height: u32,
}

impl GlyphSize {
    /// Create a glyph size. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, FontError> {
        if width == 0 || height == 0 {
            return Err(FontError::InvalidSize(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }

    /// Number of 8-row bands needed to hold one glyph.
    pub fn font_rows(&self) -> u32 {
        self.height.div_ceil(8)
    }

    /// Packed bytes per glyph: one byte per column per band.
    pub fn bytes_per_character(&self) -> usize {
        (self.width * self.font_rows()) as usize
    }
}

impl TryFrom<(u32, u32)> for GlyphSize {
    type Error = FontError;

    fn try_from((width, height): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(width, height)
    }
}

/// Parses `"WxH"`; the separator is case-insensitive.
impl FromStr for GlyphSize {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FontError::InvalidSize(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let (w, h) = lower.split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        Self::new(width, height).map_err(|_| invalid())
    }
}

impl fmt::Display for GlyphSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
