pub mod error;
pub mod bitmap;
pub mod size;
pub mod segment;
pub mod pack;
pub mod skip;
pub mod emit;

use bitmap::Bitmap;
use error::FontError;
use pack::{PackOptions, PackedFont};
use size::GlyphSize;

/// Codepoint of the first glyph in every generated font (space).
pub const FIRST_CODEPOINT: u32 = 0x20;

/// Binarize a font sheet, slice it into glyphs and pack them.
pub fn pack_bitmap(
    mut bitmap: Bitmap,
    size: GlyphSize,
    options: PackOptions,
) -> Result<PackedFont, FontError> {
    if bitmap.binarize() {
        tracing::debug!("inverted bitmap so ink is the minority value");
    }
    let glyphs = segment::segment(&bitmap, size)?;
    Ok(pack::pack(&glyphs, size, options))
}
