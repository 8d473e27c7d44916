//! Bit-plane packing of glyphs into SSD1306 page bytes.
//!
//! Each glyph is padded to a multiple of 8 rows and split into 8-row bands.
//! Every column of a band becomes one byte with the band's top row in bit 0.
//! Bytes are stored band by band, columns ascending within a band.

use crate::segment::Glyph;
use crate::size::GlyphSize;

/// Packing configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackOptions {
    /// Reverse the byte order and the bit order of every glyph.
    ///
    /// For single-band glyphs this rotates the glyph by 180 degrees.
    pub mirror: bool,
}

/// A packed font, ready for source emission.
///
/// The byte matrix is logically shaped `(bytes_per_character, glyph_count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFont {
    pub glyph_size: GlyphSize,
    pub font_rows: u32,
    pub font_width: u32,
    pub bytes_per_character: usize,
    pub glyph_count: usize,
    /// Glyph-major storage: glyph `g` occupies
    /// `data[g * bytes_per_character..(g + 1) * bytes_per_character]`.
    data: Vec<u8>,
}

impl PackedFont {
    /// Byte at `offset` within glyph `glyph`.
    #[inline]
    pub fn byte(&self, offset: usize, glyph: usize) -> u8 {
        self.data[glyph * self.bytes_per_character + offset]
    }

    /// All bytes of one glyph.
    pub fn glyph_bytes(&self, glyph: usize) -> &[u8] {
        let start = glyph * self.bytes_per_character;
        &self.data[start..start + self.bytes_per_character]
    }

    /// Byte `offset` of every glyph, in glyph order.
    pub fn byte_row(&self, offset: usize) -> impl Iterator<Item = u8> + '_ {
        (0..self.glyph_count).map(move |g| self.byte(offset, g))
    }

    /// Reconstruct a glyph from its packed bytes.
    ///
    /// The result is `font_rows * 8` rows tall, including padding rows.
    /// Only meaningful for fonts packed without mirroring.
    pub fn unpack_glyph(&self, glyph: usize) -> Glyph {
        let width = self.font_width;
        let mut out = Glyph::new(width, self.font_rows * 8);
        let bytes = self.glyph_bytes(glyph);
        for band in 0..self.font_rows {
            for col in 0..width {
                let b = bytes[(band * width + col) as usize];
                for bit in 0..8 {
                    out.set(col, band * 8 + bit, (b >> bit) & 1);
                }
            }
        }
        out
    }
}

/// Pack a glyph sequence.
///
/// Every glyph must be `size.width` by `size.height` pixels.
pub fn pack(glyphs: &[Glyph], size: GlyphSize, options: PackOptions) -> PackedFont {
    let font_rows = size.font_rows();
    let bpc = size.bytes_per_character();
    let mut data = Vec::with_capacity(bpc * glyphs.len());

    for glyph in glyphs {
        assert_eq!((glyph.width, glyph.height), (size.width, size.height));
        let start = data.len();
        for band in 0..font_rows {
            for col in 0..size.width {
                let mut byte = 0u8;
                for bit in 0..8 {
                    // Rows past the glyph height are padding.
                    let row = band * 8 + bit;
                    if row < size.height && glyph.pixel(col, row) != 0 {
                        byte |= 1 << bit;
                    }
                }
                data.push(byte);
            }
        }
        if options.mirror {
            let packed = &mut data[start..];
            packed.reverse();
            for b in packed.iter_mut() {
                *b = b.reverse_bits();
            }
        }
    }

    tracing::debug!(
        glyphs = glyphs.len(),
        bytes_per_character = bpc,
        font_rows,
        mirror = options.mirror,
        "packed font"
    );

    PackedFont {
        glyph_size: size,
        font_rows,
        font_width: size.width,
        bytes_per_character: bpc,
        glyph_count: glyphs.len(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u32, h: u32) -> GlyphSize {
        GlyphSize::new(w, h).unwrap()
    }

    /// Deterministic pseudo-random glyph pattern.
    fn pattern_glyph(w: u32, h: u32, seed: u32) -> Glyph {
        let mut g = Glyph::new(w, h);
        let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
        for y in 0..h {
            for x in 0..w {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                g.set(x, y, (state & 1) as u8);
            }
        }
        g
    }

    #[test]
    fn top_row_sets_bit_zero() {
        let mut g = Glyph::new(8, 8);
        for x in 0..8 {
            g.set(x, 0, 1);
        }
        let font = pack(&[g], size(8, 8), PackOptions::default());
        assert_eq!(font.glyph_bytes(0), &[0x01; 8]);
    }

    #[test]
    fn bottom_row_sets_bit_seven() {
        let mut g = Glyph::new(3, 8);
        g.set(1, 7, 1);
        let font = pack(&[g], size(3, 8), PackOptions::default());
        assert_eq!(font.glyph_bytes(0), &[0x00, 0x80, 0x00]);
    }

    #[test]
    fn vertical_stripe_fills_byte() {
        let mut g = Glyph::new(2, 8);
        for y in 0..8 {
            g.set(0, y, 1);
        }
        let font = pack(&[g], size(2, 8), PackOptions::default());
        assert_eq!(font.glyph_bytes(0), &[0xff, 0x00]);
    }

    #[test]
    fn bands_are_concatenated_in_order() {
        // 2x12 glyph: row 0 and row 8 set in column 1.
        let mut g = Glyph::new(2, 12);
        g.set(1, 0, 1);
        g.set(0, 8, 1);
        g.set(0, 11, 1);
        let font = pack(&[g], size(2, 12), PackOptions::default());
        assert_eq!(font.font_rows, 2);
        assert_eq!(font.bytes_per_character, 4);
        // band 0: col0, col1; band 1: col0, col1
        assert_eq!(font.glyph_bytes(0), &[0x00, 0x01, 0x09, 0x00]);
    }

    #[test]
    fn bytes_per_character_ignores_content() {
        for (w, h) in [(8, 8), (5, 7), (6, 12), (12, 16), (16, 17), (1, 1)] {
            let glyphs: Vec<Glyph> = (0..3).map(|s| pattern_glyph(w, h, s)).collect();
            let font = pack(&glyphs, size(w, h), PackOptions::default());
            assert_eq!(font.bytes_per_character, (w * h.div_ceil(8)) as usize);
            assert_eq!(font.glyph_count, 3);
            assert_eq!(font.font_width, w);
        }
    }

    #[test]
    fn unpack_reproduces_padded_glyph() {
        for (w, h) in [(8, 8), (5, 7), (6, 12), (16, 17)] {
            let glyphs: Vec<Glyph> = (0..4).map(|s| pattern_glyph(w, h, s + 7)).collect();
            let font = pack(&glyphs, size(w, h), PackOptions::default());
            for (i, original) in glyphs.iter().enumerate() {
                let restored = font.unpack_glyph(i);
                assert_eq!(restored.height, font.font_rows * 8);
                for y in 0..restored.height {
                    for x in 0..w {
                        let expected = if y < h { original.pixel(x, y) } else { 0 };
                        assert_eq!(restored.pixel(x, y), expected, "{w}x{h} glyph {i} ({x},{y})");
                    }
                }
            }
        }
    }

    #[test]
    fn packing_is_deterministic() {
        let glyphs: Vec<Glyph> = (0..5).map(|s| pattern_glyph(6, 10, s)).collect();
        let a = pack(&glyphs, size(6, 10), PackOptions::default());
        let b = pack(&glyphs, size(6, 10), PackOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn mirror_reverses_bytes_and_bits() {
        let glyphs: Vec<Glyph> = (0..3).map(|s| pattern_glyph(6, 12, s)).collect();
        let plain = pack(&glyphs, size(6, 12), PackOptions::default());
        let mirrored = pack(&glyphs, size(6, 12), PackOptions { mirror: true });
        for g in 0..3 {
            let expected: Vec<u8> = plain
                .glyph_bytes(g)
                .iter()
                .rev()
                .map(|b| b.reverse_bits())
                .collect();
            assert_eq!(mirrored.glyph_bytes(g), expected.as_slice());
        }
    }

    #[test]
    fn mirror_rotates_single_band_glyph() {
        let mut g = Glyph::new(4, 8);
        g.set(0, 0, 1);
        let font = pack(&[g], size(4, 8), PackOptions { mirror: true });
        let restored = font.unpack_glyph(0);
        assert_eq!(restored.pixel(3, 7), 1);
        assert_eq!(restored.pixels.iter().filter(|&&p| p == 1).count(), 1);
    }

    #[test]
    fn byte_row_spans_glyphs() {
        let mut a = Glyph::new(2, 8);
        a.set(1, 1, 1);
        let mut b = Glyph::new(2, 8);
        b.set(1, 2, 1);
        let font = pack(&[a, b], size(2, 8), PackOptions::default());
        assert_eq!(font.byte_row(0).collect::<Vec<_>>(), vec![0, 0]);
        assert_eq!(font.byte_row(1).collect::<Vec<_>>(), vec![0x02, 0x04]);
        assert_eq!(font.byte(1, 1), 0x04);
    }

    #[test]
    fn empty_sequence_packs_to_nothing() {
        let font = pack(&[], size(8, 8), PackOptions::default());
        assert_eq!(font.glyph_count, 0);
        assert_eq!(font.bytes_per_character, 8);
    }
}
