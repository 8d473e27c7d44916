use crate::pack::PackedFont;
use crate::FIRST_CODEPOINT;

/// An inclusive range of codepoints present in a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipRange {
    pub first: u32,
    pub last: u32,
}

/// Codepoint ranges covered by a font, in glyph order.
///
/// Serialized as `first, last` pairs followed by a `0, 0` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipTable {
    ranges: Vec<SkipRange>,
}

impl SkipTable {
    /// A single range of `count` codepoints starting at `first`.
    ///
    /// An empty font produces an empty table.
    pub fn contiguous(first: u32, count: u32) -> Self {
        let ranges = if count == 0 {
            Vec::new()
        } else {
            vec![SkipRange {
                first,
                last: first + count - 1,
            }]
        };
        Self { ranges }
    }

    /// The table for a packed font, starting at [`FIRST_CODEPOINT`].
    pub fn for_font(font: &PackedFont) -> Self {
        Self::contiguous(FIRST_CODEPOINT, font.glyph_count as u32)
    }

    pub fn ranges(&self) -> &[SkipRange] {
        &self.ranges
    }

    /// Flattened `first, last` pairs including the trailing `0, 0`.
    pub fn to_pairs(&self) -> Vec<(u32, u32)> {
        self.ranges
            .iter()
            .map(|r| (r.first, r.last))
            .chain(std::iter::once((0, 0)))
            .collect()
    }
}
