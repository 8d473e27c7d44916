use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("invalid font size '{0}', expected WxH with positive integers (e.g. 8x8)")]
    InvalidSize(String),

    #[error("{dimension} {actual} is not a multiple of the glyph {cell} {expected}")]
    Geometry {
        dimension: &'static str,
        actual: u32,
        cell: &'static str,
        expected: u32,
    },

    #[error("font image contains no glyphs")]
    Empty,

    #[error("{count} glyphs exceed the {max} codepoints addressable from 0x20")]
    TooManyGlyphs { count: usize, max: usize },

    #[error("'{0}' is not a valid C identifier")]
    InvalidName(String),

    #[error("writing {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
