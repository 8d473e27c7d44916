//! C source emission for the SSD1306 graphics library.
//!
//! A font is written as a declaration file (`<name>.h`) exposing a single
//! `ssd1306_mono_font_t*` symbol, and a definition file (`<name>.c`) holding
//! the packed bytes, the skip table and the font struct.

use std::path::{Path, PathBuf};

use crate::error::FontError;
use crate::pack::PackedFont;
use crate::skip::SkipTable;
use crate::FIRST_CODEPOINT;

/// Header of the graphics library, included by every declaration file.
pub const GFX_HEADER: &str = "ssd1306_gfx.h";

/// Skip data is stored as `char`, so codepoints must fit in one byte.
pub const MAX_GLYPHS: usize = 0x100 - FIRST_CODEPOINT as usize;

/// How `font_data` lines are laid out in the definition file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DataLayout {
    /// One line per byte offset, listing that byte for every glyph.
    #[default]
    ByteRows,
    /// One line per glyph, listing all of its bytes.
    Glyphs,
}

/// Output locations and symbol name for a generated font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFiles {
    /// Output path without extension.
    pub base: PathBuf,
    pub declaration: PathBuf,
    pub definition: PathBuf,
    pub font_name: String,
}

impl FontFiles {
    /// Derive output paths from `output`, ignoring its extension.
    ///
    /// The symbol name defaults to the base file name.
    pub fn new(output: &Path, font_name: Option<&str>) -> Result<Self, FontError> {
        let base = output.with_extension("");
        let font_name = match font_name {
            Some(name) => name.to_string(),
            None => base
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        if !is_c_identifier(&font_name) {
            return Err(FontError::InvalidName(font_name));
        }

        Ok(Self {
            declaration: with_suffix(&base, ".h"),
            definition: with_suffix(&base, ".c"),
            base,
            font_name,
        })
    }

    /// Declaration file name as referenced by the `#include` directive.
    pub fn declaration_file_name(&self) -> String {
        self.declaration
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Append `suffix` without touching dots already in the file name.
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Printable form of a codepoint for comments.
fn comment_char(codepoint: u32) -> char {
    match char::from_u32(codepoint) {
        Some(c) if c == ' ' || c.is_ascii_graphic() => c,
        _ => '?',
    }
}

fn hex_list(bytes: impl Iterator<Item = u8>) -> String {
    bytes
        .map(|b| format!("0x{b:02x}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the declaration file.
pub fn render_declaration(files: &FontFiles) -> String {
    let lines = [
        format!("#include \"{GFX_HEADER}\""),
        String::new(),
        format!("extern const ssd1306_mono_font_t* {};", files.font_name),
    ];
    format!("{}\n", lines.join("\n"))
}

/// Render the definition file.
pub fn render_definition(
    font: &PackedFont,
    files: &FontFiles,
    layout: DataLayout,
) -> Result<String, FontError> {
    if font.glyph_count == 0 {
        return Err(FontError::Empty);
    }
    if font.glyph_count > MAX_GLYPHS {
        return Err(FontError::TooManyGlyphs {
            count: font.glyph_count,
            max: MAX_GLYPHS,
        });
    }

    // Comments assume the data starts at the space character.
    let rows: Vec<String> = match layout {
        DataLayout::ByteRows => (0..font.bytes_per_character)
            .map(|offset| hex_list(font.byte_row(offset)))
            .collect(),
        DataLayout::Glyphs => (0..font.glyph_count)
            .map(|g| hex_list(font.glyph_bytes(g).iter().copied()))
            .collect(),
    };
    let data_lines = rows
        .iter()
        .enumerate()
        .map(|(i, entries)| data_line(entries, FIRST_CODEPOINT + i as u32));

    let pairs = SkipTable::for_font(font).to_pairs();
    let sentinel = pairs.len() - 1;
    let skip_lines = pairs.iter().enumerate().map(|(i, (first, last))| {
        if i == sentinel {
            format!("\t0x{first:02x}, 0x{last:02x}\t//End")
        } else {
            format!("\t0x{first:02x}, 0x{last:02x},")
        }
    });

    let mut lines = vec![
        format!("#include \"{}\"", files.declaration_file_name()),
        String::new(),
        "const unsigned char font_data [] = {".to_string(),
    ];
    lines.extend(data_lines);
    lines.extend([
        "};".to_string(),
        String::new(),
        "const unsigned char font_skipdata [] = {".to_string(),
    ]);
    lines.extend(skip_lines);
    lines.extend([
        "};".to_string(),
        String::new(),
        "const ssd1306_mono_font_t font_struct = {".to_string(),
        "\t.font_data = font_data,".to_string(),
        "\t.skip_data =\tfont_skipdata,".to_string(),
        String::new(),
        format!("\t.font_rows = {},", font.font_rows),
        format!("\t.font_width = {},", font.font_width),
        format!("\t.bytes_per_character = {}", font.bytes_per_character),
        "};".to_string(),
        String::new(),
        format!(
            "const ssd1306_mono_font_t* {} = &font_struct;",
            files.font_name
        ),
    ]);

    Ok(format!("{}\n", lines.join("\n")))
}

fn data_line(entries: &str, codepoint: u32) -> String {
    format!(
        "\t{entries},\t// 0x{codepoint:02x} ({})",
        comment_char(codepoint)
    )
}

/// Write both files, overwriting existing ones.
///
/// The declaration is written first; if the definition then fails, the
/// declaration is left on disk.
pub fn write_font_files(
    font: &PackedFont,
    files: &FontFiles,
    layout: DataLayout,
) -> Result<(), FontError> {
    let definition = render_definition(font, files, layout)?;

    write_file(&files.declaration, &render_declaration(files))?;
    write_file(&files.definition, &definition)?;

    tracing::debug!(
        declaration = %files.declaration.display(),
        definition = %files.definition.display(),
        "wrote font sources"
    );
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), FontError> {
    std::fs::write(path, contents).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })
}
