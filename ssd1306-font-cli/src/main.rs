use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ssd1306_font::emit::{self, DataLayout, FontFiles};
use ssd1306_font::pack::PackOptions;
use ssd1306_font::size::GlyphSize;

mod acquire;

/// Bitmap font converter: turn a monospaced font sheet into SSD1306 C sources
#[derive(Parser)]
#[command(name = "ssd1306-font", version)]
struct Args {
    /// Size in WxH of each glyph (e.g. 8x8)
    font_size: GlyphSize,

    /// Path or URL to the image to be converted to font
    url_or_path: String,

    /// Output path; the extension is replaced by .h and .c
    /// [default: input file name, written to the current directory]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// C symbol name for the font [default: output file name]
    #[arg(short, long)]
    name: Option<String>,

    /// Layout of the font_data lines
    #[arg(long, value_enum, default_value_t = DataLayout::ByteRows)]
    layout: DataLayout,

    /// Suppress the summary of written files
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let bitmap = acquire::load_bitmap(&args.url_or_path)
        .with_context(|| format!("failed to load font image: {}", args.url_or_path))?;
    let (width, height) = (bitmap.width, bitmap.height);

    let font = ssd1306_font::pack_bitmap(bitmap, args.font_size, PackOptions::default())
        .with_context(|| {
            format!(
                "cannot slice a {width}x{height} image into {} glyphs",
                args.font_size
            )
        })?;
    tracing::info!(
        "packed {} glyphs of {} ({} bytes each)",
        font.glyph_count,
        args.font_size,
        font.bytes_per_character
    );

    let output = args
        .output
        .unwrap_or_else(|| acquire::default_output(&args.url_or_path));
    let files = FontFiles::new(&output, args.name.as_deref())
        .context("invalid font symbol name, use --name to set one")?;

    emit::write_font_files(&font, &files, args.layout)?;

    if !args.quiet {
        println!("wrote {}", files.declaration.display());
        println!("wrote {}", files.definition.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_arguments_in_order() {
        let args = Args::try_parse_from(["ssd1306-font", "6x8", "fonts/font6x8.png"]).unwrap();
        assert_eq!(args.font_size, GlyphSize { width: 6, height: 8 });
        assert_eq!(args.url_or_path, "fonts/font6x8.png");
        assert!(args.output.is_none());
        assert_eq!(args.layout, DataLayout::ByteRows);
    }

    #[test]
    fn parses_options() {
        let args = Args::try_parse_from([
            "ssd1306-font",
            "8X16",
            "https://example.com/f.png",
            "-o",
            "out/big",
            "--name",
            "font_big",
            "--layout",
            "glyphs",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.font_size, GlyphSize { width: 8, height: 16 });
        assert_eq!(args.output, Some(PathBuf::from("out/big")));
        assert_eq!(args.name.as_deref(), Some("font_big"));
        assert_eq!(args.layout, DataLayout::Glyphs);
        assert!(args.quiet);
    }

    #[test]
    fn layout_accepts_kebab_case_names() {
        let args =
            Args::try_parse_from(["ssd1306-font", "8x8", "f.png", "--layout", "byte-rows"]).unwrap();
        assert_eq!(args.layout, DataLayout::ByteRows);
        assert!(Args::try_parse_from(["ssd1306-font", "8x8", "f.png", "--layout", "rows"]).is_err());
    }

    #[test]
    fn rejects_bad_font_size() {
        assert!(Args::try_parse_from(["ssd1306-font", "8by8", "f.png"]).is_err());
    }
}
