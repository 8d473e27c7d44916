//! Image acquisition: read or download a font sheet and decode it.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use reqwest::StatusCode;
use ssd1306_font::bitmap::Bitmap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("could not download {url}: HTTP status {status}")]
    FetchStatus { url: String, status: StatusCode },

    #[error("could not download {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding image from {origin}")]
    Decode {
        origin: String,
        #[source]
        source: image::ImageError,
    },
}

/// Whether the locator names a remote image.
pub fn is_remote(url_or_path: &str) -> bool {
    url_or_path.starts_with("http")
}

/// Load a font sheet from a local path or an `http(s)` URL.
pub fn load_bitmap(url_or_path: &str) -> Result<Bitmap, AcquireError> {
    let bytes = if is_remote(url_or_path) {
        tracing::debug!(url = url_or_path, "downloading font image");
        fetch(url_or_path)?
    } else {
        tracing::debug!(path = url_or_path, "reading font image");
        std::fs::read(url_or_path).map_err(|source| AcquireError::Read {
            path: PathBuf::from(url_or_path),
            source,
        })?
    };

    let img = image::load_from_memory(&bytes).map_err(|source| AcquireError::Decode {
        origin: url_or_path.to_string(),
        source,
    })?;
    tracing::info!(
        "loaded {} ({}x{}, {} bytes)",
        url_or_path,
        img.width(),
        img.height(),
        bytes.len()
    );

    Ok(bitmap_from_image(&img))
}

/// Single blocking GET; anything but 200 is a failure.
fn fetch(url: &str) -> Result<Vec<u8>, AcquireError> {
    let fetch_err = |source: reqwest::Error| AcquireError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url).map_err(fetch_err)?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(AcquireError::FetchStatus {
            url: url.to_string(),
            status,
        });
    }
    Ok(response.bytes().map_err(fetch_err)?.to_vec())
}

/// Threshold a decoded image. Fully transparent pixels count as dark.
pub fn bitmap_from_image(img: &DynamicImage) -> Bitmap {
    let la = img.to_luma_alpha8();
    let (width, height) = la.dimensions();
    let luma: Vec<u8> = la
        .pixels()
        .map(|p| if p.0[1] == 0 { 0 } else { p.0[0] })
        .collect();
    Bitmap::from_luma(width, height, &luma)
}

/// Default output path: the locator's file name, in the current directory.
///
/// The extension is kept; [`FontFiles::new`] replaces it.
///
/// [`FontFiles::new`]: ssd1306_font::emit::FontFiles::new
pub fn default_output(url_or_path: &str) -> PathBuf {
    let name = if is_remote(url_or_path) {
        let without_query = url_or_path
            .split(['?', '#'])
            .next()
            .unwrap_or(url_or_path);
        without_query.rsplit('/').next().unwrap_or(without_query)
    } else {
        url_or_path
    };

    Path::new(name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("font"))
}
