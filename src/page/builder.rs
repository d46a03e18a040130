// image crate: ファイル -> RGB8、flate2: ピクセル列 -> zlibストリーム

use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbImage;

use crate::error::{PdfBindError, Result};
use crate::page::{IMAGE_RESOURCE, PageFragment};

/// Decode an image file into RGB8 pixels.
///
/// The format is sniffed from file content rather than trusted from the
/// extension. Alpha channels are dropped and paletted or grayscale pixels
/// expand to three samples, so everything downstream handles plain RGB.
pub fn decode_image(path: &Path) -> Result<RgbImage> {
    let reader = image::ImageReader::open(path)
        .map_err(|e| PdfBindError::decode(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| PdfBindError::decode(format!("{}: {}", path.display(), e)))?;
    let decoded = reader
        .decode()
        .map_err(|e| PdfBindError::decode(format!("{}: {}", path.display(), e)))?;

    let rgb = decoded.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(PdfBindError::decode(format!(
            "{}: image has zero width or height",
            path.display()
        )));
    }
    Ok(rgb)
}

/// Build one page fragment from decoded pixels.
///
/// The page is sized in points to match the image pixel for pixel, and the
/// pixel stream is deflated so the writer can embed it as-is.
///
/// # Arguments
/// * `index`             - Zero-based position of the page in the document
/// * `image`             - Decoded RGB pixels
/// * `compression_level` - zlib level (0 = store, 9 = best)
pub fn build_page(index: usize, image: RgbImage, compression_level: u32) -> Result<PageFragment> {
    if !(0..=9).contains(&compression_level) {
        return Err(PdfBindError::page_build(format!(
            "zlib compression level must be 0-9, got {}",
            compression_level
        )));
    }

    let (width, height) = image.dimensions();
    let image_data = compress_samples(image.as_raw(), compression_level)?;

    Ok(PageFragment {
        index,
        width,
        height,
        image_data,
        content_ops: paint_ops(width, height),
    })
}

fn compress_samples(samples: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder
        .write_all(samples)
        .map_err(|e| PdfBindError::page_build(format!("compressing image samples: {e}")))?;
    encoder
        .finish()
        .map_err(|e| PdfBindError::page_build(format!("compressing image samples: {e}")))
}

/// Content stream that scales the unit image square to the full page and
/// paints the sole image resource.
fn paint_ops(width: u32, height: u32) -> Vec<u8> {
    format!("q {width} 0 0 {height} 0 0 cm /{IMAGE_RESOURCE} Do Q").into_bytes()
}
