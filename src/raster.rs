//! Logo rasterization
//!
//! Converts a logo image into the packed 1-bit bitmap the raster block
//! command carries. A failed load is non-fatal: the rest of the print
//! job renders without the logo.

use image::DynamicImage;
use tracing::{info, instrument, warn};

/// Packed monochrome bitmap, 8 horizontal pixels per byte, MSB first
///
/// Rows are padded to whole bytes (`row_bytes = ceil(width / 8)`) and
/// stored top to bottom. Pad bits stay 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonoBitmap {
    pub width: u32,
    pub height: u32,
    pub row_bytes: u32,
    pub data: Vec<u8>,
}

impl MonoBitmap {
    /// The "no image" value used when an optional asset is unavailable
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Rasterize an image to a 1-bit bitmap at `target_width` dots
///
/// Height preserves the source aspect ratio. A pixel is ink when its
/// luminance (0.299 R + 0.587 G + 0.114 B) is below 128; transparent
/// pixels (alpha < 128) count as blank.
pub fn rasterize(img: &DynamicImage, target_width: u32) -> MonoBitmap {
    use image::GenericImageView;

    let (src_w, src_h) = img.dimensions();
    if src_w == 0 || src_h == 0 || target_width == 0 {
        return MonoBitmap::empty();
    }

    let height = ((src_h as f64 * target_width as f64 / src_w as f64).round() as u32).max(1);
    let resized = if (target_width, height) == (src_w, src_h) {
        img.clone()
    } else {
        img.resize_exact(target_width, height, image::imageops::FilterType::Nearest)
    };
    let rgba = resized.to_rgba8();

    let row_bytes = target_width.div_ceil(8);
    let mut data = Vec::with_capacity((row_bytes * height) as usize);

    for y in 0..height {
        for x_byte in 0..row_bytes {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = x_byte * 8 + bit;
                if x >= target_width {
                    break;
                }
                let pixel = rgba.get_pixel(x, y);
                if pixel[3] < 128 {
                    continue;
                }
                let luma = 0.299 * pixel[0] as f32
                    + 0.587 * pixel[1] as f32
                    + 0.114 * pixel[2] as f32;
                if luma < 128.0 {
                    byte |= 1 << (7 - bit);
                }
            }
            data.push(byte);
        }
    }

    MonoBitmap {
        width: target_width,
        height,
        row_bytes,
        data,
    }
}

/// Load and rasterize the logo referenced by the settings
///
/// The one suspension point of an encode. Any failure (missing file,
/// undecodable image) logs a warning and yields the empty bitmap.
#[instrument]
pub async fn load_logo(path: &str, target_width: u32) -> MonoBitmap {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, path, "logo read failed, printing without logo");
            return MonoBitmap::empty();
        }
    };

    match image::load_from_memory(&bytes) {
        Ok(img) => {
            use image::GenericImageView;
            info!(dimensions = ?img.dimensions(), "logo image decoded");
            rasterize(&img, target_width)
        }
        Err(e) => {
            warn!(error = %e, path, "logo decode failed, printing without logo");
            MonoBitmap::empty()
        }
    }
}
