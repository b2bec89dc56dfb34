//! Social-card cover preview for an edition.
//!
//! The masthead area at the top of page 1 is cut to the 1.91:1 link-preview
//! ratio, scaled to 1200x630 and stored as a JPEG small enough for link
//! unfurlers.

use edition_model::CropRegion;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use tracing::{debug, warn};

use crate::error::{ClipError, Result};

pub const COVER_WIDTH: u32 = 1200;
pub const COVER_HEIGHT: u32 = 630;
pub const COVER_ASPECT: f64 = 1.91;
/// Size ceiling for the encoded preview.
pub const MAX_COVER_BYTES: usize = 200 * 1024;

const START_QUALITY: u8 = 95;
const MIN_QUALITY: u8 = 15;
const QUALITY_STEP: u8 = 5;

/// An encoded cover preview.
#[derive(Debug, Clone)]
pub struct CoverPreview {
    pub jpeg: Vec<u8>,
    pub quality: u8,
}

impl CoverPreview {
    pub fn within_budget(&self) -> bool {
        self.jpeg.len() <= MAX_COVER_BYTES
    }
}

/// Full-width band at the top of the page with the cover aspect ratio.
///
/// Pages shorter than that band are used whole.
pub fn cover_region(page_width: u32, page_height: u32) -> CropRegion {
    let height = (f64::from(page_width) / COVER_ASPECT).floor() as u32;
    CropRegion::new(0, 0, page_width, height.min(page_height))
}

/// Cut, scale and encode the cover of `page`.
///
/// # Errors
///
/// [`ClipError::EmptyPage`] for a zero-sized page, or an encoding failure.
pub fn render_cover(page: &RgbaImage) -> Result<CoverPreview> {
    let region = cover_region(page.width(), page.height());
    if region.is_empty() {
        return Err(ClipError::EmptyPage);
    }
    debug!(%region, "cutting cover");
    let band = imageops::crop_imm(page, region.x, region.y, region.width, region.height).to_image();
    let cover = imageops::resize(&band, COVER_WIDTH, COVER_HEIGHT, FilterType::Lanczos3);
    encode_within_budget(&cover)
}

/// JPEG-encode at falling quality until the result fits [`MAX_COVER_BYTES`].
///
/// The last attempt is returned even when it is still too large.
pub fn encode_within_budget(image: &RgbaImage) -> Result<CoverPreview> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut quality = START_QUALITY;
    loop {
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality).encode_image(&rgb)?;
        let preview = CoverPreview { jpeg, quality };
        if preview.within_budget() {
            debug!(quality, bytes = preview.jpeg.len(), "cover encoded");
            return Ok(preview);
        }
        if quality <= MIN_QUALITY {
            warn!(
                quality,
                bytes = preview.jpeg.len(),
                limit = MAX_COVER_BYTES,
                "cover still over size limit at lowest quality"
            );
            return Ok(preview);
        }
        quality = quality.saturating_sub(QUALITY_STEP).max(MIN_QUALITY);
    }
}
