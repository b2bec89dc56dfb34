//! Text measurement and rasterisation.

use image::{Rgba, RgbaImage};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::shape::ShapeContext;
use swash::zeno::{Format, Vector};
use swash::{CacheKey, FontRef};

use crate::error::{ClipError, Result};

pub const WEIGHT_REGULAR: f32 = 400.0;
pub const WEIGHT_BOLD: f32 = 700.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    /// Applied through the `wght` axis on variable fonts.
    pub weight: f32,
    pub color: Rgba<u8>,
}

/// Draws single lines of text onto a canvas.
pub trait TextPainter {
    /// Advance width of `text` in pixels.
    fn measure(&mut self, text: &str, style: TextStyle) -> f32;

    /// Draw `text` with its left edge at `x` and its baseline at `baseline`.
    fn draw(&mut self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, style: TextStyle);
}

/// [`TextPainter`] backed by swash shaping and scaling.
pub struct SwashPainter {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    scale_context: ScaleContext,
    shape_context: ShapeContext,
}

impl SwashPainter {
    /// Load the first face of a TrueType/OpenType font file.
    ///
    /// # Errors
    ///
    /// [`ClipError::InvalidFont`] when the bytes are not a font.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let font = FontRef::from_index(&data, 0).ok_or(ClipError::InvalidFont)?;
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            offset,
            key,
            scale_context: ScaleContext::new(),
            shape_context: ShapeContext::new(),
        })
    }
}

impl TextPainter for SwashPainter {
    fn measure(&mut self, text: &str, style: TextStyle) -> f32 {
        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let mut shaper = self
            .shape_context
            .builder(font)
            .size(style.size)
            .variations(&[("wght", style.weight)])
            .build();
        shaper.add_str(text);

        let mut width = 0.0;
        shaper.shape_with(|cluster| {
            width += cluster.glyphs.iter().map(|glyph| glyph.advance).sum::<f32>();
        });
        width
    }

    fn draw(&mut self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, style: TextStyle) {
        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let mut shaper = self
            .shape_context
            .builder(font)
            .size(style.size)
            .variations(&[("wght", style.weight)])
            .build();
        shaper.add_str(text);
        let mut scaler = self
            .scale_context
            .builder(font)
            .size(style.size)
            .variations(&[("wght", style.weight)])
            .build();

        let mut pen_x = x;
        shaper.shape_with(|cluster| {
            for glyph in cluster.glyphs {
                let rendered = Render::new(&[
                    Source::ColorOutline(0),
                    Source::ColorBitmap(StrikeWith::BestFit),
                    Source::Outline,
                ])
                .format(Format::Alpha)
                .offset(Vector::new(glyph.x, glyph.y))
                .render(&mut scaler, glyph.id);

                if let Some(mask) = rendered {
                    let left = (pen_x + mask.placement.left as f32) as i32;
                    let top = (baseline - mask.placement.top as f32) as i32;
                    blend_mask(
                        canvas,
                        &mask.data,
                        (left, top),
                        (mask.placement.width, mask.placement.height),
                        style.color,
                    );
                }
                pen_x += glyph.advance;
            }
        });
    }
}

/// Alpha-blend an 8-bit coverage mask in `color` onto an opaque canvas.
fn blend_mask(
    canvas: &mut RgbaImage,
    mask: &[u8],
    origin: (i32, i32),
    size: (u32, u32),
    color: Rgba<u8>,
) {
    let (width, height) = size;
    for py in 0..height {
        for px in 0..width {
            let Some(&coverage) = mask.get((py * width + px) as usize) else {
                return;
            };
            if coverage == 0 {
                continue;
            }
            let dest_x = origin.0 + px as i32;
            let dest_y = origin.1 + py as i32;
            if dest_x < 0 || dest_y < 0 {
                continue;
            }
            let (dest_x, dest_y) = (dest_x as u32, dest_y as u32);
            if dest_x >= canvas.width() || dest_y >= canvas.height() {
                continue;
            }
            let dest = canvas.get_pixel_mut(dest_x, dest_y);
            let a = f32::from(coverage) / 255.0;
            for channel in 0..3 {
                dest[channel] =
                    (f32::from(color[channel]) * a + f32::from(dest[channel]) * (1.0 - a)) as u8;
            }
            dest[3] = 255;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_font_bytes() {
        assert!(matches!(
            SwashPainter::new(b"definitely not a font".to_vec()),
            Err(ClipError::InvalidFont)
        ));
    }

    #[test]
    fn mask_blends_and_clips_to_canvas() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let mask = [255, 0, 128, 255];
        blend_mask(&mut canvas, &mask, (3, 2), (2, 2), Rgba([0, 0, 0, 255]));

        assert_eq!(canvas.get_pixel(3, 2), &Rgba([0, 0, 0, 255]));
        let half = canvas.get_pixel(3, 3);
        assert!((126..=128).contains(&half[0]), "{half:?}");
        assert_eq!(half[3], 255);
        assert_eq!(canvas.get_pixel(2, 2), &Rgba([255, 255, 255, 255]));
    }
}
