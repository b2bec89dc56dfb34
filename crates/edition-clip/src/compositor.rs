//! Branded clip compositing.
//!
//! A clip is laid out in three bands:
//!
//! ```text
//! +----------------------------------+
//! | [date]        LOGO               |  header
//! | -------------------------------- |
//! +----------------------------------+
//! |          cropped region          |  body
//! +----------------------------------+
//! |       call to action line        |  footer (dark)
//! |           credit line            |
//! +----------------------------------+
//! ```
//!
//! See [`BrandLayout`] for the geometry.

use std::io::Cursor;

use edition_model::DateKey;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::branding::{Branding, FOOTER_COLOR, FOOTER_INK};
use crate::error::{ClipError, Result};
use crate::layout::BrandLayout;
use crate::text::{TextPainter, TextStyle, WEIGHT_BOLD, WEIGHT_REGULAR};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A finished clip. Built fresh for every share or download.
#[derive(Clone)]
pub struct BrandedImage {
    date: DateKey,
    image: RgbaImage,
}

impl BrandedImage {
    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

impl std::fmt::Debug for BrandedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandedImage")
            .field("date", &self.date)
            .field("dimensions", &self.image.dimensions())
            .finish()
    }
}

pub struct Compositor<P> {
    branding: Branding,
    painter: P,
}

impl<P: TextPainter> Compositor<P> {
    pub fn new(branding: Branding, painter: P) -> Self {
        Self { branding, painter }
    }

    /// Wrap `crop` in the header and footer bands for edition `date`.
    ///
    /// The crop is only read.
    ///
    /// # Errors
    ///
    /// [`ClipError::NoCropSelected`] when `crop` is missing or has no pixels.
    pub fn compose(&mut self, crop: Option<&RgbaImage>, date: DateKey) -> Result<BrandedImage> {
        let crop = crop
            .filter(|crop| crop.width() > 0 && crop.height() > 0)
            .ok_or(ClipError::NoCropSelected)?;
        let layout = BrandLayout::for_crop(crop.width(), crop.height());
        debug!(
            %date,
            crop = ?crop.dimensions(),
            width = layout.final_width,
            height = layout.final_height,
            "composing clip"
        );

        let mut canvas =
            RgbaImage::from_pixel(layout.final_width, layout.final_height, BACKGROUND);

        self.draw_header(&mut canvas, &layout, date);

        let (crop_x, crop_y) = layout.crop_origin;
        imageops::overlay(&mut canvas, crop, i64::from(crop_x), i64::from(crop_y));

        self.draw_footer(&mut canvas, &layout);

        Ok(BrandedImage {
            date,
            image: canvas,
        })
    }

    fn draw_header(&mut self, canvas: &mut RgbaImage, layout: &BrandLayout, date: DateKey) {
        let logo = self.branding.logo();
        let size = layout.logo_size(logo.width(), logo.height());
        let logo = imageops::resize(logo, size.0, size.1, FilterType::Lanczos3);
        let (logo_x, logo_y) = layout.logo_origin(size);
        imageops::overlay(canvas, &logo, i64::from(logo_x), i64::from(logo_y));

        let accent = self.branding.accent();
        let (date_x, date_baseline) = layout.date_origin;
        self.painter.draw(
            canvas,
            &date.to_string(),
            date_x,
            date_baseline,
            TextStyle {
                size: layout.date_size,
                weight: WEIGHT_BOLD,
                color: accent,
            },
        );

        let rule = layout.separator;
        draw_filled_rect_mut(
            canvas,
            Rect::at(rule.x as i32, rule.y as i32).of_size(rule.width.max(1), rule.thickness),
            accent,
        );
    }

    fn draw_footer(&mut self, canvas: &mut RgbaImage, layout: &BrandLayout) {
        draw_filled_rect_mut(
            canvas,
            Rect::at(0, layout.footer_top as i32).of_size(layout.final_width, layout.footer_height),
            FOOTER_COLOR,
        );

        let call_to_action = TextStyle {
            size: layout.call_to_action_size,
            weight: WEIGHT_BOLD,
            color: FOOTER_INK,
        };
        let credit = TextStyle {
            size: layout.credit_size,
            weight: WEIGHT_REGULAR,
            color: FOOTER_INK,
        };
        let lines = [
            (
                self.branding.call_to_action(),
                layout.call_to_action_baseline,
                call_to_action,
            ),
            (self.branding.credit(), layout.credit_baseline, credit),
        ];
        for (text, baseline, style) in lines {
            let width = self.painter.measure(text, style);
            let x = ((layout.final_width as f32 - width) / 2.0).max(0.0);
            self.painter.draw(canvas, text, x, baseline, style);
        }
    }
}
