//! Geometry of a branded clip.
//!
//! The design is drawn for an 800 px wide canvas and scaled linearly to the
//! final width. Narrow crops are padded out to [`MIN_WIDTH`] so the header and
//! footer text stay legible.

/// Width the band sizes below are designed for.
pub const DESIGN_WIDTH: f32 = 800.0;
/// Narrowest canvas produced.
pub const MIN_WIDTH: u32 = 600;

const HEADER_HEIGHT: f32 = 160.0;
const FOOTER_HEIGHT: f32 = 110.0;
const LOGO_HEIGHT: f32 = 120.0;
const MARGIN: f32 = 20.0;
const DATE_BASELINE_DROP: f32 = 8.0;
const SEPARATOR_THICKNESS: f32 = 2.0;
const SEPARATOR_LIFT: f32 = 10.0;

const DATE_TEXT_SIZE: f32 = 28.0;
const CALL_TO_ACTION_SIZE: f32 = 26.0;
const CREDIT_SIZE: f32 = 18.0;

/// Height of each footer baseline above the canvas bottom, as a fraction of
/// the footer band.
const CALL_TO_ACTION_RISE_FROM_BOTTOM: f32 = 0.6;
const CREDIT_RISE_FROM_BOTTOM: f32 = 0.25;

/// A horizontal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub thickness: u32,
}

/// Positions and sizes for one crop size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandLayout {
    pub scale: f32,
    pub final_width: u32,
    pub final_height: u32,
    pub header_height: u32,
    pub footer_height: u32,
    pub logo_height: u32,
    /// Left edge and baseline of the date label.
    pub date_origin: (f32, f32),
    pub date_size: f32,
    pub separator: Rule,
    /// Top-left corner of the crop on the canvas.
    pub crop_origin: (u32, u32),
    pub footer_top: u32,
    pub call_to_action_baseline: f32,
    pub call_to_action_size: f32,
    pub credit_baseline: f32,
    pub credit_size: f32,
}

fn scaled(base: f32, scale: f32) -> u32 {
    (base * scale).round() as u32
}

impl BrandLayout {
    pub fn for_crop(crop_width: u32, crop_height: u32) -> Self {
        let final_width = crop_width.max(MIN_WIDTH);
        let scale = final_width as f32 / DESIGN_WIDTH;
        let header_height = scaled(HEADER_HEIGHT, scale);
        let footer_height = scaled(FOOTER_HEIGHT, scale);
        let final_height = crop_height + header_height + footer_height;
        let footer_top = header_height + crop_height;

        let thickness = scaled(SEPARATOR_THICKNESS, scale).max(1);
        let inset = scaled(MARGIN, scale);
        let separator = Rule {
            x: inset,
            y: header_height.saturating_sub(scaled(SEPARATOR_LIFT, scale) + thickness),
            width: final_width.saturating_sub(2 * inset),
            thickness,
        };

        let footer_bottom = final_height as f32;
        Self {
            scale,
            final_width,
            final_height,
            header_height,
            footer_height,
            logo_height: scaled(LOGO_HEIGHT, scale),
            date_origin: (
                MARGIN * scale,
                header_height as f32 / 2.0 + DATE_BASELINE_DROP * scale,
            ),
            date_size: DATE_TEXT_SIZE * scale,
            separator,
            crop_origin: ((final_width - crop_width) / 2, header_height),
            footer_top,
            call_to_action_baseline: footer_bottom
                - footer_height as f32 * CALL_TO_ACTION_RISE_FROM_BOTTOM,
            call_to_action_size: CALL_TO_ACTION_SIZE * scale,
            credit_baseline: footer_bottom - footer_height as f32 * CREDIT_RISE_FROM_BOTTOM,
            credit_size: CREDIT_SIZE * scale,
        }
    }

    /// Logo size for a source logo, scaled to `logo_height` with its aspect
    /// ratio kept. Logos too wide for the canvas shrink on both axes.
    pub fn logo_size(&self, logo_width: u32, logo_height: u32) -> (u32, u32) {
        let (logo_width, logo_height) = (logo_width.max(1) as f32, logo_height.max(1) as f32);
        let target_height = self.logo_height.max(1) as f32;
        let factor = (target_height / logo_height).min(self.final_width as f32 / logo_width);
        (
            ((logo_width * factor).round() as u32).max(1),
            ((logo_height * factor).round() as u32).max(1),
        )
    }

    /// Top-left corner that centres an item of `size` in the header band.
    pub fn logo_origin(&self, size: (u32, u32)) -> (u32, u32) {
        (
            self.final_width.saturating_sub(size.0) / 2,
            self.header_height.saturating_sub(size.1) / 2,
        )
    }
}
