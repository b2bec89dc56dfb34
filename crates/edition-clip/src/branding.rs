//! Static branding assets stamped onto every clip.

use std::fmt;

use image::{Rgba, RgbaImage};

use crate::error::{ClipError, Result};

pub const DEFAULT_CALL_TO_ACTION: &str = "Read the full edition at Tom City Edition";
pub const DEFAULT_CREDIT: &str = "Clipped from the Tom City Edition archive";

/// Date label and separator colour.
pub const DEFAULT_ACCENT: Rgba<u8> = Rgba([0xc4, 0x16, 0x1c, 0xff]);
pub const FOOTER_COLOR: Rgba<u8> = Rgba([0x1b, 0x1b, 0x1b, 0xff]);
pub const FOOTER_INK: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Parse `#rrggbb` (the `#` is optional) into an opaque colour.
pub fn parse_hex_color(text: &str) -> Result<Rgba<u8>> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ClipError::InvalidColor(text.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ClipError::InvalidColor(text.to_string()))
    };
    Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 0xff]))
}

#[derive(Clone)]
pub struct Branding {
    logo: RgbaImage,
    call_to_action: String,
    credit: String,
    accent: Rgba<u8>,
}

impl Branding {
    /// Branding with the default footer lines and accent.
    ///
    /// # Errors
    ///
    /// [`ClipError::EmptyLogo`] when the logo has no pixels.
    pub fn new(logo: RgbaImage) -> Result<Self> {
        if logo.width() == 0 || logo.height() == 0 {
            return Err(ClipError::EmptyLogo);
        }
        Ok(Self {
            logo,
            call_to_action: DEFAULT_CALL_TO_ACTION.to_string(),
            credit: DEFAULT_CREDIT.to_string(),
            accent: DEFAULT_ACCENT,
        })
    }

    #[must_use]
    pub fn with_call_to_action(mut self, text: impl Into<String>) -> Self {
        self.call_to_action = text.into();
        self
    }

    #[must_use]
    pub fn with_credit(mut self, text: impl Into<String>) -> Self {
        self.credit = text.into();
        self
    }

    #[must_use]
    pub fn with_accent(mut self, accent: Rgba<u8>) -> Self {
        self.accent = accent;
        self
    }

    pub fn logo(&self) -> &RgbaImage {
        &self.logo
    }

    pub fn call_to_action(&self) -> &str {
        &self.call_to_action
    }

    pub fn credit(&self) -> &str {
        &self.credit
    }

    pub fn accent(&self) -> Rgba<u8> {
        self.accent
    }
}

impl fmt::Debug for Branding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branding")
            .field("logo", &self.logo.dimensions())
            .field("call_to_action", &self.call_to_action)
            .field("credit", &self.credit)
            .field("accent", &self.accent)
            .finish()
    }
}
