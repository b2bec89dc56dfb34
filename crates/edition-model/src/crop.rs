use std::fmt;

use serde::{Deserialize, Serialize};

/// Rectangle selected on a page image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersect with an image of the given size.
    ///
    /// Returns `None` when nothing of the region lies on the image.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Option<Self> {
        if self.x >= image_width || self.y >= image_height {
            return None;
        }
        let width = self.width.min(image_width - self.x);
        let height = self.height.min(image_height - self.y);
        let clamped = Self::new(self.x, self.y, width, height);
        (!clamped.is_empty()).then_some(clamped)
    }
}

impl fmt::Display for CropRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.x, self.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_trims_overhang() {
        let region = CropRegion::new(900, 1200, 400, 400);
        assert_eq!(
            region.clamp_to(1000, 1400),
            Some(CropRegion::new(900, 1200, 100, 200))
        );
    }

    #[test]
    fn clamp_outside_image_is_none() {
        assert_eq!(CropRegion::new(1000, 0, 10, 10).clamp_to(1000, 1400), None);
        assert_eq!(CropRegion::new(0, 0, 0, 10).clamp_to(1000, 1400), None);
    }

    #[test]
    fn displays_geometry() {
        assert_eq!(CropRegion::new(10, 20, 300, 400).to_string(), "300x400+10+20");
    }
}
