//! Crop tool capability and the single live clipper instance.
//!
//! Region selection is interactive and lives outside the viewer. The viewer
//! only needs to start a crop on the current page image, read back the
//! selected region and its raster, and tear the tool down again. At most one
//! crop tool exists at a time: [`ClipperSlot::open`] disposes the previous
//! handle before asking the capability for a new one.

use std::fmt;
use std::sync::Arc;

use edition_model::CropRegion;
use image::{RgbaImage, imageops};
use tracing::debug;

/// Starts crop tools on page images.
pub trait CropCapability {
    type Handle: CropHandle;

    fn begin_crop(&mut self, page: Arc<RgbaImage>) -> Self::Handle;
}

/// A live crop tool.
pub trait CropHandle {
    /// The selected region, if the user has completed a selection.
    fn current_region(&self) -> Option<CropRegion>;

    /// Raster of the selected region.
    fn output(&self) -> Option<RgbaImage>;

    /// Tear down the tool.
    fn dispose(self);
}

/// Holds the one live crop handle.
#[derive(Debug)]
pub struct ClipperSlot<H> {
    active: Option<H>,
}

impl<H> Default for ClipperSlot<H> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<H: CropHandle> ClipperSlot<H> {
    /// Open a crop tool on `page`, tearing down any existing one first.
    pub fn open<C>(&mut self, capability: &mut C, page: Arc<RgbaImage>) -> &H
    where
        C: CropCapability<Handle = H>,
    {
        self.close();
        self.active.insert(capability.begin_crop(page))
    }

    pub fn close(&mut self) {
        if let Some(handle) = self.active.take() {
            debug!("disposing crop tool");
            handle.dispose();
        }
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_region(&self) -> Option<CropRegion> {
        self.active.as_ref().and_then(H::current_region)
    }

    pub fn output(&self) -> Option<RgbaImage> {
        self.active.as_ref().and_then(H::output)
    }
}

// =============================================================================
// FIXED REGION CROP
// =============================================================================

/// Non-interactive capability that selects a predetermined region.
///
/// Used when the region comes from the command line rather than a pointer.
#[derive(Debug, Clone, Copy)]
pub struct RegionCrop {
    region: CropRegion,
}

impl RegionCrop {
    pub fn new(region: CropRegion) -> Self {
        Self { region }
    }
}

impl CropCapability for RegionCrop {
    type Handle = RegionCropHandle;

    fn begin_crop(&mut self, page: Arc<RgbaImage>) -> RegionCropHandle {
        let region = self.region.clamp_to(page.width(), page.height());
        if region.is_none() {
            debug!(region = %self.region, "crop region lies outside the page");
        }
        RegionCropHandle { page, region }
    }
}

pub struct RegionCropHandle {
    page: Arc<RgbaImage>,
    region: Option<CropRegion>,
}

impl fmt::Debug for RegionCropHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionCropHandle")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl CropHandle for RegionCropHandle {
    fn current_region(&self) -> Option<CropRegion> {
        self.region
    }

    fn output(&self) -> Option<RgbaImage> {
        self.region.map(|r| {
            imageops::crop_imm(self.page.as_ref(), r.x, r.y, r.width, r.height).to_image()
        })
    }

    fn dispose(self) {}
}
