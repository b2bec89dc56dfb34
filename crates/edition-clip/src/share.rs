//! Handing finished clips to a share surface, or to the user as a file.

use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::compositor::BrandedImage;
use crate::error::Result;

pub const DEFAULT_SHARE_TITLE: &str = "Tom City Edition";
pub const DEFAULT_SHARE_TEXT: &str = "A clipping from the Tom City Edition";

/// An encoded clip ready to leave the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub file: ClipFile,
}

/// What the surface reported after the hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareResponse {
    Completed,
    /// The user dismissed the share sheet.
    Dismissed,
}

/// Platform share surface.
pub trait ShareSurface {
    /// Whether image files can be shared at all.
    fn supports_files(&self) -> bool;

    fn share(
        &self,
        payload: SharePayload,
    ) -> impl Future<Output = Result<ShareResponse>> + Send;
}

/// Surface for platforms without file sharing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShareSurface;

impl ShareSurface for NoShareSurface {
    fn supports_files(&self) -> bool {
        false
    }

    async fn share(&self, _payload: SharePayload) -> Result<ShareResponse> {
        Ok(ShareResponse::Dismissed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// Dismissed by the user or rejected by the surface. Not an error.
    Cancelled,
    /// No file-capable surface; the caller should fall back to a download.
    Unsupported,
}

/// Result of [`ShareExporter::deliver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Shared,
    Cancelled,
    Downloaded(ClipFile),
}

/// Hands out `Clip-{epoch-millis}.png` names that never repeat within a
/// process, even for clips made in the same millisecond.
#[derive(Debug, Default)]
pub struct ClipNamer {
    last: AtomicI64,
}

impl ClipNamer {
    pub fn next_name(&self) -> String {
        self.name_at(Utc::now().timestamp_millis())
    }

    fn name_at(&self, now_millis: i64) -> String {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_millis.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        format!("Clip-{}.png", now_millis.max(previous + 1))
    }
}

pub struct ShareExporter<S> {
    surface: S,
    title: String,
    text: String,
    namer: ClipNamer,
}

impl<S: ShareSurface> ShareExporter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            title: DEFAULT_SHARE_TITLE.to_string(),
            text: DEFAULT_SHARE_TEXT.to_string(),
            namer: ClipNamer::default(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.title = title.into();
        self.text = text.into();
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Offer `image` to the share surface.
    ///
    /// Surface failures are logged and reported as [`ShareOutcome::Cancelled`].
    ///
    /// # Errors
    ///
    /// Only PNG encoding can fail.
    pub async fn share(&self, image: &BrandedImage) -> Result<ShareOutcome> {
        if !self.surface.supports_files() {
            info!("file sharing unavailable, falling back to download");
            return Ok(ShareOutcome::Unsupported);
        }
        let payload = SharePayload {
            title: self.title.clone(),
            text: self.text.clone(),
            file: self.encode(image)?,
        };
        debug!(file = %payload.file.file_name, "handing clip to share surface");
        let outcome = match self.surface.share(payload).await {
            Ok(ShareResponse::Completed) => ShareOutcome::Shared,
            Ok(ShareResponse::Dismissed) => ShareOutcome::Cancelled,
            Err(error) => {
                warn!(%error, "share failed, treating as cancelled");
                ShareOutcome::Cancelled
            }
        };
        Ok(outcome)
    }

    /// Encode `image` as a timestamped PNG download.
    ///
    /// # Errors
    ///
    /// Only PNG encoding can fail.
    pub fn download(&self, image: &BrandedImage) -> Result<ClipFile> {
        let file = self.encode(image)?;
        info!(file = %file.file_name, bytes = file.bytes.len(), "clip ready for download");
        Ok(file)
    }

    /// Share when possible, otherwise download.
    ///
    /// # Errors
    ///
    /// Only PNG encoding can fail.
    pub async fn deliver(&self, image: &BrandedImage) -> Result<Delivery> {
        match self.share(image).await? {
            ShareOutcome::Shared => Ok(Delivery::Shared),
            ShareOutcome::Cancelled => Ok(Delivery::Cancelled),
            ShareOutcome::Unsupported => self.download(image).map(Delivery::Downloaded),
        }
    }

    fn encode(&self, image: &BrandedImage) -> Result<ClipFile> {
        Ok(ClipFile {
            file_name: self.namer.next_name(),
            mime_type: "image/png",
            bytes: image.to_png()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_carry_the_timestamp() {
        let namer = ClipNamer::default();
        assert_eq!(namer.name_at(1_741_392_000_000), "Clip-1741392000000.png");
    }

    #[test]
    fn same_millisecond_names_differ() {
        let namer = ClipNamer::default();
        let first = namer.name_at(1_000);
        let second = namer.name_at(1_000);
        let earlier_clock = namer.name_at(900);
        assert_eq!(first, "Clip-1000.png");
        assert_eq!(second, "Clip-1001.png");
        assert_eq!(earlier_clock, "Clip-1002.png");
    }
}
