//! Page image loading.
//!
//! Loading a page raster is asynchronous and owned by the runtime. The
//! viewer hands out a [`PageRequest`] per navigation and later receives the
//! outcome tagged with the request's [`LoadTicket`]. Each new request
//! supersedes the one in flight, so a completion is applied only when its
//! ticket is still the pending one and its target is still the page the
//! state machine points at. Anything else is a stale completion and is
//! dropped.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::state::PageTarget;

/// Opacity of the page image while a load is pending.
pub const LOADING_OPACITY: f32 = 0.5;

/// Identifies one page load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// Instruction to the runtime to fetch a page raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: LoadTicket,
    pub target: PageTarget,
    pub path: PathBuf,
}

/// A page image that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoadFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for PageLoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {}: {}", self.path.display(), self.reason)
    }
}

/// A decoded page raster for the current page.
#[derive(Clone)]
pub struct LoadedPage {
    pub target: PageTarget,
    pub image: Arc<RgbaImage>,
}

impl fmt::Debug for LoadedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedPage")
            .field("target", &self.target)
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

/// What the page area shows.
#[derive(Debug, Clone, Default)]
pub enum PageDisplay {
    /// Nothing requested (empty catalog).
    #[default]
    Idle,
    /// Waiting for the runtime; rendered at [`LOADING_OPACITY`].
    Loading(PageRequest),
    Ready(LoadedPage),
    /// Failed-load affordance; the indicator keeps showing the page.
    Failed {
        target: PageTarget,
        failure: PageLoadFailure,
    },
}

impl PageDisplay {
    pub fn opacity(&self) -> f32 {
        match self {
            Self::Loading(_) => LOADING_OPACITY,
            _ => 1.0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn loaded(&self) -> Option<&LoadedPage> {
        match self {
            Self::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&PageLoadFailure> {
        match self {
            Self::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

/// Whether a completion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct PageLoader {
    issued: u64,
    display: PageDisplay,
}

impl PageLoader {
    pub fn display(&self) -> &PageDisplay {
        &self.display
    }

    /// Issue a request for `target`, superseding any pending one.
    pub fn request(&mut self, target: PageTarget, path: PathBuf) -> PageRequest {
        self.issued += 1;
        let request = PageRequest {
            ticket: LoadTicket(self.issued),
            target,
            path,
        };
        if let PageDisplay::Loading(pending) = &self.display {
            debug!(superseded = %pending.target, next = %target, "superseding page load");
        }
        self.display = PageDisplay::Loading(request.clone());
        request
    }

    /// Apply a completion if it still belongs to `current`.
    pub fn settle(
        &mut self,
        ticket: LoadTicket,
        current: Option<PageTarget>,
        outcome: Result<RgbaImage, String>,
    ) -> Settled {
        let request = match &self.display {
            PageDisplay::Loading(request)
                if request.ticket == ticket && Some(request.target) == current =>
            {
                request.clone()
            }
            _ => {
                debug!(?ticket, "dropping stale page load completion");
                return Settled::Stale;
            }
        };

        self.display = match outcome {
            Ok(image) => PageDisplay::Ready(LoadedPage {
                target: request.target,
                image: Arc::new(image),
            }),
            Err(reason) => {
                let failure = PageLoadFailure {
                    path: request.path,
                    reason,
                };
                warn!(page = %request.target, "{failure}");
                PageDisplay::Failed {
                    target: request.target,
                    failure,
                }
            }
        };
        Settled::Applied
    }

    pub fn clear(&mut self) {
        self.display = PageDisplay::Idle;
    }
}

#[cfg(test)]
mod tests {
    use edition_model::DateKey;

    use super::*;

    fn target(page: u32) -> PageTarget {
        PageTarget {
            date: DateKey::parse("08-03-2025").unwrap(),
            page,
        }
    }

    #[test]
    fn applies_current_completion() {
        let mut loader = PageLoader::default();
        let request = loader.request(target(1), "papers/08-03-2025/1.png".into());
        assert!(loader.display().is_loading());
        assert_eq!(loader.display().opacity(), LOADING_OPACITY);

        let settled = loader.settle(request.ticket, Some(target(1)), Ok(RgbaImage::new(4, 4)));
        assert_eq!(settled, Settled::Applied);
        assert_eq!(loader.display().loaded().unwrap().target, target(1));
        assert_eq!(loader.display().opacity(), 1.0);
    }

    #[test]
    fn superseded_completion_is_stale() {
        let mut loader = PageLoader::default();
        let first = loader.request(target(1), "1.png".into());
        let second = loader.request(target(2), "2.png".into());

        let settled = loader.settle(first.ticket, Some(target(2)), Ok(RgbaImage::new(4, 4)));
        assert_eq!(settled, Settled::Stale);
        assert!(loader.display().is_loading());

        let settled = loader.settle(second.ticket, Some(target(2)), Ok(RgbaImage::new(4, 4)));
        assert_eq!(settled, Settled::Applied);
    }

    #[test]
    fn completion_for_moved_state_is_stale() {
        let mut loader = PageLoader::default();
        let request = loader.request(target(1), "1.png".into());
        let settled = loader.settle(request.ticket, Some(target(2)), Ok(RgbaImage::new(4, 4)));
        assert_eq!(settled, Settled::Stale);
    }

    #[test]
    fn failure_is_recorded() {
        let mut loader = PageLoader::default();
        let request = loader.request(target(3), "3.png".into());
        loader.settle(request.ticket, Some(target(3)), Err("not found".to_string()));
        let failure = loader.display().failure().unwrap();
        assert_eq!(failure.reason, "not found");
        assert_eq!(failure.to_string(), "failed to load 3.png: not found");
    }
}
