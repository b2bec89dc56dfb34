//! Event-driven viewer session.
//!
//! A [`Session`] owns the navigation state, the page loader and the clipper
//! slot, and is driven one [`Message`] at a time. Work that has to happen
//! outside (fetching a page raster) comes back as an [`Effect`]; the runtime
//! performs it and feeds the outcome back as another message. Handlers run
//! to completion, so no locking is involved.

use std::sync::Arc;

use edition_model::{DateKey, EditionCatalog, PaperLayout};
use image::RgbaImage;
use tracing::{debug, info};

use crate::clipper::{ClipperSlot, CropCapability};
use crate::controls::Controls;
use crate::error::{Result, ViewerError};
use crate::loading::{LoadTicket, PageDisplay, PageLoader, PageRequest, Settled};
use crate::state::{Advance, Direction, ViewerState};

/// Input events.
pub enum Message {
    /// Edition chosen in the date selector.
    SelectEdition(DateKey),
    /// Previous/next control.
    Advance(Direction),
    ResetToFirstPage,
    /// A page load finished.
    PageLoaded {
        ticket: LoadTicket,
        result: std::result::Result<RgbaImage, String>,
    },
    OpenClipper,
    CloseClipper,
}

/// Work requested from the runtime after a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fetch and decode this page, then send [`Message::PageLoaded`].
    LoadPage(PageRequest),
    /// Navigation was refused at the first or last page.
    AtBoundary(Direction),
}

pub struct Session<C: CropCapability> {
    catalog: Arc<EditionCatalog>,
    layout: PaperLayout,
    state: ViewerState,
    loader: PageLoader,
    crop: C,
    clipper: ClipperSlot<C::Handle>,
}

impl<C: CropCapability> Session<C> {
    /// Start a session on the newest edition.
    ///
    /// The returned effect loads its first page, or is [`Effect::None`] for
    /// an empty catalog.
    pub fn new(catalog: Arc<EditionCatalog>, layout: PaperLayout, crop: C) -> (Self, Effect) {
        let state = ViewerState::initialize(&catalog);
        let mut session = Self {
            catalog,
            layout,
            state: ViewerState::Empty,
            loader: PageLoader::default(),
            crop,
            clipper: ClipperSlot::default(),
        };
        match state.selected_date() {
            Some(date) => info!(%date, "opening newest edition"),
            None => info!("catalog is empty, nothing to show yet"),
        }
        let effect = session.transition(state);
        (session, effect)
    }

    /// Handle one message.
    ///
    /// # Errors
    ///
    /// - [`ViewerError::EditionNotFound`] when selecting a date the catalog
    ///   does not contain.
    /// - [`ViewerError::PageNotReady`] when opening the clipper before the
    ///   current page image has loaded.
    pub fn update(&mut self, message: Message) -> Result<Effect> {
        match message {
            Message::SelectEdition(date) => {
                let next = self.state.select_edition(&self.catalog, date)?;
                info!(%date, "switching edition");
                Ok(self.transition(next))
            }
            Message::Advance(direction) => match self.state.advance_page(direction) {
                Advance::Moved(next) => Ok(self.transition(next)),
                Advance::AtBoundary => {
                    debug!(%direction, page = self.state.current_page(), "already at boundary");
                    Ok(Effect::AtBoundary(direction))
                }
            },
            Message::ResetToFirstPage => {
                let next = self.state.reset_to_first_page();
                Ok(self.transition(next))
            }
            Message::PageLoaded { ticket, result } => {
                let current = self.state.page_target();
                if self.loader.settle(ticket, current, result) == Settled::Applied {
                    debug!(?current, "page load settled");
                }
                Ok(Effect::None)
            }
            Message::OpenClipper => {
                let page = self
                    .loader
                    .display()
                    .loaded()
                    .filter(|page| Some(page.target) == self.state.page_target())
                    .map(|page| Arc::clone(&page.image))
                    .ok_or(ViewerError::PageNotReady)?;
                self.clipper.open(&mut self.crop, page);
                Ok(Effect::None)
            }
            Message::CloseClipper => {
                self.clipper.close();
                Ok(Effect::None)
            }
        }
    }

    /// Install `next` and request its page if the target changed.
    fn transition(&mut self, next: ViewerState) -> Effect {
        let previous = self.state.page_target();
        self.state = next;
        let Some(target) = next.page_target() else {
            self.clipper.close();
            self.loader.clear();
            return Effect::None;
        };
        if previous == Some(target) {
            return Effect::None;
        }
        self.clipper.close();
        let path = self.layout.page_image(target.date, target.page);
        Effect::LoadPage(self.loader.request(target, path))
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn catalog(&self) -> &EditionCatalog {
        &self.catalog
    }

    pub fn layout(&self) -> &PaperLayout {
        &self.layout
    }

    pub fn display(&self) -> &PageDisplay {
        self.loader.display()
    }

    pub fn clipper(&self) -> &ClipperSlot<C::Handle> {
        &self.clipper
    }

    /// Raster selected by the open clipper, if any.
    pub fn crop_output(&self) -> Option<RgbaImage> {
        self.clipper.output()
    }

    pub fn controls(&self) -> Controls {
        Controls::derive(&self.state, &self.catalog, &self.layout, self.loader.display())
    }
}
