//! Synchronous runtime for a viewer [`Session`].
//!
//! Page loads requested by the session are queued rather than performed
//! immediately. Only the newest request can still apply, so a burst of
//! navigation costs one decode when [`Driver::settle`] runs.

use edition_model::DateKey;
use edition_viewer::{
    CropCapability, Direction, Effect, Message, PageRequest, Session, ViewerError,
};
use image::RgbaImage;
use tracing::debug;

/// Read and decode a page image.
pub fn load_page(request: &PageRequest) -> Result<RgbaImage, String> {
    image::open(&request.path)
        .map(|image| image.to_rgba8())
        .map_err(|error| error.to_string())
}

pub struct Driver<C: CropCapability> {
    session: Session<C>,
    pending: Option<PageRequest>,
}

impl<C: CropCapability> Driver<C> {
    /// Take over a freshly created session and its initial effect.
    pub fn new(session: Session<C>, initial: Effect) -> Self {
        let mut driver = Self {
            session,
            pending: None,
        };
        driver.queue(initial);
        driver
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Forward `message`, queueing any page load it asks for.
    pub fn send(&mut self, message: Message) -> Result<Effect, ViewerError> {
        let effect = self.session.update(message)?;
        self.queue(effect.clone());
        Ok(effect)
    }

    /// Select `date` (when given) and step forward to `page`.
    ///
    /// Returns `false` when the edition has fewer pages than `page`.
    pub fn navigate(&mut self, date: Option<DateKey>, page: u32) -> Result<bool, ViewerError> {
        match date {
            Some(date) => self.send(Message::SelectEdition(date))?,
            None => self.send(Message::ResetToFirstPage)?,
        };
        for _ in 1..page {
            let effect = self.send(Message::Advance(Direction::Forward))?;
            if matches!(effect, Effect::AtBoundary(_)) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Perform the queued page load, if any.
    pub fn settle(&mut self) -> Result<(), ViewerError> {
        if let Some(request) = self.pending.take() {
            debug!(path = %request.path.display(), "loading page");
            let result = load_page(&request);
            self.send(Message::PageLoaded {
                ticket: request.ticket,
                result,
            })?;
        }
        Ok(())
    }

    fn queue(&mut self, effect: Effect) {
        let Effect::LoadPage(request) = effect else {
            return;
        };
        if let Some(previous) = self.pending.replace(request) {
            debug!(page = %previous.target, "skipping superseded load");
        }
    }
}
