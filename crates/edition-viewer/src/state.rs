//! Navigation state machine.
//!
//! The viewer is either `Empty` (nothing published yet) or viewing one page
//! of one edition. Every transition is a pure function of the current state
//! and the read-only catalog: transitions return a new [`ViewerState`]
//! instead of mutating anything, and rendering code only ever reads the
//! derived outputs (`page_target`, `can_go_previous`, `page_indicator`).

use std::fmt;

use edition_model::{DateKey, EditionCatalog};
use tracing::debug;

use crate::error::{Result, ViewerError};

// =============================================================================
// DIRECTION
// =============================================================================

/// Page step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Backward => f.write_str("backward"),
        }
    }
}

// =============================================================================
// PAGE TARGET
// =============================================================================

/// The `(date, page)` pair the page renderer should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageTarget {
    pub date: DateKey,
    pub page: u32,
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} p{}", self.date, self.page)
    }
}

// =============================================================================
// VIEWER STATE
// =============================================================================

/// Current edition and page.
///
/// `Viewing` can only be constructed through the transitions below, which
/// keep `1 <= page <= total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    /// The catalog has no editions.
    #[default]
    Empty,

    /// A page of an edition is selected.
    Viewing(Viewing),
}

/// Position inside the selected edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewing {
    date: DateKey,
    page: u32,
    total_pages: u32,
}

impl Viewing {
    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }
}

/// Result of [`ViewerState::advance_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The page moved by one.
    Moved(ViewerState),
    /// The move would leave the edition; state is unchanged.
    AtBoundary,
}

impl ViewerState {
    /// Enter the initial state for a catalog: its newest edition at page 1,
    /// or `Empty` when nothing has been published.
    pub fn initialize(catalog: &EditionCatalog) -> Self {
        match catalog.newest() {
            Some(edition) => Self::Viewing(Viewing {
                date: edition.date(),
                page: 1,
                total_pages: edition.page_count(),
            }),
            None => Self::Empty,
        }
    }

    /// Switch to another edition, always landing on its first page.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::EditionNotFound`] when `date` is not in the
    /// catalog. The catalog is build-time data, so this is a caller bug.
    pub fn select_edition(self, catalog: &EditionCatalog, date: DateKey) -> Result<Self> {
        let edition = catalog
            .get(date)
            .ok_or(ViewerError::EditionNotFound(date))?;
        debug!(%date, pages = edition.page_count(), "edition selected");
        Ok(Self::Viewing(Viewing {
            date,
            page: 1,
            total_pages: edition.page_count(),
        }))
    }

    /// Step one page in `direction`.
    pub fn advance_page(self, direction: Direction) -> Advance {
        let Self::Viewing(viewing) = self else {
            return Advance::AtBoundary;
        };
        let page = match direction {
            Direction::Forward if viewing.page < viewing.total_pages => viewing.page + 1,
            Direction::Backward if viewing.page > 1 => viewing.page - 1,
            _ => return Advance::AtBoundary,
        };
        Advance::Moved(Self::Viewing(Viewing { page, ..viewing }))
    }

    /// Step one page, keeping the current state at a boundary.
    pub fn advanced(self, direction: Direction) -> Self {
        match self.advance_page(direction) {
            Advance::Moved(next) => next,
            Advance::AtBoundary => self,
        }
    }

    pub fn reset_to_first_page(self) -> Self {
        match self {
            Self::Viewing(viewing) => Self::Viewing(Viewing { page: 1, ..viewing }),
            Self::Empty => Self::Empty,
        }
    }

    // =========================================================================
    // Derived outputs
    // =========================================================================

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn viewing(&self) -> Option<&Viewing> {
        match self {
            Self::Viewing(viewing) => Some(viewing),
            Self::Empty => None,
        }
    }

    pub fn selected_date(&self) -> Option<DateKey> {
        self.viewing().map(Viewing::date)
    }

    /// Current page, 1 when nothing is selected.
    pub fn current_page(&self) -> u32 {
        self.viewing().map_or(1, Viewing::page)
    }

    /// Page count of the selected edition, 0 when nothing is selected.
    pub fn total_pages(&self) -> u32 {
        self.viewing().map_or(0, Viewing::total_pages)
    }

    pub fn page_target(&self) -> Option<PageTarget> {
        self.viewing().map(|viewing| PageTarget {
            date: viewing.date,
            page: viewing.page,
        })
    }

    pub fn can_go_previous(&self) -> bool {
        self.viewing().is_some_and(|viewing| viewing.page > 1)
    }

    pub fn can_go_next(&self) -> bool {
        self.viewing()
            .is_some_and(|viewing| viewing.page < viewing.total_pages)
    }

    /// `Page {current} / {total}` while viewing.
    pub fn page_indicator(&self) -> Option<String> {
        self.viewing()
            .map(|viewing| format!("Page {} / {}", viewing.page, viewing.total_pages))
    }
}
