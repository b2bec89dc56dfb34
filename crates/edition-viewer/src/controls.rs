//! Control state derived from the viewer.
//!
//! Nothing here is stored: the rendering layer calls [`Controls::derive`]
//! after every transition and redraws from the result.

use std::path::PathBuf;

use edition_model::{DateKey, EditionCatalog, PaperLayout, pdf_download_name};

use crate::loading::PageDisplay;
use crate::state::ViewerState;

/// Indicator text shown while the catalog is empty.
pub const COMING_SOON_MESSAGE: &str = "New edition coming soon";

/// One entry of the edition selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOption {
    pub date: DateKey,
    pub label: String,
    pub selected: bool,
}

/// Everything the interface needs to draw its controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// Clip and share need a decoded page image.
    pub clip_enabled: bool,
    pub download_enabled: bool,
    pub indicator: String,
    /// Newest edition first.
    pub date_options: Vec<DateOption>,
    pub page_image: Option<PathBuf>,
    pub page_opacity: f32,
    pub page_failed: bool,
    pub document: Option<PathBuf>,
    pub document_download_name: Option<String>,
}

impl Controls {
    pub fn derive(
        state: &ViewerState,
        catalog: &EditionCatalog,
        layout: &PaperLayout,
        display: &PageDisplay,
    ) -> Self {
        let selected = state.selected_date();
        let date_options = catalog
            .all_dates_descending()
            .map(|date| DateOption {
                date,
                label: date.to_string(),
                selected: Some(date) == selected,
            })
            .collect();
        let edition = selected.and_then(|date| catalog.get(date));

        Self {
            previous_enabled: state.can_go_previous(),
            next_enabled: state.can_go_next(),
            clip_enabled: display.loaded().is_some(),
            download_enabled: edition.is_some(),
            indicator: state
                .page_indicator()
                .unwrap_or_else(|| COMING_SOON_MESSAGE.to_string()),
            date_options,
            page_image: state
                .page_target()
                .map(|target| layout.page_image(target.date, target.page)),
            page_opacity: display.opacity(),
            page_failed: display.failure().is_some(),
            document: edition.map(|edition| layout.document(edition)),
            document_download_name: selected.map(pdf_download_name),
        }
    }

    /// Nothing published yet.
    pub fn is_coming_soon(&self) -> bool {
        self.date_options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use edition_model::Edition;

    use super::*;
    use crate::state::Direction;

    fn catalog() -> EditionCatalog {
        EditionCatalog::from_editions([
            Edition::new(DateKey::parse("01-03-2025").unwrap(), 3, "full.pdf").unwrap(),
            Edition::new(DateKey::parse("08-03-2025").unwrap(), 2, "full.pdf").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn empty_catalog_is_coming_soon() {
        let catalog = EditionCatalog::empty();
        let state = ViewerState::initialize(&catalog);
        let controls = Controls::derive(
            &state,
            &catalog,
            &PaperLayout::default(),
            &PageDisplay::Idle,
        );

        assert!(controls.is_coming_soon());
        assert!(!controls.previous_enabled);
        assert!(!controls.next_enabled);
        assert!(!controls.clip_enabled);
        assert!(!controls.download_enabled);
        assert_eq!(controls.indicator, COMING_SOON_MESSAGE);
        assert_eq!(controls.page_image, None);
    }

    #[test]
    fn first_page_disables_previous_only() {
        let catalog = catalog();
        let state = ViewerState::initialize(&catalog);
        let controls = Controls::derive(
            &state,
            &catalog,
            &PaperLayout::default(),
            &PageDisplay::Idle,
        );

        assert!(!controls.previous_enabled);
        assert!(controls.next_enabled);
        assert!(controls.download_enabled);
        assert_eq!(controls.indicator, "Page 1 / 2");
        assert_eq!(
            controls.document_download_name.as_deref(),
            Some("Tom-City-Edition-08-03-2025.pdf")
        );
        let labels: Vec<&str> = controls
            .date_options
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, ["08-03-2025", "01-03-2025"]);
        assert!(controls.date_options[0].selected);
        assert!(!controls.date_options[1].selected);
    }

    #[test]
    fn last_page_disables_next_only() {
        let catalog = catalog();
        let state = ViewerState::initialize(&catalog).advanced(Direction::Forward);
        let controls = Controls::derive(
            &state,
            &catalog,
            &PaperLayout::new("papers"),
            &PageDisplay::Idle,
        );

        assert!(controls.previous_enabled);
        assert!(!controls.next_enabled);
        assert_eq!(
            controls.page_image,
            Some(PathBuf::from("papers").join("08-03-2025").join("2.png"))
        );
    }
}
