use std::sync::Arc;

use edition_model::{CropRegion, DateKey, Edition, EditionCatalog, PaperLayout};
use edition_viewer::{
    COMING_SOON_MESSAGE, Direction, Effect, Message, PageRequest, RegionCrop, Session,
    ViewerError,
};
use image::{Rgba, RgbaImage};
use proptest::prelude::*;

fn date(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

fn catalog() -> Arc<EditionCatalog> {
    Arc::new(
        EditionCatalog::from_editions([
            Edition::new(date("22-02-2025"), 4, "full.pdf").unwrap(),
            Edition::new(date("01-03-2025"), 6, "full.pdf").unwrap(),
            Edition::new(date("08-03-2025"), 3, "full.pdf").unwrap(),
        ])
        .unwrap(),
    )
}

fn session() -> (Session<RegionCrop>, Effect) {
    Session::new(
        catalog(),
        PaperLayout::new("papers"),
        RegionCrop::new(CropRegion::new(0, 0, 2, 2)),
    )
}

fn expect_load(effect: Effect) -> PageRequest {
    match effect {
        Effect::LoadPage(request) => request,
        other => panic!("expected a page load, got {other:?}"),
    }
}

fn page() -> RgbaImage {
    RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 255]))
}

#[test]
fn starts_on_newest_edition_first_page() {
    let (session, effect) = session();
    let request = expect_load(effect);

    assert_eq!(request.target.date, date("08-03-2025"));
    assert_eq!(request.target.page, 1);
    assert_eq!(
        request.path,
        std::path::Path::new("papers").join("08-03-2025").join("1.png")
    );
    assert_eq!(session.controls().indicator, "Page 1 / 3");
    assert!(session.display().is_loading());
}

#[test]
fn selecting_an_edition_resets_to_first_page() {
    let (mut session, _) = session();
    session.update(Message::Advance(Direction::Forward)).unwrap();
    session.update(Message::Advance(Direction::Forward)).unwrap();
    assert_eq!(session.state().current_page(), 3);

    let request = expect_load(
        session
            .update(Message::SelectEdition(date("01-03-2025")))
            .unwrap(),
    );
    assert_eq!(request.target.page, 1);
    assert_eq!(session.state().total_pages(), 6);
    insta::assert_snapshot!(session.controls().indicator, @"Page 1 / 6");
}

#[test]
fn unknown_edition_is_rejected_without_changing_state() {
    let (mut session, _) = session();
    let before = *session.state();
    let err = session
        .update(Message::SelectEdition(date("15-03-2025")))
        .unwrap_err();

    assert_eq!(err, ViewerError::EditionNotFound(date("15-03-2025")));
    assert_eq!(*session.state(), before);
}

#[test]
fn boundaries_are_reported_not_crossed() {
    let (mut session, _) = session();
    let effect = session.update(Message::Advance(Direction::Backward)).unwrap();
    assert_eq!(effect, Effect::AtBoundary(Direction::Backward));
    assert_eq!(session.state().current_page(), 1);

    session.update(Message::Advance(Direction::Forward)).unwrap();
    session.update(Message::Advance(Direction::Forward)).unwrap();
    let effect = session.update(Message::Advance(Direction::Forward)).unwrap();
    assert_eq!(effect, Effect::AtBoundary(Direction::Forward));
    assert_eq!(session.state().current_page(), 3);
}

#[test]
fn stale_completion_is_ignored() {
    let (mut session, effect) = session();
    let first = expect_load(effect);
    let second = expect_load(session.update(Message::Advance(Direction::Forward)).unwrap());

    session
        .update(Message::PageLoaded {
            ticket: first.ticket,
            result: Ok(page()),
        })
        .unwrap();
    assert!(session.display().is_loading());
    assert!(!session.controls().clip_enabled);

    session
        .update(Message::PageLoaded {
            ticket: second.ticket,
            result: Ok(page()),
        })
        .unwrap();
    let loaded = session.display().loaded().unwrap();
    assert_eq!(loaded.target.page, 2);
    assert!(session.controls().clip_enabled);
}

#[test]
fn failed_load_keeps_indicator() {
    let (mut session, effect) = session();
    let request = expect_load(effect);
    session
        .update(Message::PageLoaded {
            ticket: request.ticket,
            result: Err("No such file or directory".to_string()),
        })
        .unwrap();

    let controls = session.controls();
    assert!(controls.page_failed);
    assert!(!controls.clip_enabled);
    assert_eq!(controls.indicator, "Page 1 / 3");
}

#[test]
fn clipper_needs_a_loaded_page() {
    let (mut session, _) = session();
    assert_eq!(
        session.update(Message::OpenClipper).unwrap_err(),
        ViewerError::PageNotReady
    );
}

#[test]
fn navigation_closes_the_clipper() {
    let (mut session, effect) = session();
    let request = expect_load(effect);
    session
        .update(Message::PageLoaded {
            ticket: request.ticket,
            result: Ok(page()),
        })
        .unwrap();

    session.update(Message::OpenClipper).unwrap();
    assert!(session.clipper().is_open());
    let output = session.crop_output().unwrap();
    assert_eq!(output.dimensions(), (2, 2));

    session.update(Message::Advance(Direction::Forward)).unwrap();
    assert!(!session.clipper().is_open());
    assert!(session.crop_output().is_none());
}

#[test]
fn reset_on_first_page_issues_no_load() {
    let (mut session, _) = session();
    assert_eq!(
        session.update(Message::ResetToFirstPage).unwrap(),
        Effect::None
    );

    session.update(Message::Advance(Direction::Forward)).unwrap();
    let request = expect_load(session.update(Message::ResetToFirstPage).unwrap());
    assert_eq!(request.target.page, 1);
}

#[test]
fn empty_catalog_disables_everything() {
    let (mut session, effect) = Session::new(
        Arc::new(EditionCatalog::empty()),
        PaperLayout::default(),
        RegionCrop::new(CropRegion::new(0, 0, 1, 1)),
    );
    assert_eq!(effect, Effect::None);

    let controls = session.controls();
    assert!(controls.is_coming_soon());
    assert!(!controls.previous_enabled);
    assert!(!controls.next_enabled);
    assert!(!controls.clip_enabled);
    assert!(!controls.download_enabled);
    assert_eq!(controls.indicator, COMING_SOON_MESSAGE);

    assert_eq!(
        session.update(Message::Advance(Direction::Forward)).unwrap(),
        Effect::AtBoundary(Direction::Forward)
    );
    assert_eq!(session.state().current_page(), 1);
    assert_eq!(session.state().total_pages(), 0);
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

proptest! {
    #[test]
    fn page_stays_within_bounds(steps in proptest::collection::vec(direction(), 0..40)) {
        let (mut session, _) = session();
        for step in steps {
            session.update(Message::Advance(step)).unwrap();
            let state = session.state();
            prop_assert!(state.current_page() >= 1);
            prop_assert!(state.current_page() <= state.total_pages());
            prop_assert_eq!(state.can_go_previous(), state.current_page() > 1);
            prop_assert_eq!(state.can_go_next(), state.current_page() < state.total_pages());
        }
    }
}
