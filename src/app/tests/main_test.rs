use crate::app::core::{Msg, Route, NOTICE_NO_IMAGE};
use crate::app::tests::fixture::{benign_malignant, Fixture};
use crate::app::view::{View, ViewGallery};
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_reference::ImageReference;
use std::time::Duration;

#[test]
fn test_gallery_is_loaded_on_start() {
    let mut f = Fixture::new(ImageClassifierFake::new(Fixture::logger()));

    let loaded = f.pump_until(|app| {
        matches!(
            app.view(),
            View::Picker(picker) if matches!(picker.gallery, ViewGallery::Images { .. })
        )
    });

    assert!(loaded);
}

#[test]
fn test_analyze_end_to_end() {
    let mut f = Fixture::new(ImageClassifierFake::returning(
        Fixture::logger(),
        benign_malignant(),
    ));

    f.app
        .dispatch(Msg::ImageSelected(ImageReference::new("gallery/a.jpg")));
    f.app.dispatch(Msg::AnalyzePressed);

    let navigated = f.pump_until(|app| matches!(app.model().route, Route::Result(_)));

    assert!(navigated);
    assert_eq!(f.image_classifier.calls(), 1);
    match f.app.view() {
        View::Result(result) => {
            assert_eq!(result.image.as_str(), "gallery/a.jpg");
            assert_eq!(
                result.text,
                "Benign 82%\nMalignant 18%\nInference Time : 120 ms"
            );
        }
        other => panic!("Unexpected view {:?}", other),
    }
}

#[test]
fn test_analyze_without_image_never_calls_classifier() {
    let mut f = Fixture::new(ImageClassifierFake::returning(
        Fixture::logger(),
        benign_malignant(),
    ));

    f.app.dispatch(Msg::AnalyzePressed);
    f.app.pump_timeout(Duration::from_millis(50));

    assert_eq!(f.image_classifier.calls(), 0);
    assert_eq!(f.app.model().route, Route::Picker);
    match f.app.view() {
        View::Picker(picker) => assert_eq!(picker.notice.as_deref(), Some(NOTICE_NO_IMAGE)),
        other => panic!("Unexpected view {:?}", other),
    }
}

#[test]
fn test_classifier_failure_stays_on_picker() {
    let mut f = Fixture::new(ImageClassifierFake::failing(
        Fixture::logger(),
        "Unsupported image",
    ));

    f.app
        .dispatch(Msg::ImageSelected(ImageReference::new("gallery/b.jpg")));
    f.app.dispatch(Msg::AnalyzePressed);

    let finished = f.pump_until(|app| !app.model().picker.is_loading());

    assert!(finished);
    assert_eq!(f.image_classifier.calls(), 1);
    assert_eq!(f.app.model().route, Route::Picker);
    assert_eq!(
        f.app.model().notice.as_ref().map(|notice| notice.message.as_str()),
        Some("Unsupported image")
    );
    assert!(f
        .logger
        .lines()
        .iter()
        .any(|line| line.starts_with("ERROR") && line.contains("Unsupported image")));
}

#[test]
fn test_loading_shown_while_classifier_runs() {
    let mut f = Fixture::new(
        ImageClassifierFake::returning(Fixture::logger(), benign_malignant())
            .with_latency(Duration::from_millis(200)),
    );

    f.app
        .dispatch(Msg::ImageSelected(ImageReference::new("gallery/a.jpg")));
    f.app.dispatch(Msg::AnalyzePressed);
    f.app.dispatch(Msg::AnalyzePressed);

    match f.app.view() {
        View::Picker(picker) => {
            assert!(picker.loading);
            assert!(!picker.analyze_enabled);
        }
        other => panic!("Unexpected view {:?}", other),
    }

    assert!(f.pump_until(|app| matches!(app.model().route, Route::Result(_))));
    assert_eq!(f.image_classifier.calls(), 1);
}

#[test]
fn test_result_after_runtime_is_dropped_is_harmless() {
    let f = Fixture::new(
        ImageClassifierFake::returning(Fixture::logger(), benign_malignant())
            .with_latency(Duration::from_millis(50)),
    );
    let Fixture {
        mut app,
        image_classifier,
        ..
    } = f;

    app.dispatch(Msg::ImageSelected(ImageReference::new("gallery/a.jpg")));
    app.dispatch(Msg::AnalyzePressed);
    drop(app);

    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(image_classifier.calls(), 1);
}

#[test]
fn test_classifier_panic_still_completes() {
    let mut f = Fixture::new(ImageClassifierFake::panicking(
        Fixture::logger(),
        "decoder blew up",
    ));

    f.app
        .dispatch(Msg::ImageSelected(ImageReference::new("gallery/a.jpg")));
    f.app.dispatch(Msg::AnalyzePressed);

    let finished = f.pump_until(|app| !app.model().picker.is_loading());

    assert!(finished);
    assert_eq!(f.app.model().route, Route::Picker);
    assert_eq!(
        f.app.model().notice.as_ref().map(|notice| notice.message.as_str()),
        Some("Classifier crashed: decoder blew up")
    );
    match f.app.view() {
        View::Picker(picker) => assert!(picker.analyze_enabled),
        other => panic!("Unexpected view {:?}", other),
    }
}
