use crate::app::core::{init, transition, Msg};
use crate::app::tests::fixture::benign_malignant;
use crate::app::view::{render_text, view, View, ViewGallery};
use crate::config::Config;
use crate::image_reference::ImageReference;

#[test]
fn test_picker_view_marks_selected_image() {
    let config = Config::default();
    let images = vec![
        ImageReference::new("gallery/a.jpg"),
        ImageReference::new("gallery/b.jpg"),
    ];
    let (model, _) = init();
    let (model, _) = transition(
        &config,
        model,
        Msg::GalleryLoadDone {
            request_id: 0,
            result: Ok(images.clone()),
        },
    );
    let (model, _) = transition(&config, model, Msg::ImageSelected(images[1].clone()));

    let View::Picker(picker) = view(&model) else {
        panic!("Expected picker view");
    };
    assert_eq!(
        picker.gallery,
        ViewGallery::Images {
            images,
            selected: Some(1)
        }
    );
    assert_eq!(picker.preview.as_ref().map(|p| p.as_str()), Some("gallery/b.jpg"));
    assert!(picker.analyze_enabled);
    assert!(!picker.loading);

    let text = render_text(&View::Picker(picker));
    assert!(text.contains("  [0] a.jpg"));
    assert!(text.contains("* [1] b.jpg"));
}

#[test]
fn test_result_view_text() {
    let config = Config::default();
    let (model, _) = init();
    let (model, _) = transition(
        &config,
        model,
        Msg::ImageSelected(ImageReference::new("gallery/a.jpg")),
    );
    let (model, _) = transition(&config, model, Msg::AnalyzePressed);
    let (model, _) = transition(
        &config,
        model,
        Msg::ClassifyDone {
            request_id: 0,
            result: Ok(benign_malignant()),
        },
    );

    let rendered = render_text(&view(&model));

    assert!(rendered.ends_with("Benign 82%\nMalignant 18%\nInference Time : 120 ms"));
}
