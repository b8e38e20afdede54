use crate::app::core::{Model, ModelGallery, Route};
use crate::image_reference::ImageReference;

#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Picker(ViewPicker),
    Result(ViewResult),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewPicker {
    pub gallery: ViewGallery,
    pub preview: Option<ImageReference>,
    pub loading: bool,
    pub analyze_enabled: bool,
    pub notice: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewGallery {
    Loading,
    Images {
        images: Vec<ImageReference>,
        selected: Option<usize>,
    },
    Error(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewResult {
    pub image: ImageReference,
    pub text: String,
}

pub fn view(model: &Model) -> View {
    match &model.route {
        Route::Result(screen) => View::Result(ViewResult {
            image: screen.image().clone(),
            text: screen.text(),
        }),
        Route::Picker => View::Picker(ViewPicker {
            gallery: view_gallery(model),
            preview: model.picker.current_image.clone(),
            loading: model.picker.is_loading(),
            analyze_enabled: !model.picker.is_loading(),
            notice: model.notice.as_ref().map(|notice| notice.message.clone()),
        }),
    }
}

fn view_gallery(model: &Model) -> ViewGallery {
    match &model.gallery {
        ModelGallery::Loading => ViewGallery::Loading,
        ModelGallery::Failed(message) => ViewGallery::Error(message.clone()),
        ModelGallery::Loaded(images) => ViewGallery::Images {
            selected: model
                .picker
                .current_image
                .as_ref()
                .and_then(|current| images.iter().position(|image| image == current)),
            images: images.clone(),
        },
    }
}

/// Plain-text rendering, used by the console frontend.
pub fn render_text(view: &View) -> String {
    let mut lines = Vec::new();

    match view {
        View::Picker(picker) => {
            lines.push("== Pick an image ==".to_string());
            match &picker.gallery {
                ViewGallery::Loading => lines.push("Gallery: loading...".to_string()),
                ViewGallery::Error(message) => lines.push(format!("Gallery: {}", message)),
                ViewGallery::Images { images, selected } => {
                    if images.is_empty() {
                        lines.push("Gallery: empty".to_string());
                    }
                    for (index, image) in images.iter().enumerate() {
                        let marker = if Some(index) == *selected { '*' } else { ' ' };
                        lines.push(format!("{} [{}] {}", marker, index, image.file_name()));
                    }
                }
            }
            match &picker.preview {
                Some(image) => lines.push(format!("Preview: {}", image)),
                None => lines.push("Preview: none".to_string()),
            }
            if picker.loading {
                lines.push("Analyzing...".to_string());
            }
            if let Some(notice) = &picker.notice {
                lines.push(format!("! {}", notice));
            }
        }
        View::Result(result) => {
            lines.push("== Result ==".to_string());
            lines.push(format!("Image: {}", result.image));
            lines.push(result.text.clone());
        }
    }

    lines.join("\n")
}
