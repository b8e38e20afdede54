use crate::app::screen_result::{ResultScreen, ResultScreenArgs};
use crate::config::Config;
use crate::image_classifier::interface::ClassificationResult;
use crate::image_reference::ImageReference;
use crate::result_format::format_result;
use std::time::Instant;

pub const NOTICE_NO_IMAGE: &str = "No image selected";
pub const NOTICE_EMPTY_RESULT: &str = "No classification result";

//
//
//

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Model {
    pub gallery: ModelGallery,
    pub picker: ModelPicker,
    pub route: Route,
    pub notice: Option<Notice>,
    pub next_request_id: u64,
    pub gallery_request_id: u64,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum ModelGallery {
    #[default]
    Loading,
    Loaded(Vec<ImageReference>),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ModelPicker {
    pub current_image: Option<ImageReference>,
    pub analysis: Analysis,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Analysis {
    #[default]
    Idle,
    Pending {
        request_id: u64,
        image: ImageReference,
    },
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum Route {
    #[default]
    Picker,
    Result(ResultScreen),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub shown_at: Instant,
}

impl ModelPicker {
    pub fn is_loading(&self) -> bool {
        matches!(self.analysis, Analysis::Pending { .. })
    }
}

//
//
//

#[derive(Debug)]
pub enum Msg {
    Tick(Instant),
    RefreshGallery,
    GalleryLoadDone {
        request_id: u64,
        result: Result<Vec<ImageReference>, Box<dyn std::error::Error + Send + Sync>>,
    },
    ImageSelected(ImageReference),
    AnalyzePressed,
    ClassifyDone {
        request_id: u64,
        result: Result<ClassificationResult, Box<dyn std::error::Error + Send + Sync>>,
    },
    BackPressed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    SubscribeTick,
    LoadGallery {
        request_id: u64,
    },
    Classify {
        request_id: u64,
        image: ImageReference,
    },
}

//
//
//

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![Effect::SubscribeTick, Effect::LoadGallery { request_id: 0 }],
    )
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::Tick(now) => (expire_notice(config, model, now), vec![]),

        Msg::RefreshGallery => {
            let request_id = model.gallery_request_id + 1;
            (
                Model {
                    gallery: ModelGallery::Loading,
                    gallery_request_id: request_id,
                    ..model
                },
                vec![Effect::LoadGallery { request_id }],
            )
        }

        // an older listing finishing late must not replace a newer one
        Msg::GalleryLoadDone { request_id, .. } if request_id != model.gallery_request_id => {
            (model, vec![])
        }

        Msg::GalleryLoadDone {
            result: Ok(images), ..
        } => (
            Model {
                gallery: ModelGallery::Loaded(images),
                ..model
            },
            vec![],
        ),

        Msg::GalleryLoadDone { result: Err(e), .. } => (
            Model {
                gallery: ModelGallery::Failed(e.to_string()),
                ..model
            },
            vec![],
        ),

        Msg::ImageSelected(image) => (
            Model {
                picker: ModelPicker {
                    current_image: Some(image),
                    // a pending request for the previous image is abandoned
                    analysis: Analysis::Idle,
                },
                ..model
            },
            vec![],
        ),

        Msg::AnalyzePressed => transition_analyze(model),

        Msg::ClassifyDone { request_id, result } => {
            transition_classify_done(model, request_id, result)
        }

        Msg::BackPressed => (
            Model {
                route: Route::Picker,
                ..model
            },
            vec![],
        ),
    }
}

fn transition_analyze(model: Model) -> (Model, Vec<Effect>) {
    if !matches!(model.route, Route::Picker) || model.picker.is_loading() {
        return (model, vec![]);
    }

    let Some(image) = model.picker.current_image.clone() else {
        return (with_notice(model, NOTICE_NO_IMAGE), vec![]);
    };

    let request_id = model.next_request_id;

    (
        Model {
            picker: ModelPicker {
                current_image: Some(image.clone()),
                analysis: Analysis::Pending {
                    request_id,
                    image: image.clone(),
                },
            },
            next_request_id: request_id + 1,
            ..model
        },
        vec![Effect::Classify { request_id, image }],
    )
}

fn transition_classify_done(
    model: Model,
    request_id: u64,
    result: Result<ClassificationResult, Box<dyn std::error::Error + Send + Sync>>,
) -> (Model, Vec<Effect>) {
    let image = match &model.picker.analysis {
        Analysis::Pending {
            request_id: pending,
            image,
        } if *pending == request_id => Some(image.clone()),
        _ => None,
    };
    // stale or duplicate completion
    let Some(image) = image else {
        return (model, vec![]);
    };

    let model = Model {
        picker: ModelPicker {
            analysis: Analysis::Idle,
            ..model.picker
        },
        ..model
    };

    match result {
        Ok(result) => match format_result(&result) {
            Some(formatted) => (
                Model {
                    route: Route::Result(ResultScreen::new(ResultScreenArgs {
                        image,
                        label_block: formatted.label_block,
                        inference_time: formatted.inference_time,
                    })),
                    notice: None,
                    ..model
                },
                vec![],
            ),
            None => (with_notice(model, NOTICE_EMPTY_RESULT), vec![]),
        },
        Err(e) => (with_notice(model, &e.to_string()), vec![]),
    }
}

fn with_notice(model: Model, message: &str) -> Model {
    Model {
        notice: Some(Notice {
            message: message.to_string(),
            shown_at: Instant::now(),
        }),
        ..model
    }
}

fn expire_notice(config: &Config, model: Model, now: Instant) -> Model {
    let expired = model.notice.as_ref().is_some_and(|notice| {
        now.saturating_duration_since(notice.shown_at) >= config.notice_duration
    });

    if expired {
        Model {
            notice: None,
            ..model
        }
    } else {
        model
    }
}
