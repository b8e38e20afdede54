use crate::app::core::{Effect, Msg};
use crate::config::Config;
use crate::device_gallery::interface::DeviceGallery;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_gallery: Arc<dyn DeviceGallery + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    msg_sender: Sender<Msg>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_gallery: Arc<dyn DeviceGallery + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        msg_sender: Sender<Msg>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            device_gallery,
            image_classifier,
            msg_sender,
        }
    }

    pub fn spawn(&self, effect: Effect) {
        let self_clone = self.clone();
        std::thread::spawn(move || self_clone.run_effect(effect));
    }

    /// Sends fail once the runtime is gone; the result is dropped with it.
    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.msg_sender.send(Msg::Tick(Instant::now())).is_err() {
                    break;
                }
            },
            Effect::LoadGallery { request_id } => {
                let result = self.device_gallery.list_images();
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Gallery failed: {}", e));
                }
                let _ = self
                    .msg_sender
                    .send(Msg::GalleryLoadDone { request_id, result });
            }
            Effect::Classify { request_id, image } => {
                let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
                    self.image_classifier.classify(&image)
                }))
                .unwrap_or_else(|payload| {
                    Err(format!("Classifier crashed: {}", panic_message(payload.as_ref())).into())
                });
                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Classifying {} failed: {}", image, e));
                }
                if self
                    .msg_sender
                    .send(Msg::ClassifyDone { request_id, result })
                    .is_err()
                {
                    let _ = self
                        .logger
                        .warn(&format!("Dropped result for request {}", request_id));
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
