use crate::app::core::{init, transition, Model, Msg};
use crate::app::run_effect::RunEffect;
use crate::app::view::{view, View};
use crate::config::Config;
use crate::device_gallery::interface::DeviceGallery;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::Duration;

/// Owns the model. Lives on the UI thread; effects running on worker threads
/// only reach it through the message channel.
pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    model: Model,
    msg_receiver: Receiver<Msg>,
    run_effect: RunEffect,
}

impl App {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_gallery: Arc<dyn DeviceGallery + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();
        let logger = logger.with_namespace("app");
        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            device_gallery,
            image_classifier,
            msg_sender,
        );

        Self {
            config,
            logger,
            model: Model::default(),
            msg_receiver,
            run_effect,
        }
    }

    pub fn start(&mut self) {
        let (model, effects) = init();
        self.model = model;
        for effect in effects {
            self.run_effect.spawn(effect);
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn view(&self) -> View {
        view(&self.model)
    }

    pub fn dispatch(&mut self, msg: Msg) {
        if !matches!(msg, Msg::Tick(_)) {
            let _ = self.logger.info(&format!("msg: {:?}", msg));
        }

        let model = std::mem::take(&mut self.model);
        let (model, effects) = transition(&self.config, model, msg);
        self.model = model;

        if !effects.is_empty() {
            let _ = self.logger.info(&format!("effects: {:?}", effects));
        }
        for effect in effects {
            self.run_effect.spawn(effect);
        }
    }

    /// Applies every message that has arrived so far without blocking.
    /// Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.msg_receiver.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Waits up to `timeout` for one message, then drains the rest.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        match self.msg_receiver.recv_timeout(timeout) {
            Ok(msg) => {
                self.dispatch(msg);
                1 + self.pump()
            }
            Err(_) => 0,
        }
    }
}
