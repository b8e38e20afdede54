use app::main::App;
use config::{ClassifierKind, Config, FrontendKind};
use device_gallery::impl_directory::DeviceGalleryDirectory;
use device_gallery::interface::DeviceGallery;
use frontend::impl_console::FrontendConsole;
use frontend::impl_gui::FrontendGui;
use frontend::interface::Frontend;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::ImageClassifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::Arc;
use std::time::Duration;

mod app;
mod config;
mod device_gallery;
mod frontend;
mod image_classifier;
mod image_reference;
mod library;
mod result_format;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_gallery: Arc<dyn DeviceGallery + Send + Sync> = Arc::new(DeviceGalleryDirectory::new(
        config.gallery_dir.clone(),
        logger.clone(),
    ));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match &config.classifier {
        ClassifierKind::TractOnnx(model_config) => Arc::new(ImageClassifierTractOnnx::new(
            model_config.clone(),
            logger.clone(),
        )),
        ClassifierKind::Fake => {
            let _ = logger.warn("No ASCLEPIUS_MODEL_PATH set, using the fake classifier");
            Arc::new(ImageClassifierFake::new(logger.clone()).with_latency(Duration::from_millis(300)))
        }
    };

    let frontend: Box<dyn Frontend> = match config.frontend {
        FrontendKind::Gui => Box::new(FrontendGui::new("Asclepius", config.tick_rate)),
        FrontendKind::Console => Box::new(FrontendConsole::stdio(config.tick_rate)),
    };

    let app = App::new(config, logger.clone(), device_gallery, image_classifier);

    frontend.run(app)?;

    let _ = logger.info("Bye");

    Ok(())
}
