use crate::device_gallery::interface::DeviceGallery;
use crate::image_reference::ImageReference;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

#[allow(dead_code)]
pub struct DeviceGalleryFake {
    logger: Arc<dyn Logger + Send + Sync>,
    images: Vec<ImageReference>,
}

#[allow(dead_code)]
impl DeviceGalleryFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, images: Vec<ImageReference>) -> Self {
        Self {
            logger: logger.with_namespace("gallery").with_namespace("fake"),
            images,
        }
    }
}

impl DeviceGallery for DeviceGalleryFake {
    fn list_images(&self) -> Result<Vec<ImageReference>, Box<dyn std::error::Error + Send + Sync>> {
        let _ = self.logger.info(&format!("Listing {} images", self.images.len()));
        Ok(self.images.clone())
    }
}
