use crate::image_reference::ImageReference;

/// Source of images the user can pick from.
pub trait DeviceGallery {
    fn list_images(&self) -> Result<Vec<ImageReference>, Box<dyn std::error::Error + Send + Sync>>;
}
