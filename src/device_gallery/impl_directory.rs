use crate::device_gallery::interface::DeviceGallery;
use crate::image_reference::ImageReference;
use crate::library::logger::interface::Logger;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "gif", "webp"];

pub struct DeviceGalleryDirectory {
    directory: PathBuf,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceGalleryDirectory {
    pub fn new(directory: impl Into<PathBuf>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            directory: directory.into(),
            logger: logger.with_namespace("gallery").with_namespace("directory"),
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
        .unwrap_or(false)
}

impl DeviceGallery for DeviceGalleryDirectory {
    fn list_images(&self) -> Result<Vec<ImageReference>, Box<dyn std::error::Error + Send + Sync>> {
        let entries = std::fs::read_dir(&self.directory)
            .map_err(|e| format!("Failed to open gallery {}: {}", self.directory.display(), e))?;

        let mut images = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                images.push(ImageReference::from_path(&path));
            }
        }
        images.sort();

        let _ = self.logger.info(&format!(
            "Found {} images in {}",
            images.len(),
            self.directory.display()
        ));

        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "asclepius-{}-{}-{}",
            name,
            std::process::id(),
            nanos
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_lists_only_images_sorted() {
        let dir = scratch_dir("gallery");
        for name in ["b.PNG", "a.jpg", "notes.txt", "c.jpeg"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }
        std::fs::create_dir_all(dir.join("nested.jpg")).unwrap();

        let gallery = DeviceGalleryDirectory::new(&dir, Arc::new(LoggerFake::new()));
        let names: Vec<String> = gallery
            .list_images()
            .unwrap()
            .iter()
            .map(|image| image.file_name())
            .collect();

        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.jpeg"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let gallery = DeviceGalleryDirectory::new(
            "./definitely/not/a/gallery",
            Arc::new(LoggerFake::new()),
        );

        let message = gallery.list_images().unwrap_err().to_string();

        assert!(message.contains("Failed to open gallery"), "{}", message);
    }
}
