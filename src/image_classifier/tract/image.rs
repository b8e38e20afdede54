use crate::image_classifier::models::model_config::Normalization;
use image::{imageops, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

/// Fits the image inside `width` x `height`, keeping its aspect ratio and
/// centering it on a black canvas.
pub fn letterbox_image(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    if image.width() * height == image.height() * width {
        return image
            .resize_exact(width, height, imageops::FilterType::Triangle)
            .to_rgb8();
    }

    let scaled = image.resize(width, height, imageops::FilterType::Triangle).to_rgb8();

    let x_offset = (width - scaled.width().min(width)) / 2;
    let y_offset = (height - scaled.height().min(height)) / 2;

    let mut canvas = RgbImage::new(width, height);
    imageops::replace(&mut canvas, &scaled, x_offset as i64, y_offset as i64);
    canvas
}

/// NCHW float tensor, each channel scaled to [0, 1] then normalized.
pub fn image_to_tensor(
    rgb: &RgbImage,
    normalization: &Normalization,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let plane = width * height;
    let mut tensor = Tensor::zero::<f32>(&[1, 3, height, width])?;
    let data = tensor.as_slice_mut::<f32>()?;

    for (index, pixel) in rgb.pixels().enumerate() {
        for c in 0..3 {
            let value = pixel[c] as f32 / 255.0;
            data[c * plane + index] = (value - normalization.mean[c]) / normalization.std[c];
        }
    }

    Ok(tensor)
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    normalization: &Normalization,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let resized = letterbox_image(image, width, height);
    image_to_tensor(&resized, normalization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let mut img = ImageBuffer::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgb(color);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_image_to_tensor_square() {
        let image = solid(100, 100, [255, 0, 0]);

        let tensor = resize_image_to_tensor(&image, 224, 224, &Normalization::unit()).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();
        assert_eq!(slice[0], 1.0);
        assert_eq!(slice[224 * 224], 0.0);
        assert_eq!(slice[2 * 224 * 224], 0.0);
    }

    #[test]
    fn test_image_to_tensor_rectangle_is_centered() {
        let image = solid(200, 100, [255, 0, 0]);

        let tensor = resize_image_to_tensor(&image, 224, 224, &Normalization::unit()).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();
        // top rows are padding, the middle row is image
        assert_eq!(slice[0], 0.0);
        assert_eq!(slice[112 * 224 + 112], 1.0);
    }

    #[test]
    fn test_image_to_tensor_normalization() {
        let image = solid(10, 10, [128, 128, 128]);
        let normalization = Normalization {
            mean: [0.5, 0.5, 0.5],
            std: [0.5, 0.5, 0.5],
        };

        let tensor = resize_image_to_tensor(&image, 10, 10, &normalization).unwrap();
        let slice = tensor.as_slice::<f32>().unwrap();

        let expected = (128.0 / 255.0 - 0.5) / 0.5;
        assert!((slice[0] - expected).abs() < 0.0001);
        assert!((slice[100] - expected).abs() < 0.0001);
        assert!((slice[200] - expected).abs() < 0.0001);
    }
}
