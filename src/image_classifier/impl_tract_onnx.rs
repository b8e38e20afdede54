use crate::image_classifier::interface::{Classification, ClassificationResult, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::image_classifier::tract::scores::{label_for, parse_labels, softmax, top_k};
use crate::image_reference::ImageReference;
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use std::time::Instant;
use tract_onnx::prelude::*;

/// The model is loaded for each request and dropped when the request is done.
pub struct ImageClassifierTractOnnx {
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("image_classifier").with_namespace("tract_onnx"),
        }
    }

    fn load_labels(&self) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        match &self.config.labels_path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read labels {}: {}", path, e))?;
                Ok(parse_labels(&contents))
            }
            None => Ok(vec![]),
        }
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &ImageReference,
    ) -> Result<ClassificationResult, Box<dyn std::error::Error + Send + Sync>> {
        let _ = self.logger.info(&format!("Classifying {}", image));

        let (width, height) = self.config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&self.config.onnx_model_path)
            .map_err(|e| format!("Failed to load model {}: {}", self.config.onnx_model_path, e))?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;
        let labels = self.load_labels()?;

        let decoded = image::open(image.to_path())
            .map_err(|e| format!("Failed to open image {}: {}", image, e))?;

        let input = resize_image_to_tensor(&decoded, width, height, &self.config.normalization)?;

        let started = Instant::now();
        let outputs = model.run(tvec!(input.into_tvalue()))?;
        let inference_time_ms = started.elapsed().as_millis() as u64;

        let output = outputs.first().ok_or("Model produced no outputs")?;
        let raw: Vec<f32> = output.to_array_view::<f32>()?.iter().copied().collect();
        let scores = if self.config.apply_softmax {
            softmax(&raw)
        } else {
            raw
        };

        let classifications: Vec<Classification> =
            top_k(&scores, self.config.max_results, self.config.score_threshold)
                .into_iter()
                .map(|(index, score)| Classification::new(label_for(&labels, index), score))
                .collect();

        let _ = self.logger.info(&format!(
            "Classified {} in {} ms: {:?}",
            image, inference_time_ms, classifications
        ));

        Ok(ClassificationResult {
            classifications,
            inference_time_ms,
        })
    }
}
