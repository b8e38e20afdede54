use crate::image_reference::ImageReference;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Labels ranked by the classifier plus how long the model took to produce them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassificationResult {
    pub classifications: Vec<Classification>,
    pub inference_time_ms: u64,
}

/// Runs on a worker thread. `Ok` is the results callback, `Err` carries the
/// message shown to the user.
pub trait ImageClassifier {
    fn classify(
        &self,
        image: &ImageReference,
    ) -> Result<ClassificationResult, Box<dyn std::error::Error + Send + Sync>>;
}
