#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Normalization {
    /// Pixels scaled to [0, 1] and left as is.
    pub fn unit() -> Self {
        Self {
            mean: [0.0, 0.0, 0.0],
            std: [1.0, 1.0, 1.0],
        }
    }

    pub fn imagenet() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self::unit()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    pub labels_path: Option<String>,
    /// (width, height)
    pub input_shape: (u32, u32),
    pub normalization: Normalization,
    pub apply_softmax: bool,
    pub max_results: usize,
    pub score_threshold: f32,
}

impl ModelConfig {
    pub fn new(onnx_model_path: impl Into<String>) -> Self {
        Self {
            onnx_model_path: onnx_model_path.into(),
            labels_path: None,
            input_shape: (224, 224),
            normalization: Normalization::default(),
            apply_softmax: true,
            max_results: 3,
            score_threshold: 0.1,
        }
    }
}
