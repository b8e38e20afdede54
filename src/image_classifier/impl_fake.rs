use crate::image_classifier::interface::{Classification, ClassificationResult, ImageClassifier};
use crate::image_reference::ImageReference;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Behavior {
    Random { labels: (String, String) },
    Scripted(Result<ClassificationResult, String>),
    Panicking(String),
}

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    behavior: Behavior,
    latency: Duration,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    /// Two complementary labels with a random split, used when no model is configured.
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(
            logger,
            Behavior::Random {
                labels: ("Cancer".to_string(), "Non Cancer".to_string()),
            },
        )
    }

    #[allow(dead_code)]
    pub fn returning(logger: Arc<dyn Logger + Send + Sync>, result: ClassificationResult) -> Self {
        Self::with_behavior(logger, Behavior::Scripted(Ok(result)))
    }

    #[allow(dead_code)]
    pub fn failing(logger: Arc<dyn Logger + Send + Sync>, message: &str) -> Self {
        Self::with_behavior(logger, Behavior::Scripted(Err(message.to_string())))
    }

    #[allow(dead_code)]
    pub fn panicking(logger: Arc<dyn Logger + Send + Sync>, message: &str) -> Self {
        Self::with_behavior(logger, Behavior::Panicking(message.to_string()))
    }

    fn with_behavior(logger: Arc<dyn Logger + Send + Sync>, behavior: Behavior) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            behavior,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_result(
        &self,
        labels: &(String, String),
    ) -> Result<ClassificationResult, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let score_dist = Uniform::new(0.0f32, 1.0)?;
        let time_dist = Uniform::new(20u64, 200)?;

        let score = score_dist.sample(&mut rng);

        Ok(ClassificationResult {
            classifications: vec![
                Classification::new(labels.0.clone(), score),
                Classification::new(labels.1.clone(), 1.0 - score),
            ],
            inference_time_ms: time_dist.sample(&mut rng),
        })
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        image: &ImageReference,
    ) -> Result<ClassificationResult, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!("Classifying {}", image));

        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        match &self.behavior {
            Behavior::Random { labels } => self.random_result(labels),
            Behavior::Scripted(Ok(result)) => Ok(result.clone()),
            Behavior::Scripted(Err(message)) => Err(message.clone().into()),
            Behavior::Panicking(message) => panic!("{}", message),
        }
    }
}
