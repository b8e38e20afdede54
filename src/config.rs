use crate::image_classifier::models::model_config::{ModelConfig, Normalization};
use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierKind {
    Fake,
    TractOnnx(ModelConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendKind {
    Gui,
    Console,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub notice_duration: Duration,
    pub logger_timezone: chrono::FixedOffset,
    pub gallery_dir: PathBuf,
    pub classifier: ClassifierKind,
    pub frontend: FrontendKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            notice_duration: Duration::from_secs(2),
            logger_timezone: utc(),
            gallery_dir: PathBuf::from("./gallery"),
            classifier: ClassifierKind::Fake,
            frontend: FrontendKind::Gui,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Overlays `ASCLEPIUS_*` variables on the defaults.
    pub fn from_vars(
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut config = Self::default();

        if let Some(frontend) = var("ASCLEPIUS_FRONTEND") {
            config.frontend = match frontend.to_lowercase().as_str() {
                "gui" => FrontendKind::Gui,
                "console" => FrontendKind::Console,
                other => return Err(format!("Unknown ASCLEPIUS_FRONTEND: {}", other).into()),
            };
        }

        if let Some(dir) = var("ASCLEPIUS_GALLERY_DIR") {
            config.gallery_dir = PathBuf::from(dir);
        }

        if let Some(secs) = var("ASCLEPIUS_NOTICE_SECS") {
            let secs: f64 = parse("ASCLEPIUS_NOTICE_SECS", &secs)?;
            config.notice_duration = Duration::try_from_secs_f64(secs)
                .map_err(|e| format!("Invalid ASCLEPIUS_NOTICE_SECS {}: {}", secs, e))?;
        }

        if let Some(model_path) = var("ASCLEPIUS_MODEL_PATH") {
            let mut model = ModelConfig::new(model_path);

            model.labels_path = var("ASCLEPIUS_LABELS_PATH");

            if let Some(size) = var("ASCLEPIUS_INPUT_SIZE") {
                model.input_shape = parse_input_size(&size)?;
            }
            if let Some(max_results) = var("ASCLEPIUS_MAX_RESULTS") {
                model.max_results = parse_positive("ASCLEPIUS_MAX_RESULTS", &max_results)?;
            }
            if let Some(threshold) = var("ASCLEPIUS_SCORE_THRESHOLD") {
                model.score_threshold = parse("ASCLEPIUS_SCORE_THRESHOLD", &threshold)?;
            }
            if let Some(normalization) = var("ASCLEPIUS_NORMALIZATION") {
                model.normalization = match normalization.to_lowercase().as_str() {
                    "unit" => Normalization::unit(),
                    "imagenet" => Normalization::imagenet(),
                    other => {
                        return Err(format!("Unknown ASCLEPIUS_NORMALIZATION: {}", other).into())
                    }
                };
            }
            if let Some(softmax) = var("ASCLEPIUS_SOFTMAX") {
                model.apply_softmax = parse("ASCLEPIUS_SOFTMAX", &softmax)?;
            }

            config.classifier = ClassifierKind::TractOnnx(model);
        }

        Ok(config)
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, Box<dyn std::error::Error + Send + Sync>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| format!("Invalid {} {:?}: {}", key, value, e).into())
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, Box<dyn std::error::Error + Send + Sync>>
where
    T: std::str::FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let parsed: T = parse(key, value)?;
    if parsed == T::default() {
        return Err(format!("Invalid {} {:?}: must be greater than zero", key, value).into());
    }
    Ok(parsed)
}

/// `224` or `224x160` (width x height).
fn parse_input_size(value: &str) -> Result<(u32, u32), Box<dyn std::error::Error + Send + Sync>> {
    match value.split_once('x') {
        Some((width, height)) => Ok((
            parse_positive("ASCLEPIUS_INPUT_SIZE", width)?,
            parse_positive("ASCLEPIUS_INPUT_SIZE", height)?,
        )),
        None => {
            let side = parse_positive("ASCLEPIUS_INPUT_SIZE", value)?;
            Ok((side, side))
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, Box<dyn std::error::Error + Send + Sync>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_vars() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.classifier, ClassifierKind::Fake);
        assert_eq!(config.frontend, FrontendKind::Gui);
        assert_eq!(config.gallery_dir, PathBuf::from("./gallery"));
        assert_eq!(config.notice_duration, Duration::from_secs(2));
    }

    #[test]
    fn test_model_path_selects_tract_classifier() {
        let config = config_from(&[
            ("ASCLEPIUS_MODEL_PATH", "models/cancer.onnx"),
            ("ASCLEPIUS_LABELS_PATH", "models/labels.txt"),
            ("ASCLEPIUS_INPUT_SIZE", "320x240"),
            ("ASCLEPIUS_MAX_RESULTS", "5"),
            ("ASCLEPIUS_SCORE_THRESHOLD", "0.25"),
            ("ASCLEPIUS_NORMALIZATION", "imagenet"),
            ("ASCLEPIUS_SOFTMAX", "false"),
            ("ASCLEPIUS_FRONTEND", "Console"),
        ])
        .unwrap();

        let ClassifierKind::TractOnnx(model) = config.classifier else {
            panic!("expected tract classifier");
        };
        assert_eq!(model.onnx_model_path, "models/cancer.onnx");
        assert_eq!(model.labels_path.as_deref(), Some("models/labels.txt"));
        assert_eq!(model.input_shape, (320, 240));
        assert_eq!(model.max_results, 5);
        assert_eq!(model.score_threshold, 0.25);
        assert_eq!(model.normalization, Normalization::imagenet());
        assert!(!model.apply_softmax);
        assert_eq!(config.frontend, FrontendKind::Console);
    }

    #[test]
    fn test_square_input_size() {
        assert_eq!(parse_input_size("224").unwrap(), (224, 224));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("ASCLEPIUS_FRONTEND", "tui")]).is_err());
        assert!(config_from(&[("ASCLEPIUS_NOTICE_SECS", "-1")]).is_err());
        assert!(config_from(&[
            ("ASCLEPIUS_MODEL_PATH", "m.onnx"),
            ("ASCLEPIUS_MAX_RESULTS", "many")
        ])
        .is_err());
    }

    #[test]
    fn test_zero_sizes_are_errors() {
        assert!(parse_input_size("0").is_err());
        assert!(parse_input_size("224x0").is_err());
        assert!(config_from(&[
            ("ASCLEPIUS_MODEL_PATH", "m.onnx"),
            ("ASCLEPIUS_INPUT_SIZE", "0x224")
        ])
        .is_err());

        let error = config_from(&[
            ("ASCLEPIUS_MODEL_PATH", "m.onnx"),
            ("ASCLEPIUS_MAX_RESULTS", "0")
        ])
        .unwrap_err();
        assert!(error.to_string().contains("greater than zero"), "{}", error);
    }
}
