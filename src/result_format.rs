use crate::image_classifier::interface::{Classification, ClassificationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResult {
    pub label_block: String,
    pub inference_time: String,
}

/// `None` when there is nothing to show; callers must not move on to the
/// result screen in that case.
pub fn format_result(result: &ClassificationResult) -> Option<FormattedResult> {
    if result.classifications.is_empty() {
        return None;
    }

    let mut sorted: Vec<&Classification> = result.classifications.iter().collect();
    // stable, so equal scores stay in the order the classifier gave them
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));

    let label_block = sorted
        .iter()
        .map(|c| format!("{} {}", c.label, format_percent(c.score)))
        .collect::<Vec<_>>()
        .join("\n");

    Some(FormattedResult {
        label_block,
        inference_time: format_inference_time(result.inference_time_ms),
    })
}

/// Whole percent, half-even rounding like the platform percent formatter.
pub fn format_percent(score: f32) -> String {
    if !score.is_finite() {
        return format!("{}%", score);
    }
    let percent = (score as f64 * 100.0).round_ties_even();
    format!("{}%", percent as i64)
}

pub fn format_inference_time(inference_time_ms: u64) -> String {
    format!("{} ms", inference_time_ms)
}
