use serde::Serialize;

use super::outcome::Category;

pub const MIN_CONFIDENCE: f64 = 0.51;
pub const MAX_CONFIDENCE: f64 = 0.99;
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Category,
    pub confidence: f64,
    pub raw_label: char,
}

impl Prediction {
    /// Informed result; confidence is clamped into `[0.51, 0.99]`.
    pub fn informed(label: Category, confidence: f64) -> Self {
        Self {
            label,
            confidence: confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
            raw_label: label.code(),
        }
    }

    pub fn fallback(label: Category) -> Self {
        Self {
            label,
            confidence: FALLBACK_CONFIDENCE,
            raw_label: label.code(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.confidence == FALLBACK_CONFIDENCE
    }

    pub fn confidence_percent(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }
}
