use crate::features::{mean, FeatureSet};
use crate::model::{OutcomeRecord, Vote};

use super::Strategy;

/// Fades sustained extremes in the dice totals; falls back to betting
/// against the last outcome when the category sequence is near-maximally
/// disordered.
#[derive(Debug, Clone)]
pub struct DeepMeanReversion {
    min_history: usize,
    recent_window: usize,
    recent_high: f64,
    overall_high: f64,
    recent_low: f64,
    overall_low: f64,
    entropy_threshold: f64,
}

impl Default for DeepMeanReversion {
    fn default() -> Self {
        Self {
            min_history: 70,
            recent_window: 20,
            recent_high: 12.5,
            overall_high: 11.5,
            recent_low: 8.5,
            overall_low: 9.5,
            entropy_threshold: 0.98,
        }
    }
}

impl Strategy for DeepMeanReversion {
    fn id(&self) -> &'static str {
        "deep_mean_reversion"
    }

    fn predict(&self, history: &[OutcomeRecord]) -> Vote {
        if history.len() < self.min_history {
            return Vote::Abstain;
        }
        let features = FeatureSet::extract(history);
        let recent: Vec<f64> = history[history.len().saturating_sub(self.recent_window)..]
            .iter()
            .map(|r| r.total as f64)
            .collect();
        let recent_mean = mean(&recent);

        if recent_mean > self.recent_high && features.mean_total > self.overall_high {
            return Vote::Low;
        }
        if recent_mean < self.recent_low && features.mean_total < self.overall_low {
            return Vote::High;
        }
        if features.entropy > self.entropy_threshold {
            if let Some(last) = history.last() {
                return last.category.opposite().into();
            }
        }
        Vote::Abstain
    }
}
