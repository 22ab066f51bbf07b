use crate::features::{categories, similarity};
use crate::model::{OutcomeRecord, Vote};

use super::{Strategy, VoteTally};

/// Long-window fuzzy match where each historical match votes with
/// `similarity / distance_from_end`, so recent matches dominate.
#[derive(Debug, Clone)]
pub struct WeightedLongRangeMatch {
    window: usize,
    min_similarity: f64,
    min_history: usize,
}

impl Default for WeightedLongRangeMatch {
    fn default() -> Self {
        Self {
            window: 10,
            min_similarity: 0.6,
            min_history: 100,
        }
    }
}

impl Strategy for WeightedLongRangeMatch {
    fn id(&self) -> &'static str {
        "weighted_long_range_match"
    }

    fn predict(&self, history: &[OutcomeRecord]) -> Vote {
        let len = history.len();
        if len < self.min_history || len < self.window + 1 {
            return Vote::Abstain;
        }
        let cats = categories(history);
        let target = &cats[len - self.window..];

        let mut tally = VoteTally::default();
        for (i, window) in cats.windows(self.window + 1).enumerate() {
            let score = similarity(&window[..self.window], target);
            if score > self.min_similarity {
                let recency = 1.0 / (len - i) as f64;
                tally.add(window[self.window], score * recency);
            }
        }
        tally.majority()
    }
}
