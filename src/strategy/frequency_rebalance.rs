use crate::features::{categories, CategoryCounts};
use crate::model::{OutcomeRecord, Vote};

use super::Strategy;

/// Bets on the under-represented category once the imbalance exceeds
/// `max_imbalance`.
#[derive(Debug, Clone)]
pub struct FrequencyRebalance {
    max_imbalance: usize,
}

impl FrequencyRebalance {
    pub fn new(max_imbalance: usize) -> Self {
        Self { max_imbalance }
    }
}

impl Default for FrequencyRebalance {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Strategy for FrequencyRebalance {
    fn id(&self) -> &'static str {
        "frequency_rebalance"
    }

    fn predict(&self, history: &[OutcomeRecord]) -> Vote {
        let counts = CategoryCounts::of(&categories(history));
        if counts.high > counts.low + self.max_imbalance {
            Vote::Low
        } else if counts.low > counts.high + self.max_imbalance {
            Vote::High
        } else {
            Vote::Abstain
        }
    }
}
