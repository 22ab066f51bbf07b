pub mod adaptive_markov;
pub mod deep_mean_reversion;
pub mod fixed_order_markov;
pub mod frequency_rebalance;
pub mod long_range_match;
pub mod neo_pattern;
pub mod ngram_match;
pub mod run_breaker;

use std::fmt::Debug;

use crate::model::{Category, OutcomeRecord, Vote};

pub use adaptive_markov::AdaptiveOrderMarkov;
pub use deep_mean_reversion::DeepMeanReversion;
pub use fixed_order_markov::FixedOrderMarkov;
pub use frequency_rebalance::FrequencyRebalance;
pub use long_range_match::WeightedLongRangeMatch;
pub use neo_pattern::NeoPatternSimilarity;
pub use ngram_match::NGramMatch;
pub use run_breaker::RunContinuationBreaker;

/// A stateless heuristic that votes on the category following `history`.
///
/// Implementations must be deterministic and must only read the prefix they
/// are given; "not enough data" and "no signal" are both [`Vote::Abstain`].
pub trait Strategy: Debug + Send + Sync {
    fn id(&self) -> &'static str;
    fn predict(&self, history: &[OutcomeRecord]) -> Vote;
}

pub type StrategyPool = Vec<Box<dyn Strategy>>;

pub fn default_pool() -> StrategyPool {
    vec![
        Box::new(FrequencyRebalance::default()),
        Box::new(FixedOrderMarkov::default()),
        Box::new(NGramMatch::default()),
        Box::new(NeoPatternSimilarity::default()),
        Box::new(DeepMeanReversion::default()),
        Box::new(WeightedLongRangeMatch::default()),
        Box::new(RunContinuationBreaker),
        Box::new(AdaptiveOrderMarkov::default()),
    ]
}

/// Two-slot accumulator keyed by category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VoteTally {
    pub high: f64,
    pub low: f64,
}

impl VoteTally {
    pub fn add(&mut self, category: Category, amount: f64) {
        match category {
            Category::High => self.high += amount,
            Category::Low => self.low += amount,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::High => self.high,
            Category::Low => self.low,
        }
    }

    pub fn total(&self) -> f64 {
        self.high + self.low
    }

    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }

    /// Strict majority; ties and empty tallies abstain.
    pub fn majority(&self) -> Vote {
        if self.high > self.low {
            Vote::High
        } else if self.low > self.high {
            Vote::Low
        } else {
            Vote::Abstain
        }
    }

    /// `|high - low| / total`, zero for an empty tally.
    pub fn margin(&self) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        (self.high - self.low).abs() / total
    }
}

/// Counts what followed every earlier occurrence of the trailing
/// `order`-window. `None` when the context never occurred before.
pub(crate) fn follower_tally(categories: &[Category], order: usize) -> Option<VoteTally> {
    if order == 0 || categories.len() < order + 1 {
        return None;
    }
    let context = &categories[categories.len() - order..];
    let mut tally = VoteTally::default();
    let mut seen = false;
    for window in categories.windows(order + 1) {
        if &window[..order] == context {
            tally.add(window[order], 1.0);
            seen = true;
        }
    }
    seen.then_some(tally)
}
