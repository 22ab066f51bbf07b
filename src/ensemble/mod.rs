pub mod weights;

use serde::Deserialize;

use crate::model::{Category, OutcomeRecord, Prediction, Vote};
use crate::strategy::{default_pool, FrequencyRebalance, Strategy, StrategyPool, VoteTally};
use crate::strategy_stats::StrategyScoreboard;

pub use weights::WeightTable;

pub const REWARD_CORRECT: f64 = 1.05;
pub const REWARD_INCORRECT: f64 = 0.95;
/// Windows shorter than this leave the prior untouched.
pub const MIN_FIT_WINDOW: usize = 10;
/// First index scored by the backtest fitter.
pub const FIT_START_INDEX: usize = 3;
/// First index replayed through the online adapter during warm-up.
pub const WARMUP_START_INDEX: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EnsembleConfig {
    #[serde(default = "default_ema_alpha")]
    pub ema_alpha: f64,
    #[serde(default = "default_min_weight")]
    pub min_weight: f64,
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_ema_alpha() -> f64 {
    0.1
}

fn default_min_weight() -> f64 {
    0.001
}

fn default_history_window() -> usize {
    500
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            ema_alpha: default_ema_alpha(),
            min_weight: default_min_weight(),
            history_window: default_history_window(),
        }
    }
}

/// Weighted vote over a strategy pool with offline fitting and online
/// EMA adaptation.
#[derive(Debug)]
pub struct Ensemble {
    cfg: EnsembleConfig,
    pool: StrategyPool,
    weights: WeightTable,
    stats: StrategyScoreboard,
    fallback: FrequencyRebalance,
}

impl Ensemble {
    pub fn new(cfg: EnsembleConfig) -> Self {
        Self::with_pool(cfg, default_pool())
    }

    pub fn with_pool(cfg: EnsembleConfig, pool: StrategyPool) -> Self {
        let weights = WeightTable::uniform(pool.iter().map(|s| s.id()), cfg.min_weight);
        Self {
            cfg,
            pool,
            weights,
            stats: StrategyScoreboard::default(),
            fallback: FrequencyRebalance::default(),
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn stats(&self) -> &StrategyScoreboard {
        &self.stats
    }

    /// Seed weights from each strategy's hit count over the most recent
    /// `history_window` records (Laplace-smoothed). Returns false when the
    /// window was too short to fit.
    pub fn fit_initial(&mut self, history: &[OutcomeRecord]) -> bool {
        let window = recent_window(history, self.cfg.history_window);
        if window.len() < MIN_FIT_WINDOW {
            return false;
        }

        let mut hits = vec![0u64; self.pool.len()];
        for i in FIT_START_INDEX..window.len() {
            let prefix = &window[..i];
            let actual = window[i].category;
            for (strategy, count) in self.pool.iter().zip(hits.iter_mut()) {
                if strategy.predict(prefix).category() == Some(actual) {
                    *count += 1;
                }
            }
        }

        let raw: Vec<f64> = hits.iter().map(|&h| (h + 1) as f64).collect();
        self.weights.assign(&raw);
        true
    }

    /// Replay the online adapter over the fitting window so the EMA state
    /// reflects recent history. Returns the number of steps applied.
    pub fn warm_up(&mut self, history: &[OutcomeRecord]) -> usize {
        let window = recent_window(history, self.cfg.history_window);
        let mut steps = 0;
        for i in WARMUP_START_INDEX..window.len() {
            self.update_with_outcome(&window[..i], window[i].category);
            steps += 1;
        }
        steps
    }

    /// One EMA step for every strategy given the now-known `actual` that
    /// followed `prefix`. Abstaining counts as incorrect.
    pub fn update_with_outcome(&mut self, prefix: &[OutcomeRecord], actual: Category) {
        let alpha = self.cfg.ema_alpha;
        let min_weight = self.cfg.min_weight;
        let votes: Vec<Vote> = self.pool.iter().map(|s| s.predict(prefix)).collect();

        for (strategy, &vote) in self.pool.iter().zip(&votes) {
            self.stats.record(strategy.id(), vote, actual);
        }
        for (weight, vote) in self.weights.weights_mut().iter_mut().zip(votes) {
            let reward = if vote.category() == Some(actual) {
                REWARD_CORRECT
            } else {
                REWARD_INCORRECT
            };
            *weight = ema_step(*weight, reward, alpha).max(min_weight);
        }
        self.weights.normalize();
    }

    /// Current weighted vote over `history`.
    ///
    /// Falls back to the frequency-rebalance vote (High if it abstains) with
    /// confidence 0.5 when every strategy abstains. An exact tie between the
    /// two labels resolves to High.
    pub fn predict(&self, history: &[OutcomeRecord]) -> Prediction {
        let mut tally = VoteTally::default();
        for (i, strategy) in self.pool.iter().enumerate() {
            if let Some(category) = strategy.predict(history).category() {
                tally.add(category, self.weights.weight_at(i));
            }
        }
        aggregate(&tally, || self.fallback.predict(history))
    }
}

/// `alpha * (w * reward) + (1 - alpha) * w`
pub fn ema_step(weight: f64, reward: f64, alpha: f64) -> f64 {
    let target = weight * reward;
    alpha * target + (1.0 - alpha) * weight
}

/// Turn an accumulated weight tally into a prediction.
pub fn aggregate(tally: &VoteTally, fallback: impl FnOnce() -> Vote) -> Prediction {
    if tally.is_empty() {
        let label = fallback().category().unwrap_or(Category::High);
        return Prediction::fallback(label);
    }
    let label = if tally.low > tally.high {
        Category::Low
    } else {
        Category::High
    };
    Prediction::informed(label, tally.get(label) / tally.total())
}

fn recent_window(history: &[OutcomeRecord], window: usize) -> &[OutcomeRecord] {
    &history[history.len().saturating_sub(window)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_step_matches_reward_schedule() {
        assert!((ema_step(0.5, REWARD_CORRECT, 0.1) - 0.5025).abs() < 1e-12);
        assert!((ema_step(0.5, REWARD_INCORRECT, 0.1) - 0.4975).abs() < 1e-12);
    }

    #[test]
    fn aggregate_tie_goes_high() {
        let tally = VoteTally {
            high: 0.25,
            low: 0.25,
        };
        let p = aggregate(&tally, || Vote::Low);
        assert_eq!(p.label, Category::High);
        assert!((p.confidence - 0.51).abs() < 1e-12);
    }

    #[test]
    fn aggregate_clamps_unanimous_vote() {
        let tally = VoteTally {
            high: 0.0,
            low: 0.4,
        };
        let p = aggregate(&tally, || Vote::Abstain);
        assert_eq!(p.label, Category::Low);
        assert!((p.confidence - 0.99).abs() < 1e-12);
    }

    #[test]
    fn aggregate_empty_uses_fallback() {
        let p = aggregate(&VoteTally::default(), || Vote::Low);
        assert_eq!(p.label, Category::Low);
        assert_eq!(p.confidence, 0.5);
        let p = aggregate(&VoteTally::default(), || Vote::Abstain);
        assert_eq!(p.label, Category::High);
    }
}
