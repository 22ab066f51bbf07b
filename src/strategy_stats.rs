use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Category, Vote};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrategyStats {
    pub hits: u32,
    pub misses: u32,
    pub abstains: u32,
}

impl StrategyStats {
    pub fn total(&self) -> u32 {
        self.hits + self.misses + self.abstains
    }

    pub fn hit_rate_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Online hit/miss/abstain counts per strategy id.
#[derive(Debug, Clone, Default)]
pub struct StrategyScoreboard {
    data: HashMap<String, StrategyStats>,
}

impl StrategyScoreboard {
    pub fn record(&mut self, strategy_id: &str, vote: Vote, actual: Category) {
        let entry = self.data.entry(strategy_id.to_string()).or_default();
        match vote.category() {
            None => entry.abstains = entry.abstains.saturating_add(1),
            Some(c) if c == actual => entry.hits = entry.hits.saturating_add(1),
            Some(_) => entry.misses = entry.misses.saturating_add(1),
        }
    }

    pub fn get(&self, strategy_id: &str) -> StrategyStats {
        self.data.get(strategy_id).copied().unwrap_or_default()
    }
}
