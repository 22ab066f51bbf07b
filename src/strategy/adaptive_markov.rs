use crate::features::categories;
use crate::model::{OutcomeRecord, Vote};

use super::{follower_tally, Strategy};

/// Runs the transition model at several orders and keeps the one with the
/// widest majority margin.
#[derive(Debug, Clone)]
pub struct AdaptiveOrderMarkov {
    orders: Vec<usize>,
    min_history: usize,
}

impl Default for AdaptiveOrderMarkov {
    fn default() -> Self {
        Self {
            orders: vec![2, 3, 4],
            min_history: 20,
        }
    }
}

impl Strategy for AdaptiveOrderMarkov {
    fn id(&self) -> &'static str {
        "adaptive_order_markov"
    }

    fn predict(&self, history: &[OutcomeRecord]) -> Vote {
        if history.len() < self.min_history {
            return Vote::Abstain;
        }
        let cats = categories(history);

        let mut best = Vote::Abstain;
        let mut best_margin = -1.0;
        for &order in &self.orders {
            let Some(tally) = follower_tally(&cats, order) else {
                continue;
            };
            let vote = tally.majority();
            if vote.is_abstain() {
                continue;
            }
            let margin = tally.margin();
            if margin > best_margin {
                best_margin = margin;
                best = vote;
            }
        }
        best
    }
}
