use crate::features::categories;
use crate::model::{OutcomeRecord, Vote};

use super::{follower_tally, Strategy};

/// Majority follower of the trailing `order`-window.
#[derive(Debug, Clone)]
pub struct FixedOrderMarkov {
    order: usize,
}

impl FixedOrderMarkov {
    pub fn new(order: usize) -> Self {
        Self {
            order: order.max(1),
        }
    }
}

impl Default for FixedOrderMarkov {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Strategy for FixedOrderMarkov {
    fn id(&self) -> &'static str {
        "fixed_order_markov"
    }

    fn predict(&self, history: &[OutcomeRecord]) -> Vote {
        if history.len() < self.order + 1 {
            return Vote::Abstain;
        }
        follower_tally(&categories(history), self.order)
            .map(|tally| tally.majority())
            .unwrap_or(Vote::Abstain)
    }
}
