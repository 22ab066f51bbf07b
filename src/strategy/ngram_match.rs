use crate::features::categories;
use crate::model::{OutcomeRecord, Vote};

use super::{follower_tally, Strategy};

/// Exact match of the trailing k-gram against every earlier k-gram.
#[derive(Debug, Clone)]
pub struct NGramMatch {
    k: usize,
}

impl NGramMatch {
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }
}

impl Default for NGramMatch {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Strategy for NGramMatch {
    fn id(&self) -> &'static str {
        "ngram_match"
    }

    fn predict(&self, history: &[OutcomeRecord]) -> Vote {
        if history.len() < self.k + 1 {
            return Vote::Abstain;
        }
        match follower_tally(&categories(history), self.k) {
            Some(tally) => tally.majority(),
            None => Vote::Abstain,
        }
    }
}
