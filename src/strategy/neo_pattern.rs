use crate::features::{categories, similarity};
use crate::model::{OutcomeRecord, Vote};

use super::{Strategy, VoteTally};

/// Fuzzy pattern match over several window lengths. Historical windows that
/// agree with the trailing window on at least `min_similarity` of their
/// positions vote for whatever followed them; the pattern length with the
/// most contributing matches (and a strict majority) wins.
#[derive(Debug, Clone)]
pub struct NeoPatternSimilarity {
    pattern_lengths: Vec<usize>,
    min_similarity: f64,
    min_history: usize,
}

impl Default for NeoPatternSimilarity {
    fn default() -> Self {
        Self {
            pattern_lengths: vec![4, 6],
            min_similarity: 0.75,
            min_history: 20,
        }
    }
}

impl Strategy for NeoPatternSimilarity {
    fn id(&self) -> &'static str {
        "neo_pattern_similarity"
    }

    fn predict(&self, history: &[OutcomeRecord]) -> Vote {
        let len = history.len();
        if len < self.min_history {
            return Vote::Abstain;
        }
        let cats = categories(history);

        let mut best = Vote::Abstain;
        let mut best_matches = 0.0;
        for &pat_len in &self.pattern_lengths {
            if pat_len == 0 || len < pat_len * 2 + 1 {
                continue;
            }
            let target = &cats[len - pat_len..];
            let mut tally = VoteTally::default();
            for window in cats.windows(pat_len + 1) {
                if similarity(&window[..pat_len], target) >= self.min_similarity {
                    tally.add(window[pat_len], 1.0);
                }
            }

            let vote = tally.majority();
            if !vote.is_abstain() && (best.is_abstain() || tally.total() > best_matches) {
                best = vote;
                best_matches = tally.total();
            }
        }
        best
    }
}
