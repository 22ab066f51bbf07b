use crate::features::{categories, runs};
use crate::model::{OutcomeRecord, Vote};

use super::Strategy;

const MOMENTUM_RUN: usize = 4;
const ALTERNATION_RUNS: usize = 4;
const REVERSAL_RUN: usize = 6;

/// Follows long runs, continues strict 1-1 alternation, and reverses
/// very long runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunContinuationBreaker;

impl Strategy for RunContinuationBreaker {
    fn id(&self) -> &'static str {
        "run_continuation_breaker"
    }

    fn predict(&self, history: &[OutcomeRecord]) -> Vote {
        let runs = runs(&categories(history));
        let Some(last) = runs.last().copied() else {
            return Vote::Abstain;
        };
        if runs.len() < 2 {
            return Vote::Abstain;
        }

        if last.length >= MOMENTUM_RUN {
            return last.value.into();
        }
        if runs.len() >= ALTERNATION_RUNS {
            let alternating = runs[runs.len() - ALTERNATION_RUNS..]
                .iter()
                .all(|r| r.length == 1);
            if alternating {
                return last.value.opposite().into();
            }
            if last.length >= REVERSAL_RUN {
                return last.value.opposite().into();
            }
        }
        Vote::Abstain
    }
}
