use thiserror::Error;

use crate::ensemble::{Ensemble, EnsembleConfig, WeightTable};
use crate::model::{OutcomeRecord, Prediction};
use crate::strategy_stats::StrategyScoreboard;

/// Online updates need at least this many records before the new one.
pub const MIN_ADAPT_PREFIX: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("seed history is empty")]
    EmptySeed,

    #[error("seed history is not strictly ascending at session {0}")]
    UnorderedSeed(u64),

    #[error("history manager is already initialized")]
    AlreadyInitialized,

    #[error("history manager is not initialized")]
    NotInitialized,

    #[error("session {got} does not follow last stored session {last}")]
    OutOfOrder { last: u64, got: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    Uninitialized,
    Ready,
}

/// Owns the append-only outcome sequence and keeps the ensemble and the
/// standing prediction in step with it.
#[derive(Debug)]
pub struct HistoryManager {
    state: HistoryState,
    history: Vec<OutcomeRecord>,
    ensemble: Ensemble,
    current: Option<Prediction>,
}

impl HistoryManager {
    pub fn new(cfg: EnsembleConfig) -> Self {
        Self::with_ensemble(Ensemble::new(cfg))
    }

    pub fn with_ensemble(ensemble: Ensemble) -> Self {
        Self {
            state: HistoryState::Uninitialized,
            history: Vec::new(),
            ensemble,
            current: None,
        }
    }

    /// Load the seed, fit weights, warm the EMA and compute the first
    /// prediction.
    pub fn initialize(&mut self, seed: Vec<OutcomeRecord>) -> Result<Prediction, HistoryError> {
        if self.state == HistoryState::Ready {
            return Err(HistoryError::AlreadyInitialized);
        }
        if seed.is_empty() {
            return Err(HistoryError::EmptySeed);
        }
        if let Some(pair) = seed
            .windows(2)
            .find(|w| w[1].session_id <= w[0].session_id)
        {
            return Err(HistoryError::UnorderedSeed(pair[1].session_id));
        }

        self.history = seed;
        let fitted = self.ensemble.fit_initial(&self.history);
        if fitted {
            tracing::info!(
                strategies = self.ensemble.weights().len(),
                "Seeded strategy weights from backtest"
            );
        } else {
            tracing::info!(
                records = self.history.len(),
                "History too short to fit, keeping uniform weights"
            );
        }
        let steps = self.ensemble.warm_up(&self.history);
        tracing::debug!(steps, "Warm-up replay complete");

        self.state = HistoryState::Ready;
        let prediction = self.recompute();
        tracing::info!(
            records = self.history.len(),
            next_session = self.last_session_id().map(|s| s + 1),
            label = %prediction.label,
            confidence = prediction.confidence,
            "History loaded"
        );
        Ok(prediction)
    }

    /// Append the next record, adapt weights against its outcome and refresh
    /// the standing prediction.
    pub fn append_record(&mut self, record: OutcomeRecord) -> Result<Prediction, HistoryError> {
        if self.state != HistoryState::Ready {
            return Err(HistoryError::NotInitialized);
        }
        if let Some(last) = self.last_session_id() {
            if record.session_id <= last {
                return Err(HistoryError::OutOfOrder {
                    last,
                    got: record.session_id,
                });
            }
        }

        let actual = record.category;
        let session_id = record.session_id;
        self.history.push(record);
        let prefix_len = self.history.len() - 1;
        if prefix_len >= MIN_ADAPT_PREFIX {
            self.ensemble
                .update_with_outcome(&self.history[..prefix_len], actual);
        }

        let prediction = self.recompute();
        tracing::info!(
            session = session_id,
            result = %actual,
            next_session = session_id + 1,
            label = %prediction.label,
            confidence = prediction.confidence,
            "New session"
        );
        Ok(prediction)
    }

    pub fn current_prediction(&self) -> Option<&Prediction> {
        self.current.as_ref()
    }

    pub fn state(&self) -> HistoryState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == HistoryState::Ready
    }

    pub fn history(&self) -> &[OutcomeRecord] {
        &self.history
    }

    pub fn last_record(&self) -> Option<&OutcomeRecord> {
        self.history.last()
    }

    pub fn last_session_id(&self) -> Option<u64> {
        self.history.last().map(|r| r.session_id)
    }

    pub fn weights(&self) -> &WeightTable {
        self.ensemble.weights()
    }

    pub fn stats(&self) -> &StrategyScoreboard {
        self.ensemble.stats()
    }

    fn recompute(&mut self) -> Prediction {
        let prediction = self.ensemble.predict(&self.history);
        self.current = Some(prediction.clone());
        prediction
    }
}
