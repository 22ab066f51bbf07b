use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tokio::time::MissedTickBehavior;

use crate::ensemble::EnsembleConfig;
use crate::error::AppError;
use crate::history::HistoryManager;
use crate::model::{OutcomeRecord, Prediction};
use crate::pattern::PatternSummary;
use crate::strategy_stats::StrategyStats;

use super::client::FeedClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Empty,
    Initialized { count: usize, last_session: u64 },
    Appended { count: usize, last_session: u64 },
    Unchanged { last_session: u64 },
}

#[derive(Debug, Clone)]
pub struct PredictionView {
    pub last_record: Option<OutcomeRecord>,
    pub prediction: Option<Prediction>,
    pub pattern: PatternSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyView {
    pub id: String,
    pub weight: f64,
    #[serde(flatten)]
    pub stats: StrategyStats,
    pub hit_rate_percent: f64,
}

struct CoordinatorState {
    manager: HistoryManager,
    recent: VecDeque<OutcomeRecord>,
}

/// Owns the prediction core plus the capped display buffer and feeds them
/// from the poll loop. Mutations take the write lock; read handlers only
/// ever take the read lock.
pub struct FeedCoordinator {
    state: RwLock<CoordinatorState>,
    display_len: usize,
}

impl FeedCoordinator {
    pub fn new(cfg: EnsembleConfig, display_len: usize) -> Self {
        Self::with_manager(HistoryManager::new(cfg), display_len)
    }

    pub fn with_manager(manager: HistoryManager, display_len: usize) -> Self {
        Self {
            state: RwLock::new(CoordinatorState {
                manager,
                recent: VecDeque::new(),
            }),
            display_len: display_len.max(1),
        }
    }

    /// Feed one normalized, ascending batch into the core. The first
    /// non-empty batch seeds it; later batches contribute only sessions newer
    /// than the last one seen.
    pub async fn ingest(&self, batch: Vec<OutcomeRecord>) -> Result<IngestOutcome, AppError> {
        let Some(batch_last) = batch.last().map(|r| r.session_id) else {
            return Ok(IngestOutcome::Empty);
        };

        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let Some(last_seen) = state.manager.last_session_id() else {
            let count = batch.len();
            let tail_start = count.saturating_sub(self.display_len);
            let recent = batch[tail_start..].to_vec();
            state.manager.initialize(batch)?;
            state.recent = recent.into();
            return Ok(IngestOutcome::Initialized {
                count,
                last_session: batch_last,
            });
        };

        if batch_last <= last_seen {
            return Ok(IngestOutcome::Unchanged {
                last_session: last_seen,
            });
        }

        let mut count = 0;
        for record in batch.into_iter().filter(|r| r.session_id > last_seen) {
            state.manager.append_record(record.clone())?;
            state.recent.push_back(record);
            count += 1;
        }
        while state.recent.len() > self.display_len {
            state.recent.pop_front();
        }
        Ok(IngestOutcome::Appended {
            count,
            last_session: batch_last,
        })
    }

    pub async fn poll_once(&self, client: &FeedClient) -> Result<IngestOutcome, AppError> {
        let batch = client.fetch().await?;
        self.ingest(batch).await
    }

    /// Poll `client` every `interval` until `shutdown` flips. Failures are
    /// logged and retried on the next tick.
    pub async fn run(
        self: Arc<Self>,
        client: FeedClient,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            url = %client.url(),
            interval_ms = interval.as_millis() as u64,
            "Feed poll loop started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.poll_once(&client).await {
                        Ok(IngestOutcome::Empty) => {
                            tracing::warn!("Feed returned no records");
                        }
                        Ok(IngestOutcome::Initialized { count, last_session }) => {
                            tracing::info!(count, last_session, "Initial history loaded");
                        }
                        Ok(IngestOutcome::Appended { count, last_session }) => {
                            tracing::info!(count, last_session, "Appended new sessions");
                        }
                        Ok(IngestOutcome::Unchanged { last_session }) => {
                            tracing::debug!(last_session, "No new sessions");
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Feed poll failed");
                        }
                    }
                }
                _ = shutdown.changed() => {
                    tracing::info!("Feed poll loop shutting down");
                    break;
                }
            }
        }
    }

    pub async fn prediction_view(&self) -> PredictionView {
        let state = self.state.read().await;
        let manager = &state.manager;
        PredictionView {
            last_record: manager.last_record().cloned(),
            prediction: manager.current_prediction().cloned(),
            pattern: PatternSummary::from_history(manager.history()),
        }
    }

    /// Display buffer, newest first.
    pub async fn recent_records(&self) -> Vec<OutcomeRecord> {
        let state = self.state.read().await;
        state.recent.iter().rev().cloned().collect()
    }

    pub async fn strategy_views(&self) -> Vec<StrategyView> {
        let state = self.state.read().await;
        let manager = &state.manager;
        manager
            .weights()
            .iter()
            .map(|(id, weight)| {
                let stats = manager.stats().get(id);
                StrategyView {
                    id: id.to_string(),
                    weight,
                    stats,
                    hit_rate_percent: stats.hit_rate_percent(),
                }
            })
            .collect()
    }

    pub async fn history_len(&self) -> usize {
        self.state.read().await.manager.history().len()
    }
}
