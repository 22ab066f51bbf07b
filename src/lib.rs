//! Adaptive ensemble predictor for a stream of High/Low dice outcomes.
//!
//! ```text
//! feed (poll) -> normalize -> FeedCoordinator -> HistoryManager -> Ensemble
//!                                   |                               |
//!                               read API  <----- Prediction --------+
//! ```

pub mod api;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod error_log;
pub mod features;
pub mod feed;
pub mod history;
pub mod model;
pub mod pattern;
pub mod strategy;
pub mod strategy_stats;
