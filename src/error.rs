use thiserror::Error;

use crate::history::HistoryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned status {status}")]
    FeedStatus { status: u16 },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history error: {0}")]
    History(#[from] HistoryError),
}
