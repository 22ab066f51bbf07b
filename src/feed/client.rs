use std::time::Duration;

use crate::error::AppError;
use crate::model::OutcomeRecord;

use super::types::{normalize, RawFeedItem};

pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current results page, normalized and sorted ascending.
    pub async fn fetch(&self) -> Result<Vec<OutcomeRecord>, AppError> {
        let resp = self.http.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::FeedStatus {
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        parse_payload(&body)
    }
}

/// The body must be a JSON array. Items that do not fit [`RawFeedItem`] are
/// logged and skipped so one bad entry never hides the rest of the page.
pub fn parse_payload(body: &str) -> Result<Vec<OutcomeRecord>, AppError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let items: Vec<RawFeedItem> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawFeedItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping undecodable feed item");
                None
            }
        })
        .collect();
    Ok(normalize(&items))
}
