pub mod client;
pub mod coordinator;
pub mod types;

pub use client::{parse_payload, FeedClient};
pub use coordinator::{FeedCoordinator, IngestOutcome};
pub use types::{normalize, side_label, RawFeedItem};
