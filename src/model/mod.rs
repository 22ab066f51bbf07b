pub mod outcome;
pub mod prediction;
pub mod signal;

pub use outcome::{Category, OutcomeRecord, HIGH_THRESHOLD};
pub use prediction::Prediction;
pub use signal::Vote;
