use serde::Serialize;

use crate::features::{categories, runs};
use crate::model::{Category, OutcomeRecord};

pub const PATTERN_MIN_HISTORY: usize = 15;
pub const ALTERNATION_RUNS: usize = 6;
pub const LONG_RUN: usize = 5;

/// Compact description of the recent shape of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternSummary {
    pub last_15: String,
    pub run_value: Option<Category>,
    pub run_length: usize,
    pub alternating: bool,
    pub long_run: bool,
}

impl PatternSummary {
    pub fn placeholder() -> Self {
        Self {
            last_15: "n/a".to_string(),
            run_value: None,
            run_length: 0,
            alternating: false,
            long_run: false,
        }
    }

    pub fn from_history(history: &[OutcomeRecord]) -> Self {
        if history.len() < PATTERN_MIN_HISTORY {
            return Self::placeholder();
        }
        let cats = categories(history);
        let runs = runs(&cats);
        let Some(last) = runs.last().copied() else {
            return Self::placeholder();
        };

        let last_15 = cats[cats.len() - PATTERN_MIN_HISTORY..]
            .iter()
            .map(|c| c.code().to_ascii_lowercase())
            .collect();
        let alternating = runs.len() >= ALTERNATION_RUNS
            && runs[runs.len() - ALTERNATION_RUNS..]
                .iter()
                .all(|r| r.length == 1);

        Self {
            last_15,
            run_value: Some(last.value),
            run_length: last.length,
            alternating,
            long_run: last.length >= LONG_RUN,
        }
    }

    /// One-line rendering, e.g. `seq: hlhl... | run: high-2 | 1-1: off | run5+: off`.
    pub fn describe(&self) -> String {
        let run = match self.run_value {
            Some(v) => format!("{}-{}", v.as_display_str(), self.run_length),
            None => "none".to_string(),
        };
        format!(
            "seq: {} | run: {} | 1-1: {} | run5+: {}",
            self.last_15,
            run,
            on_off(self.alternating),
            on_off(self.long_run)
        )
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
