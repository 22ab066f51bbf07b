use std::fmt;

use serde::Serialize;

/// Totals at or above this value classify as [`Category::High`].
pub const HIGH_THRESHOLD: u8 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    High,
    Low,
}

impl Category {
    pub fn from_total(total: u8) -> Self {
        if total >= HIGH_THRESHOLD {
            Category::High
        } else {
            Category::Low
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Category::High => Category::Low,
            Category::Low => Category::High,
        }
    }

    /// Single-letter code used in compact pattern strings.
    pub fn code(self) -> char {
        match self {
            Category::High => 'H',
            Category::Low => 'L',
        }
    }

    pub fn as_display_str(self) -> &'static str {
        match self {
            Category::High => "high",
            Category::Low => "low",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::High => write!(f, "HIGH"),
            Category::Low => write!(f, "LOW"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeRecord {
    pub session_id: u64,
    pub dice: [u8; 3],
    pub total: u8,
    /// Always derived from `total`; strategies only ever read this.
    pub category: Category,
    /// Upstream side flag. Display only.
    pub side_label: Option<Category>,
}

impl OutcomeRecord {
    pub fn new(session_id: u64, dice: [u8; 3]) -> Self {
        // Saturates for out-of-range dice; the feed validates ranges before this.
        let total = dice.iter().fold(0u8, |acc, d| acc.saturating_add(*d));
        Self {
            session_id,
            dice,
            total,
            category: Category::from_total(total),
            side_label: None,
        }
    }

    pub fn with_side_label(mut self, side_label: Option<Category>) -> Self {
        self.side_label = side_label;
        self
    }

    pub fn display_category(&self) -> Category {
        self.side_label.unwrap_or(self.category)
    }
}
