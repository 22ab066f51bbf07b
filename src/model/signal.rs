use super::outcome::Category;

/// A single strategy's opinion about the next outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    High,
    Low,
    Abstain,
}

impl Vote {
    pub fn category(self) -> Option<Category> {
        match self {
            Vote::High => Some(Category::High),
            Vote::Low => Some(Category::Low),
            Vote::Abstain => None,
        }
    }

    pub fn is_abstain(self) -> bool {
        self == Vote::Abstain
    }
}

impl From<Category> for Vote {
    fn from(category: Category) -> Self {
        match category {
            Category::High => Vote::High,
            Category::Low => Vote::Low,
        }
    }
}

impl From<Option<Category>> for Vote {
    fn from(category: Option<Category>) -> Self {
        category.map(Vote::from).unwrap_or(Vote::Abstain)
    }
}
