use crate::model::{Category, OutcomeRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub value: Category,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub high: usize,
    pub low: usize,
}

impl CategoryCounts {
    pub fn of(categories: &[Category]) -> Self {
        categories
            .iter()
            .fold(Self::default(), |mut acc, c| {
                match c {
                    Category::High => acc.high += 1,
                    Category::Low => acc.low += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.high + self.low
    }
}

/// Summary statistics over a history prefix. Empty input yields zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    pub counts: CategoryCounts,
    pub runs: Vec<Run>,
    pub longest_run: usize,
    pub mean_total: f64,
    pub std_total: f64,
    pub entropy: f64,
}

impl FeatureSet {
    pub fn extract(history: &[OutcomeRecord]) -> Self {
        let categories = categories(history);
        let totals: Vec<f64> = history.iter().map(|r| r.total as f64).collect();
        let runs = runs(&categories);
        let longest_run = runs.iter().map(|r| r.length).max().unwrap_or(0);
        let mean_total = mean(&totals);
        let std_total = std_dev(&totals, mean_total);

        Self {
            counts: CategoryCounts::of(&categories),
            runs,
            longest_run,
            mean_total,
            std_total,
            entropy: entropy(&categories),
        }
    }

    pub fn last_run(&self) -> Option<Run> {
        self.runs.last().copied()
    }
}

pub fn categories(history: &[OutcomeRecord]) -> Vec<Category> {
    history.iter().map(|r| r.category).collect()
}

/// Maximal runs of identical categories, oldest first.
pub fn runs(categories: &[Category]) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::new();
    for &c in categories {
        match out.last_mut() {
            Some(run) if run.value == c => run.length += 1,
            _ => out.push(Run {
                value: c,
                length: 1,
            }),
        }
    }
    out
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a precomputed mean.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Shannon entropy (bits) of the category distribution.
pub fn entropy(categories: &[Category]) -> f64 {
    let counts = CategoryCounts::of(categories);
    let n = counts.total();
    if n == 0 {
        return 0.0;
    }
    [counts.high, counts.low]
        .into_iter()
        .filter(|&k| k > 0)
        .map(|k| {
            let p = k as f64 / n as f64;
            -p * p.log2()
        })
        .sum()
}

/// Fraction of positions at which two equal-length windows agree.
/// Windows of different length score zero.
pub fn similarity(a: &[Category], b: &[Category]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let matches = a.iter().zip(b).filter(|(x, y)| x == y).count();
    matches as f64 / a.len() as f64
}
