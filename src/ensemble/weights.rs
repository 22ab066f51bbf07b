/// Strategy id → weight. Kept normalized to sum 1 with every entry at or
/// above `min_weight`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    ids: Vec<String>,
    weights: Vec<f64>,
    min_weight: f64,
}

impl WeightTable {
    /// Uniform table over `ids`, in the given order.
    pub fn uniform<I, S>(ids: I, min_weight: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let weights = vec![1.0; ids.len()];
        let mut table = Self {
            ids,
            weights,
            min_weight,
        };
        table.normalize();
        table
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.index_of(id).map(|i| self.weights[i])
    }

    pub fn weight_at(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.ids
            .iter()
            .map(String::as_str)
            .zip(self.weights.iter().copied())
    }

    /// Replace every weight with `raw[i]` (positional, same order as the ids)
    /// and renormalize.
    pub fn assign(&mut self, raw: &[f64]) {
        for (slot, &value) in self.weights.iter_mut().zip(raw) {
            *slot = if value.is_finite() { value.max(0.0) } else { 0.0 };
        }
        self.normalize();
    }

    /// Rescale so the table sums to 1 while no entry sits below
    /// `min_weight`. Entries that would fall under the floor are pinned to it
    /// and the remaining mass is shared proportionally among the rest.
    pub fn normalize(&mut self) {
        let n = self.weights.len();
        if n == 0 {
            return;
        }
        let floor = self.min_weight.clamp(0.0, 1.0 / n as f64);
        let mut pinned = vec![false; n];

        loop {
            let pinned_count = pinned.iter().filter(|p| **p).count();
            let free_count = n - pinned_count;
            let free_mass = 1.0 - floor * pinned_count as f64;
            let free_sum: f64 = self
                .weights
                .iter()
                .zip(&pinned)
                .filter(|(_, p)| !**p)
                .map(|(w, _)| *w)
                .sum();

            let mut changed = false;
            for (w, p) in self.weights.iter_mut().zip(pinned.iter_mut()) {
                if *p {
                    *w = floor;
                    continue;
                }
                let scaled = if free_sum > 0.0 {
                    *w / free_sum * free_mass
                } else {
                    free_mass / free_count as f64
                };
                if scaled < floor {
                    *p = true;
                    *w = floor;
                    changed = true;
                } else {
                    *w = scaled;
                }
            }
            if !changed {
                return;
            }
        }
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|x| x == id)
    }
}
