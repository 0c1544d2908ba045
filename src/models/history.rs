/// Monthly expense totals, oldest first. Month `i + 1` is `values()[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySeries {
    values: Vec<f64>,
}

impl HistorySeries {
    /// Demo history ramping up to roughly the current total:
    /// `max(0, base * (0.8 + 0.08 * i))` for each month `i`.
    pub fn seeded(base: f64, months: usize) -> Self {
        let values = (0..months)
            .map(|i| (base * (0.8 + 0.08 * i as f64)).max(0.0))
            .collect();
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
