/// Least-squares line `y = slope * x + intercept` over `(index, value)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Trend {
    pub(crate) slope: f64,
    pub(crate) intercept: f64,
}

impl Trend {
    /// Fit a line to `values` indexed `0..n`. Needs at least two points.
    pub(crate) fn fit(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }

        let n = values.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        // Distinct integer x values keep this strictly positive for n >= 2.
        let denom = n * sum_xx - sum_x * sum_x;
        let slope = (n * sum_xy - sum_x * sum_y) / denom;
        let intercept = (sum_y - slope * sum_x) / n;

        Some(Self { slope, intercept })
    }

    pub(crate) fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Project `horizon` future months from `history`.
///
/// With fewer than two points there is no trend, so the last known value (or
/// zero) is repeated. Otherwise the fitted line is evaluated at the indices
/// following the history. Spending cannot go below zero, so every value is
/// clamped.
pub(crate) fn forecast(history: &[f64], horizon: usize) -> Vec<f64> {
    let Some(trend) = Trend::fit(history) else {
        let last = history.last().copied().unwrap_or(0.0).max(0.0);
        return vec![last; horizon];
    };

    let start = history.len();
    (start..start + horizon)
        .map(|x| trend.at(x as f64).max(0.0))
        .collect()
}
