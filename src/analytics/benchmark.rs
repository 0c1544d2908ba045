use rust_decimal::Decimal;

use crate::models::{BenchmarkTable, Category, ExpenseLedger};

/// Deviation (in percent) a category must exceed before it is reported.
const BAND_THRESHOLD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Band {
    Above,
    Below,
}

impl Band {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Above => "spends more than benchmark",
            Self::Below => "spends less than benchmark",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Insight {
    pub(crate) category: Category,
    pub(crate) percent_deviation: Decimal,
    pub(crate) band: Band,
}

impl Insight {
    pub(crate) fn message(&self) -> String {
        let pct = self.percent_deviation.abs().round();
        match self.band {
            Band::Above => format!(
                "You spend {pct}% more on {} than the benchmark.",
                self.category
            ),
            Band::Below => format!(
                "You spend {pct}% less on {} than the benchmark.",
                self.category
            ),
        }
    }
}

/// Percentage deviation of `spend` from `benchmark`, or `None` when the
/// benchmark is zero. A deviation too large to represent saturates at
/// `Decimal::MAX` (or `Decimal::MIN`).
pub(crate) fn percent_deviation(spend: Decimal, benchmark: Decimal) -> Option<Decimal> {
    if benchmark.is_zero() {
        return None;
    }
    let pct = spend
        .checked_sub(benchmark)
        .and_then(|diff| diff.checked_div(benchmark))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
    Some(pct.unwrap_or(if spend > benchmark {
        Decimal::MAX
    } else {
        Decimal::MIN
    }))
}

/// Compare each ledger category against the benchmark.
///
/// Categories without a (non-zero) benchmark are skipped. Deviations inside
/// `[-20, 20]` are considered normal and produce no insight.
pub(crate) fn compare(spend: &ExpenseLedger, benchmark: &BenchmarkTable) -> Vec<Insight> {
    spend
        .iter()
        .filter_map(|(category, amount)| {
            let reference = benchmark.get(category)?;
            let pct = percent_deviation(amount, reference)?;
            let band = if pct > BAND_THRESHOLD {
                Band::Above
            } else if pct < -BAND_THRESHOLD {
                Band::Below
            } else {
                return None;
            };
            Some(Insight {
                category,
                percent_deviation: pct,
                band,
            })
        })
        .collect()
}
