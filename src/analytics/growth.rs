use rust_decimal::prelude::ToPrimitive;

use crate::models::Investment;

/// Monthly rate equivalent to a nominal annual rate under monthly compounding.
pub(crate) fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Value after each month for `years * 12` months, starting from `principal`.
pub(crate) fn growth_curve(principal: f64, annual_rate: f64, years: u32) -> Vec<f64> {
    let rate = monthly_rate(annual_rate);
    let months = years as usize * 12;
    let mut values = Vec::with_capacity(months);
    let mut value = principal;
    for _ in 0..months {
        value *= 1.0 + rate;
        values.push(value);
    }
    values
}

/// Combined monthly value of every instrument.
///
/// The curve spans the longest instrument; shorter ones hold their final value
/// once their term ends.
pub(crate) fn portfolio_curve(portfolio: &[Investment]) -> Vec<f64> {
    let months = portfolio.iter().map(|p| p.years as usize * 12).max().unwrap_or(0);
    let mut combined = vec![0.0; months];

    for item in portfolio {
        let principal = item.principal.to_f64().unwrap_or(0.0);
        let curve = growth_curve(principal, item.annual_rate_pct / 100.0, item.years);
        let last = curve.last().copied().unwrap_or(principal);
        for (i, slot) in combined.iter_mut().enumerate() {
            *slot += curve.get(i).copied().unwrap_or(last);
        }
    }

    combined
}
