#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::growth::monthly_rate;
use super::*;
use crate::models::Investment;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ── monthly_rate ──────────────────────────────────────────────

#[test]
fn test_monthly_rate_compounds_to_annual() {
    let rate = monthly_rate(0.06);
    assert!(close((1.0 + rate).powi(12), 1.06));
    // Compounded, not simple division by 12
    assert!(rate < 0.06 / 12.0);
}

#[test]
fn test_monthly_rate_zero() {
    assert_eq!(monthly_rate(0.0), 0.0);
}

// ── growth_curve ──────────────────────────────────────────────

#[test]
fn test_growth_curve_length() {
    assert_eq!(growth_curve(1000.0, 0.06, 3).len(), 36);
}

#[test]
fn test_growth_curve_reaches_annual_rate_each_year() {
    let curve = growth_curve(1000.0, 0.10, 2);
    assert!(close(curve[11], 1100.0));
    assert!(close(curve[23], 1210.0));
}

#[test]
fn test_growth_curve_first_month_already_grown() {
    let curve = growth_curve(1000.0, 0.12, 1);
    assert!(curve[0] > 1000.0);
}

#[test]
fn test_growth_curve_zero_rate_is_flat() {
    let curve = growth_curve(500.0, 0.0, 1);
    assert!(curve.iter().all(|v| *v == 500.0));
}

// ── portfolio_curve ───────────────────────────────────────────

#[test]
fn test_portfolio_curve_empty() {
    assert!(portfolio_curve(&[]).is_empty());
}

#[test]
fn test_portfolio_curve_pads_shorter_instruments() {
    let portfolio = vec![
        Investment::new("Bonds".into(), dec!(1000), 10.0, 1).unwrap(),
        Investment::new("Stocks".into(), dec!(2000), 0.0, 2).unwrap(),
    ];
    let curve = portfolio_curve(&portfolio);
    assert_eq!(curve.len(), 24);
    // Bonds end at 1100 after a year, then hold
    assert!(close(curve[11], 3100.0));
    assert!(close(curve[23], 3100.0));
}

#[test]
fn test_portfolio_curve_single_matches_growth_curve() {
    let item = Investment::new("Fund".into(), dec!(5000), 6.0, 3).unwrap();
    let expected = growth_curve(5000.0, 0.06, 3);
    let curve = portfolio_curve(&[item]);
    assert_eq!(curve.len(), expected.len());
    for (a, b) in curve.iter().zip(expected.iter()) {
        assert!(close(*a, *b));
    }
}
