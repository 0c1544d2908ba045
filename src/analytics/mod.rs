mod benchmark;
mod forecast;
mod growth;
mod summary;

pub(crate) use benchmark::{compare, percent_deviation, Band, Insight};
pub(crate) use forecast::{forecast, Trend};
pub(crate) use growth::{growth_curve, portfolio_curve};
pub(crate) use summary::{
    income_alert, month_delta, spending_tips, IncomeAlert, MonthlySummary, SpendingDelta, Tip,
};



#[cfg(test)]
#[path = "growth_tests.rs"]
mod growth_tests;
