use rust_decimal::Decimal;

use crate::models::{Category, ExpenseLedger};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MonthlySummary {
    pub(crate) income: Decimal,
    pub(crate) total_expenses: Decimal,
    pub(crate) savings: Decimal,
}

impl MonthlySummary {
    pub(crate) fn new(income: Decimal, ledger: &ExpenseLedger) -> Self {
        let total_expenses = ledger.total();
        Self {
            income,
            total_expenses,
            savings: income - total_expenses,
        }
    }
}

/// Change in total spending against the previous month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SpendingDelta {
    /// Spending fell by this many percent.
    Decreased(Decimal),
    /// Spending rose by this many percent.
    Increased(Decimal),
    Unchanged,
}

impl SpendingDelta {
    pub(crate) fn message(&self) -> String {
        match self {
            Self::Decreased(pct) => format!(
                "Good job, spending decreased by {:.1}% vs last month.",
                pct
            ),
            Self::Increased(pct) => {
                format!("Spending increased by {:.1}% vs last month.", pct)
            }
            Self::Unchanged => "Spending is unchanged vs last month.".to_string(),
        }
    }
}

/// A rise too large to represent saturates at `Decimal::MAX` percent.
pub(crate) fn month_delta(last: Decimal, current: Decimal) -> SpendingDelta {
    if last.is_zero() {
        return SpendingDelta::Unchanged;
    }
    let Some(pct) = last
        .checked_sub(current)
        .and_then(|diff| diff.checked_div(last))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return SpendingDelta::Increased(Decimal::MAX);
    };
    if pct > Decimal::ZERO {
        SpendingDelta::Decreased(pct)
    } else if pct < Decimal::ZERO {
        SpendingDelta::Increased(pct.abs())
    } else {
        SpendingDelta::Unchanged
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IncomeAlert {
    OverIncome,
    NearLimit,
    WithinRange,
}

impl IncomeAlert {
    pub(crate) fn message(&self) -> &'static str {
        match self {
            Self::OverIncome => {
                "Warning: your expenses are higher than income. Consider reducing discretionary spending."
            }
            Self::NearLimit => "You are close to your income limit. Review expenses.",
            Self::WithinRange => "Your spending looks within your income range.",
        }
    }
}

pub(crate) fn income_alert(summary: &MonthlySummary) -> IncomeAlert {
    let near_limit = summary.income * Decimal::new(9, 1);
    if summary.total_expenses > summary.income {
        IncomeAlert::OverIncome
    } else if summary.total_expenses > near_limit {
        IncomeAlert::NearLimit
    } else {
        IncomeAlert::WithinRange
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tip {
    ShoppingHeavy,
}

impl Tip {
    pub(crate) fn message(&self) -> &'static str {
        match self {
            Self::ShoppingHeavy => {
                "Tip: Shopping is a large part of your spending. Consider a 10% cut and see the monthly savings."
            }
        }
    }
}

pub(crate) fn spending_tips(ledger: &ExpenseLedger) -> Vec<Tip> {
    let mut tips = Vec::new();
    if ledger.total() > Decimal::ZERO && ledger.share(Category::Shopping) > Decimal::new(3, 1) {
        tips.push(Tip::ShoppingHeavy);
    }
    tips
}
