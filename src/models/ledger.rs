use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::Category;

/// Spend per category for the current month. Amounts are never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseLedger {
    amounts: BTreeMap<Category, Decimal>,
}

impl ExpenseLedger {
    /// A ledger with every category present at zero.
    pub fn new() -> Self {
        let amounts = Category::all()
            .iter()
            .map(|c| (*c, Decimal::ZERO))
            .collect();
        Self { amounts }
    }

    /// A ledger holding only the given entries. Used where absent categories
    /// must stay absent, e.g. ad-hoc comparisons from the command line.
    pub fn from_entries(entries: &[(Category, Decimal)]) -> Result<Self> {
        let mut ledger = Self {
            amounts: BTreeMap::new(),
        };
        for &(category, amount) in entries {
            ledger.add(category, amount)?;
        }
        Ok(ledger)
    }

    pub fn get(&self, category: Category) -> Decimal {
        self.amounts.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, category: Category, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            anyhow::bail!("Amount for {category} cannot be negative: {amount}");
        }
        self.ensure_total_fits(category, amount)?;
        self.amounts.insert(category, amount);
        Ok(())
    }

    pub fn add(&mut self, category: Category, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            anyhow::bail!("Cannot add a negative amount to {category}: {amount}");
        }
        let Some(next) = self.get(category).checked_add(amount) else {
            anyhow::bail!("Amount for {category} is too large");
        };
        self.ensure_total_fits(category, next)?;
        self.amounts.insert(category, next);
        Ok(())
    }

    /// Sum of every category. Cannot overflow: `set` and `add` refuse any
    /// change whose total would not fit.
    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }

    /// Fails when the total with `category` at `amount` would overflow.
    fn ensure_total_fits(&self, category: Category, amount: Decimal) -> Result<()> {
        let fits = self
            .amounts
            .iter()
            .filter(|(c, _)| **c != category)
            .try_fold(amount, |acc, (_, a)| acc.checked_add(*a))
            .is_some();
        if !fits {
            anyhow::bail!("Total expenses would be too large");
        }
        Ok(())
    }

    /// Fraction of the total spent on `category`, or zero when nothing was spent.
    pub fn share(&self, category: Category) -> Decimal {
        let total = self.total();
        if total.is_zero() {
            return Decimal::ZERO;
        }
        self.get(category) / total
    }

    /// Entries in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.amounts.iter().map(|(c, a)| (*c, *a))
    }
}

impl Default for ExpenseLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference spend per category. Only read by comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTable {
    amounts: BTreeMap<Category, Decimal>,
}

impl BenchmarkTable {
    pub fn new(entries: &[(Category, Decimal)]) -> Self {
        Self {
            amounts: entries.iter().copied().collect(),
        }
    }

    pub fn get(&self, category: Category) -> Option<Decimal> {
        self.amounts.get(&category).copied()
    }

    /// Returns a copy with `category` replaced.
    pub fn with(mut self, category: Category, amount: Decimal) -> Self {
        self.amounts.insert(category, amount);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.amounts.iter().map(|(c, a)| (*c, *a))
    }
}

impl Default for BenchmarkTable {
    /// Average-household demo figures.
    fn default() -> Self {
        Self::new(&[
            (Category::Food, Decimal::from(15000)),
            (Category::Transport, Decimal::from(7000)),
            (Category::Housing, Decimal::from(20000)),
            (Category::Shopping, Decimal::from(8000)),
            (Category::Entertainment, Decimal::from(3000)),
            (Category::Other, Decimal::from(2000)),
        ])
    }
}
