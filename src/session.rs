use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics::{month_delta, MonthlySummary, SpendingDelta};
use crate::categorize::classify;
use crate::models::{Category, ExpenseLedger, HistorySeries, Investment};
use crate::voice::VoiceEntry;

pub(crate) const DEFAULT_INCOME: i64 = 50000;

/// Everything the user entered during this run. Nothing here outlives the
/// process.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    income: Decimal,
    ledger: ExpenseLedger,
    notes: Vec<String>,
    portfolio: Vec<Investment>,
    last_month_total: Option<Decimal>,
    history: HistorySeries,
}

impl Session {
    pub(crate) fn new(income: Decimal) -> Self {
        Self {
            income,
            ledger: ExpenseLedger::new(),
            notes: Vec::new(),
            portfolio: Vec::new(),
            last_month_total: None,
            history: HistorySeries::default(),
        }
    }

    pub(crate) fn income(&self) -> Decimal {
        self.income
    }

    pub(crate) fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    pub(crate) fn notes(&self) -> &[String] {
        &self.notes
    }

    pub(crate) fn portfolio(&self) -> &[Investment] {
        &self.portfolio
    }

    pub(crate) fn history(&self) -> &HistorySeries {
        &self.history
    }

    pub(crate) fn summary(&self) -> MonthlySummary {
        MonthlySummary::new(self.income, &self.ledger)
    }

    pub(crate) fn set_income(&mut self, income: Decimal) -> Result<()> {
        if income < Decimal::ZERO {
            anyhow::bail!("Income cannot be negative: {income}");
        }
        self.income = income;
        tracing::debug!(%income, "income updated");
        Ok(())
    }

    pub(crate) fn set_expense(&mut self, category: Category, amount: Decimal) -> Result<()> {
        self.ledger.set(category, amount)?;
        tracing::debug!(%category, %amount, "expense set");
        Ok(())
    }

    /// Classify `description` and add `amount` to the matching category.
    pub(crate) fn add_expense(&mut self, description: &str, amount: Decimal) -> Result<Category> {
        if description.trim().is_empty() || amount <= Decimal::ZERO {
            anyhow::bail!("Provide description and amount");
        }
        let category = classify(description);
        self.ledger.add(category, amount)?;
        tracing::debug!(%category, %amount, "expense added");
        Ok(category)
    }

    /// Add a transcribed expense. A zero amount means nothing was detected and
    /// is refused.
    pub(crate) fn record_voice_entry(&mut self, entry: &VoiceEntry) -> Result<Category> {
        if !entry.has_amount() {
            anyhow::bail!("No amount detected in transcription. Edit text or use manual entry.");
        }
        self.ledger.add(entry.category, entry.amount)?;
        tracing::debug!(category = %entry.category, amount = %entry.amount, "voice expense added");
        Ok(entry.category)
    }

    pub(crate) fn add_note(&mut self, note: &str) -> Result<()> {
        let note = note.trim();
        if note.is_empty() {
            anyhow::bail!("Note is empty");
        }
        self.notes.push(note.to_string());
        Ok(())
    }

    pub(crate) fn add_investment(&mut self, investment: Investment) {
        tracing::debug!(name = %investment.name, "investment added");
        self.portfolio.push(investment);
    }

    /// Seed the demo history from the current total the first time it is
    /// needed. Later calls keep the existing series.
    pub(crate) fn ensure_history(&mut self, months: usize) -> &HistorySeries {
        if self.history.is_empty() {
            let base = self.ledger.total().to_f64().unwrap_or(0.0);
            self.history = HistorySeries::seeded(base, months);
        }
        &self.history
    }

    /// Compare this month's total with the cached previous total, then cache
    /// this month's total for the next comparison.
    ///
    /// Without a previous total, one is assumed at 80% of the current total
    /// (at least 1).
    pub(crate) fn roll_month_delta(&mut self) -> SpendingDelta {
        let current = self.ledger.total();
        let last = self
            .last_month_total
            .unwrap_or_else(|| (current * Decimal::new(8, 1)).max(Decimal::ONE));
        self.last_month_total = Some(current);
        month_delta(last, current)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Decimal::from(DEFAULT_INCOME))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
