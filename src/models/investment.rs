use anyhow::Result;
use rust_decimal::Decimal;

pub const MAX_YEARS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Investment {
    pub name: String,
    pub principal: Decimal,
    /// Expected nominal annual return, in percent.
    pub annual_rate_pct: f64,
    pub years: u32,
}

impl Investment {
    pub fn new(name: String, principal: Decimal, annual_rate_pct: f64, years: u32) -> Result<Self> {
        let name = name.trim().to_string();
        if name.is_empty() {
            anyhow::bail!("Instrument name is required");
        }
        if principal <= Decimal::ZERO {
            anyhow::bail!("Principal must be positive, got {principal}");
        }
        if !(0.0..=100.0).contains(&annual_rate_pct) {
            anyhow::bail!("Annual return must be between 0 and 100%, got {annual_rate_pct}");
        }
        if !(1..=MAX_YEARS).contains(&years) {
            anyhow::bail!("Years must be between 1 and {MAX_YEARS}, got {years}");
        }
        Ok(Self {
            name,
            principal,
            annual_rate_pct,
            years,
        })
    }
}

impl std::fmt::Display for Investment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} @ {}% for {} years",
            self.name, self.principal, self.annual_rate_pct, self.years
        )
    }
}
