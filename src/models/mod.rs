mod category;
mod history;
mod investment;
mod ledger;

pub use category::Category;
pub use history::HistorySeries;
pub use investment::{Investment, MAX_YEARS};
pub use ledger::{BenchmarkTable, ExpenseLedger};
