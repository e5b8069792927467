//! Calculations behind the ledger forms.
//!
//! Withholding projections for the tax calculator form and the running
//! debit/credit totals of the transaction detail table.

pub mod common;
pub mod totals;
pub mod withholding;

pub use totals::TableTotals;
pub use withholding::WithholdingCalculator;
