mod detail_row;
mod months_remaining;
mod withholding;

pub use detail_row::{DetailField, DetailRow};
pub use months_remaining::{MonthsRemaining, MonthsRemainingError};
pub use withholding::{JurisdictionFigures, WithholdingInputs, WithholdingResults};
