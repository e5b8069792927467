pub mod calculations;
pub mod details;
pub mod models;

pub use calculations::{TableTotals, WithholdingCalculator};
pub use details::{DetailTable, DetailTableError, ManagementForm};
pub use models::*;
