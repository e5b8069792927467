//! The transaction detail table: an ordered set of line items that grows
//! and shrinks while the row counter read by the form framework follows.

mod management;
mod table;

pub use management::{
    DEFAULT_MAX_NUM_FORMS, ManagementForm, TRANSACTION_EXTRA_ROWS, TRANSACTION_MIN_ROWS,
};
pub use table::{DEFAULT_PREFIX, DetailTable, DetailTableError};
