use serde::{Deserialize, Serialize};

/// Upper bound the form framework applies when none is configured.
pub const DEFAULT_MAX_NUM_FORMS: usize = 1000;

/// A transaction needs at least one debit line and one credit line.
pub const TRANSACTION_MIN_ROWS: usize = 2;

/// Blank rows offered past the minimum when entering a new transaction.
pub const TRANSACTION_EXTRA_ROWS: usize = 10;

/// Counters submitted alongside the rows so the receiving framework knows
/// how many repeated entries to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementForm {
    /// Rows currently in the table.
    pub total_forms: usize,
    /// Rows that were loaded from existing records.
    pub initial_forms: usize,
    pub min_num_forms: usize,
    pub max_num_forms: usize,
}

impl Default for ManagementForm {
    fn default() -> Self {
        Self {
            total_forms: 0,
            initial_forms: 0,
            min_num_forms: 0,
            max_num_forms: DEFAULT_MAX_NUM_FORMS,
        }
    }
}

impl ManagementForm {
    /// Counters of the entry form for a new transaction.
    pub fn for_new_transaction() -> Self {
        Self {
            total_forms: TRANSACTION_MIN_ROWS + TRANSACTION_EXTRA_ROWS,
            min_num_forms: TRANSACTION_MIN_ROWS,
            ..Self::default()
        }
    }

    /// Whether another row may be added without passing `max_num_forms`.
    pub fn has_room(&self) -> bool {
        self.total_forms < self.max_num_forms
    }

    pub(crate) fn increment(&mut self) {
        self.total_forms += 1;
    }

    pub(crate) fn decrement(&mut self) {
        self.total_forms = self.total_forms.saturating_sub(1);
    }
}
