use thiserror::Error;
use tracing::debug;

use crate::calculations::TableTotals;
use crate::details::ManagementForm;
use crate::models::{DetailField, DetailRow};

/// Form prefix the ledger uses for transaction detail rows.
pub const DEFAULT_PREFIX: &str = "details";

/// Reasons a table operation was not applied. The table is unchanged
/// whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetailTableError {
    /// There is no last row to use as the template for a new one.
    #[error("detail table has no rows to copy")]
    EmptyTable,

    #[error("no detail row at index {0}")]
    RowNotFound(usize),

    /// Deleting is disabled while one row or fewer remains.
    #[error("the last detail row cannot be deleted")]
    LastRowProtected,

    #[error("detail table already holds the maximum of {0} rows")]
    MaxRowsReached(usize),
}

/// Detail rows of one transaction together with the row counter, delete
/// availability and the displayed totals.
///
/// Row indices always run `0..len()` in order, and
/// `management().total_forms` always equals `len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTable {
    prefix: String,
    rows: Vec<DetailRow>,
    management: ManagementForm,
    delete_enabled: bool,
    totals: TableTotals,
}

impl DetailTable {
    /// Builds a table from `rows`, renumbering them by position.
    pub fn new(
        prefix: impl Into<String>,
        rows: Vec<DetailRow>,
    ) -> Self {
        Self::with_management(prefix, rows, ManagementForm::default())
    }

    /// The blank entry table for a new transaction, limited to `max_rows`.
    pub fn for_new_transaction(
        prefix: impl Into<String>,
        max_rows: usize,
    ) -> Self {
        let management = ManagementForm {
            max_num_forms: max_rows,
            ..ManagementForm::for_new_transaction()
        };
        let count = management.total_forms.min(max_rows);
        Self::with_management(prefix, (0..count).map(DetailRow::blank).collect(), management)
    }

    /// Builds a table keeping the limits of an existing management form.
    ///
    /// `total_forms` is taken from the rows, not from `management`.
    pub fn with_management(
        prefix: impl Into<String>,
        rows: Vec<DetailRow>,
        management: ManagementForm,
    ) -> Self {
        let mut table = Self {
            prefix: prefix.into(),
            rows,
            management,
            delete_enabled: false,
            totals: TableTotals::default(),
        };
        table.reindex();
        table.management.total_forms = table.rows.len();
        table.check_delete_button_disabled_status();
        table.recompute_totals();
        table
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }

    pub fn row(
        &self,
        index: usize,
    ) -> Option<&DetailRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn management(&self) -> &ManagementForm {
        &self.management
    }

    /// Totals as of the last recomputation.
    pub fn totals(&self) -> &TableTotals {
        &self.totals
    }

    pub fn delete_enabled(&self) -> bool {
        self.delete_enabled
    }

    /// Appends a blank row after the last one and returns its index.
    ///
    /// # Errors
    ///
    /// * [`DetailTableError::EmptyTable`] when there is no row to copy.
    /// * [`DetailTableError::MaxRowsReached`] when the management form is full.
    pub fn add_row(&mut self) -> Result<usize, DetailTableError> {
        let template = self.rows.last().ok_or(DetailTableError::EmptyTable)?;
        if !self.management.has_room() {
            return Err(DetailTableError::MaxRowsReached(
                self.management.max_num_forms,
            ));
        }

        let row = template.blank_successor();
        let index = row.index;
        self.rows.push(row);
        self.management.increment();
        self.check_delete_button_disabled_status();
        self.recompute_totals();

        debug!(
            prefix = %self.prefix,
            index,
            total_forms = self.management.total_forms,
            "detail row added"
        );
        Ok(index)
    }

    /// Removes the row at `index`; later rows move up one index.
    ///
    /// # Errors
    ///
    /// * [`DetailTableError::RowNotFound`] when `index` is out of range.
    /// * [`DetailTableError::LastRowProtected`] while deleting is disabled.
    pub fn remove_row(
        &mut self,
        index: usize,
    ) -> Result<DetailRow, DetailTableError> {
        if index >= self.rows.len() {
            return Err(DetailTableError::RowNotFound(index));
        }
        if !self.delete_enabled {
            return Err(DetailTableError::LastRowProtected);
        }

        let removed = self.rows.remove(index);
        self.reindex();
        self.management.decrement();
        self.check_delete_button_disabled_status();
        self.recompute_totals();

        debug!(
            prefix = %self.prefix,
            index,
            total_forms = self.management.total_forms,
            "detail row removed"
        );
        Ok(removed)
    }

    /// Changes one control of one row and refreshes the totals.
    pub fn set_field(
        &mut self,
        index: usize,
        field: DetailField,
        value: impl Into<String>,
    ) -> Result<TableTotals, DetailTableError> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(DetailTableError::RowNotFound(index))?;
        row.set_value(field, value);

        Ok(self.recompute_totals())
    }

    /// Re-evaluates delete availability and returns `true` when deleting
    /// is disabled, which is the case with one row or none.
    pub fn check_delete_button_disabled_status(&mut self) -> bool {
        self.delete_enabled = self.rows.len() > 1;
        !self.delete_enabled
    }

    /// Rebuilds the debit and credit totals from the current rows.
    pub fn recompute_totals(&mut self) -> TableTotals {
        self.totals = TableTotals::from_rows(&self.rows);
        self.totals
    }

    fn reindex(&mut self) {
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.index = position;
        }
    }
}
