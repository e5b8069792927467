//! Running debit and credit totals of a detail table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_amount;
use crate::models::DetailRow;

/// Sums of every debit and every credit currently in the table.
///
/// Always rebuilt from the rows, never adjusted incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableTotals {
    pub debit: Decimal,
    pub credit: Decimal,
}

impl TableTotals {
    /// Sums the rows, treating empty or unparsable amounts as zero.
    ///
    /// Sums saturate at the bounds of [`Decimal`].
    pub fn from_rows(rows: &[DetailRow]) -> Self {
        rows.iter().fold(Self::default(), |totals, row| Self {
            debit: totals.debit.saturating_add(row.debit_amount()),
            credit: totals.credit.saturating_add(row.credit_amount()),
        })
    }

    /// Debits minus credits.
    pub fn difference(&self) -> Decimal {
        self.debit.saturating_sub(self.credit)
    }

    /// True when debits and credits match, as a saved transaction requires.
    pub fn is_balanced(&self) -> bool {
        self.difference().is_zero()
    }

    pub fn debit_display(&self) -> String {
        format_amount(self.debit)
    }

    pub fn credit_display(&self) -> String {
        format_amount(self.credit)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::DetailField;

    fn row(
        index: usize,
        debit: &str,
        credit: &str,
    ) -> DetailRow {
        let mut row = DetailRow::blank(index);
        row.set_value(DetailField::Debit, debit);
        row.set_value(DetailField::Credit, credit);
        row
    }

    #[test]
    fn from_rows_sums_and_skips_blanks() {
        let rows = vec![row(0, "10", "5"), row(1, "20", ""), row(2, "", "")];

        let totals = TableTotals::from_rows(&rows);

        assert_eq!(totals.debit_display(), "30.00");
        assert_eq!(totals.credit_display(), "5.00");
    }

    #[test]
    fn from_rows_of_empty_table_is_zero() {
        let totals = TableTotals::from_rows(&[]);

        assert_eq!(totals, TableTotals::default());
        assert_eq!(totals.debit_display(), "0.00");
    }

    #[test]
    fn from_rows_ignores_unparsable_amounts() {
        let rows = vec![row(0, "12.345", "oops"), row(1, "1,000", "0.655")];

        let totals = TableTotals::from_rows(&rows);

        assert_eq!(totals.debit, dec!(1012.345));
        assert_eq!(totals.credit, dec!(0.655));
        assert_eq!(totals.debit_display(), "1012.35");
        assert_eq!(totals.credit_display(), "0.66");
    }

    #[test]
    fn from_rows_with_huge_amount_does_not_overflow() {
        let rows = vec![
            row(0, "79228162514264337593543950335", ""),
            row(1, "1", ""),
        ];

        let totals = TableTotals::from_rows(&rows);

        assert_eq!(totals.debit, dec!(1));
    }

    #[test]
    fn from_rows_sums_many_rows_at_limit() {
        let rows: Vec<DetailRow> = (0..1_000)
            .map(|i| row(i, "1,000,000,000,000,000", ""))
            .collect();

        let totals = TableTotals::from_rows(&rows);

        assert_eq!(totals.debit, dec!(1000000000000000000));
        assert_eq!(totals.difference(), totals.debit);
    }

    #[test]
    fn is_balanced_when_debits_equal_credits() {
        let totals = TableTotals::from_rows(&[row(0, "100", ""), row(1, "", "100.00")]);

        assert!(totals.is_balanced());
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn difference_is_debits_minus_credits() {
        let totals = TableTotals::from_rows(&[row(0, "40", ""), row(1, "", "100")]);

        assert!(!totals.is_balanced());
        assert_eq!(totals.difference(), dec!(-60));
    }
}
