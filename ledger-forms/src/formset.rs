//! The repeated-form ("formset") convention for transaction detail rows.
//!
//! A submission carries a management block followed by one group of
//! controls per row:
//!
//! | Name | Meaning |
//! |------|---------|
//! | `<prefix>-TOTAL_FORMS`    | Number of rows submitted |
//! | `<prefix>-INITIAL_FORMS`  | Rows loaded from existing records |
//! | `<prefix>-MIN_NUM_FORMS`  | Minimum rows the server accepts |
//! | `<prefix>-MAX_NUM_FORMS`  | Maximum rows the server accepts |
//! | `<prefix>-<i>-<field>`    | Control `field` of row `i` |
//!
//! [`decode`] builds a [`DetailTable`] from a submission and [`encode`]
//! renders a table back into one.

use ledger_core::details::{DEFAULT_MAX_NUM_FORMS, DetailTable, ManagementForm};
use ledger_core::{DetailField, DetailRow};
use thiserror::Error;
use tracing::{debug, warn};

use crate::field_name::FieldName;
use crate::form_data::FormData;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormsetError {
    /// The row-count sentinel is absent, so the rows cannot be delimited.
    #[error("management field {0} is missing")]
    MissingManagementForm(String),

    #[error("management field {name} has invalid value '{value}'")]
    InvalidManagementForm { name: String, value: String },

    #[error("{total} rows submitted but at most {max} are accepted")]
    TooManyForms { total: usize, max: usize },
}

/// Counter fields of the management block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementField {
    TotalForms,
    InitialForms,
    MinNumForms,
    MaxNumForms,
}

impl ManagementField {
    pub const ALL: [ManagementField; 4] = [
        ManagementField::TotalForms,
        ManagementField::InitialForms,
        ManagementField::MinNumForms,
        ManagementField::MaxNumForms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalForms => "TOTAL_FORMS",
            Self::InitialForms => "INITIAL_FORMS",
            Self::MinNumForms => "MIN_NUM_FORMS",
            Self::MaxNumForms => "MAX_NUM_FORMS",
        }
    }

    /// Full control name, e.g. `details-TOTAL_FORMS`.
    pub fn name(
        &self,
        prefix: &str,
    ) -> String {
        format!("{prefix}-{}", self.as_str())
    }

    fn value_of(
        &self,
        management: &ManagementForm,
    ) -> usize {
        match self {
            Self::TotalForms => management.total_forms,
            Self::InitialForms => management.initial_forms,
            Self::MinNumForms => management.min_num_forms,
            Self::MaxNumForms => management.max_num_forms,
        }
    }
}

/// Control name of `field` in row `index`.
pub fn field_name(
    prefix: &str,
    index: usize,
    field: DetailField,
) -> FieldName {
    FieldName::new(prefix, index, field.as_str())
}

fn read_count(
    data: &FormData,
    prefix: &str,
    field: ManagementField,
) -> Result<Option<usize>, FormsetError> {
    let name = field.name(prefix);
    match data.get(&name).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| FormsetError::InvalidManagementForm {
                name,
                value: value.to_string(),
            }),
    }
}

/// Builds the detail table submitted under `prefix`.
///
/// `max_rows` is the server-side limit; a larger `MAX_NUM_FORMS` in the
/// submission is not trusted. Rows named in the counter but absent from
/// the submission come back blank. Controls that do not belong to a
/// counted row, or that are not detail fields, are skipped.
///
/// # Errors
///
/// * [`FormsetError::MissingManagementForm`] without `TOTAL_FORMS`.
/// * [`FormsetError::InvalidManagementForm`] for a non-numeric counter.
/// * [`FormsetError::TooManyForms`] when `TOTAL_FORMS` exceeds the limit.
pub fn decode(
    data: &FormData,
    prefix: &str,
    max_rows: usize,
) -> Result<DetailTable, FormsetError> {
    let total = read_count(data, prefix, ManagementField::TotalForms)?.ok_or_else(|| {
        FormsetError::MissingManagementForm(ManagementField::TotalForms.name(prefix))
    })?;
    let max = read_count(data, prefix, ManagementField::MaxNumForms)?
        .unwrap_or(max_rows)
        .min(max_rows);
    if total > max {
        return Err(FormsetError::TooManyForms { total, max });
    }

    let management = ManagementForm {
        total_forms: total,
        initial_forms: read_count(data, prefix, ManagementField::InitialForms)?.unwrap_or(0),
        min_num_forms: read_count(data, prefix, ManagementField::MinNumForms)?.unwrap_or(0),
        max_num_forms: max,
    };

    let mut rows: Vec<DetailRow> = (0..total).map(DetailRow::blank).collect();
    for (name, value) in data.iter() {
        let Ok(parsed) = FieldName::parse_name(name) else {
            continue;
        };
        if parsed.prefix != prefix {
            continue;
        }
        let Some(field) = DetailField::parse(&parsed.field) else {
            debug!(control = %name, "skipping non-detail control");
            continue;
        };
        match rows.get_mut(parsed.index) {
            Some(row) => row.set_value(field, value),
            None => warn!(control = %name, total, "control beyond TOTAL_FORMS ignored"),
        }
    }

    debug!(prefix, total, "formset decoded");
    Ok(DetailTable::with_management(prefix, rows, management))
}

/// Same as [`decode`] with the framework's default row limit.
pub fn decode_default(
    data: &FormData,
    prefix: &str,
) -> Result<DetailTable, FormsetError> {
    decode(data, prefix, DEFAULT_MAX_NUM_FORMS)
}

/// Renders `table` as a submission: management block first, then each
/// row's controls in index order.
pub fn encode(table: &DetailTable) -> FormData {
    let prefix = table.prefix();
    let mut data = FormData::new();

    for field in ManagementField::ALL {
        data.push(
            field.name(prefix),
            field.value_of(table.management()).to_string(),
        );
    }
    for row in table.rows() {
        for field in DetailField::ALL {
            data.push(
                field_name(prefix, row.index, field).name(),
                row.value(field),
            );
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use ledger_core::details::DEFAULT_PREFIX;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn submission() -> FormData {
        [
            ("csrfmiddlewaretoken", "abc"),
            ("details-TOTAL_FORMS", "3"),
            ("details-INITIAL_FORMS", "0"),
            ("details-MIN_NUM_FORMS", "2"),
            ("details-MAX_NUM_FORMS", "1000"),
            ("details-0-account", "1000"),
            ("details-0-debit", "10"),
            ("details-0-credit", ""),
            ("details-0-notes", "cash"),
            ("details-0-DELETE", ""),
            ("details-1-account", "2000"),
            ("details-1-debit", "20"),
            ("details-2-credit", "5"),
        ]
        .into_iter()
        .collect()
    }

    // =========================================================================
    // decode tests
    // =========================================================================

    #[test]
    fn decode_reads_rows_and_management_block() {
        let table = decode_default(&submission(), DEFAULT_PREFIX).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            *table.management(),
            ManagementForm {
                total_forms: 3,
                initial_forms: 0,
                min_num_forms: 2,
                max_num_forms: 1000,
            }
        );
        assert_eq!(table.row(0).and_then(|r| r.account.as_deref()), Some("1000"));
        assert_eq!(table.row(0).map(|r| r.notes.as_str()), Some("cash"));
        assert_eq!(table.row(2).map(|r| r.credit.as_str()), Some("5"));
    }

    #[test]
    fn decode_computes_totals() {
        let table = decode_default(&submission(), DEFAULT_PREFIX).unwrap();

        assert_eq!(table.totals().debit, dec!(30));
        assert_eq!(table.totals().credit, dec!(5));
        assert!(table.delete_enabled());
    }

    #[test]
    fn decode_fills_missing_rows_with_blanks() {
        let data: FormData = [("details-TOTAL_FORMS", "2"), ("details-0-debit", "1")]
            .into_iter()
            .collect();

        let table = decode_default(&data, DEFAULT_PREFIX).unwrap();

        assert_eq!(table.row(1), Some(&DetailRow::blank(1)));
    }

    #[test]
    fn decode_ignores_controls_beyond_total() {
        let data: FormData = [("details-TOTAL_FORMS", "1"), ("details-4-debit", "99")]
            .into_iter()
            .collect();

        let table = decode_default(&data, DEFAULT_PREFIX).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.totals().debit_display(), "0.00");
    }

    #[test]
    fn decode_ignores_other_prefixes() {
        let data: FormData = [
            ("details-TOTAL_FORMS", "1"),
            ("other-0-debit", "99"),
            ("details-0-debit", "1"),
        ]
        .into_iter()
        .collect();

        let table = decode_default(&data, DEFAULT_PREFIX).unwrap();

        assert_eq!(table.totals().debit_display(), "1.00");
    }

    #[test]
    fn decode_without_total_forms_fails() {
        let data: FormData = [("details-0-debit", "1")].into_iter().collect();

        let result = decode_default(&data, DEFAULT_PREFIX);

        assert_eq!(
            result,
            Err(FormsetError::MissingManagementForm(
                "details-TOTAL_FORMS".to_string()
            ))
        );
    }

    #[test]
    fn decode_with_bad_total_forms_fails() {
        let data: FormData = [("details-TOTAL_FORMS", "two")].into_iter().collect();

        let result = decode_default(&data, DEFAULT_PREFIX);

        assert_eq!(
            result,
            Err(FormsetError::InvalidManagementForm {
                name: "details-TOTAL_FORMS".to_string(),
                value: "two".to_string(),
            })
        );
    }

    #[test]
    fn decode_does_not_trust_submitted_maximum() {
        let data: FormData = [
            ("details-TOTAL_FORMS", "50"),
            ("details-MAX_NUM_FORMS", "1000000"),
        ]
        .into_iter()
        .collect();

        let result = decode(&data, DEFAULT_PREFIX, 10);

        assert_eq!(result, Err(FormsetError::TooManyForms { total: 50, max: 10 }));
    }

    // =========================================================================
    // encode tests
    // =========================================================================

    #[test]
    fn encode_writes_management_block_then_rows() {
        let mut table = DetailTable::new(DEFAULT_PREFIX, vec![DetailRow::blank(0)]);
        table.set_field(0, DetailField::Debit, "10").unwrap();

        let data = encode(&table);
        let names: Vec<&str> = data.iter().map(|(n, _)| n).collect();

        assert_eq!(
            names,
            vec![
                "details-TOTAL_FORMS",
                "details-INITIAL_FORMS",
                "details-MIN_NUM_FORMS",
                "details-MAX_NUM_FORMS",
                "details-0-account",
                "details-0-debit",
                "details-0-credit",
                "details-0-notes",
            ]
        );
        assert_eq!(data.get("details-TOTAL_FORMS"), Some("1"));
        assert_eq!(data.get("details-0-debit"), Some("10"));
    }

    #[test]
    fn encode_after_add_row_names_new_controls_from_index() {
        let mut table = decode_default(&submission(), DEFAULT_PREFIX).unwrap();
        table.add_row().unwrap();

        let data = encode(&table);

        assert_eq!(data.get("details-TOTAL_FORMS"), Some("4"));
        assert_eq!(data.get("details-3-account"), Some(""));
        assert_eq!(data.get("details-3-debit"), Some(""));
        assert_eq!(data.get("details-3-notes"), Some(""));
    }

    #[test]
    fn decode_of_encoded_table_preserves_rows() {
        let table = decode_default(&submission(), DEFAULT_PREFIX).unwrap();

        let decoded = decode_default(&encode(&table), DEFAULT_PREFIX).unwrap();

        assert_eq!(decoded, table);
    }

    #[test]
    fn field_name_renders_id_and_name() {
        let name = field_name(DEFAULT_PREFIX, 2, DetailField::Credit);

        assert_eq!(name.name(), "details-2-credit");
        assert_eq!(name.id(), "id_details-2-credit");
    }
}
