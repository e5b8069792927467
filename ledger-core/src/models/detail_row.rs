use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::parse_amount;

/// Editable controls of a detail row, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailField {
    /// Select control; the first option is the empty choice.
    Account,
    Debit,
    Credit,
    /// Free-text memo.
    Notes,
}

impl DetailField {
    pub const ALL: [DetailField; 4] = [
        DetailField::Account,
        DetailField::Debit,
        DetailField::Credit,
        DetailField::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Notes => "notes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "account" => Some(Self::Account),
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            "notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

/// One line item of a transaction.
///
/// Values are kept as entered so that a half-typed amount survives a
/// round trip; amounts are coerced only when totals are computed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailRow {
    /// Zero-based position in the table.
    pub index: usize,
    /// Selected account key, `None` when the empty first option is selected.
    pub account: Option<String>,
    pub debit: String,
    pub credit: String,
    pub notes: String,
}

impl DetailRow {
    /// A row at `index` with every control reset.
    pub fn blank(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// A blank row that follows this one.
    pub fn blank_successor(&self) -> Self {
        Self::blank(self.index + 1)
    }

    pub fn value(
        &self,
        field: DetailField,
    ) -> &str {
        match field {
            DetailField::Account => self.account.as_deref().unwrap_or(""),
            DetailField::Debit => &self.debit,
            DetailField::Credit => &self.credit,
            DetailField::Notes => &self.notes,
        }
    }

    /// Sets one control. An empty account value selects the first option.
    pub fn set_value(
        &mut self,
        field: DetailField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            DetailField::Account => {
                self.account = if value.is_empty() { None } else { Some(value) };
            }
            DetailField::Debit => self.debit = value,
            DetailField::Credit => self.credit = value,
            DetailField::Notes => self.notes = value,
        }
    }

    pub fn debit_amount(&self) -> Decimal {
        parse_amount(&self.debit)
    }

    pub fn credit_amount(&self) -> Decimal {
        parse_amount(&self.credit)
    }

    pub fn is_blank(&self) -> bool {
        DetailField::ALL
            .iter()
            .all(|field| self.value(*field).is_empty())
    }
}
