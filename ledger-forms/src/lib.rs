//! Adapters between flat form submissions and the ledger components.
//!
//! A submission is an ordered list of `(name, value)` pairs ([`FormData`]).
//! [`withholding_form`] turns one into calculator inputs and renders the
//! results, [`formset`] maps the repeated detail-row convention onto a
//! [`ledger_core::DetailTable`] and back.

pub mod csv_loader;
pub mod field_name;
pub mod form_data;
pub mod formset;
pub mod withholding_form;

pub use csv_loader::CsvLoadError;
pub use field_name::{FieldName, FieldNameError};
pub use form_data::{FormData, FormDataError};
pub use formset::{FormsetError, ManagementField};
pub use withholding_form::{DisplayTarget, WithholdingField, WithholdingFormError};
