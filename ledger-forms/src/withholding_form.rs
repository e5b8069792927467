//! Presentation adapter for the withholding calculator form.
//!
//! Reads the nine named inputs from a submission, and renders the four
//! results as two-decimal text for their display targets.

use ledger_core::calculations::common::{format_amount, parse_amount};
use ledger_core::{MonthsRemaining, WithholdingInputs, WithholdingResults};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::{debug, warn};

use crate::form_data::FormData;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WithholdingFormError {
    #[error("monthsRemaining is required")]
    MissingMonthsRemaining,

    #[error("monthsRemaining must be a whole number of at least 1, got '{0}'")]
    InvalidMonthsRemaining(String),
}

/// Named inputs of the withholding form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithholdingField {
    MonthlyStateBurden,
    MonthlyFederalBurden,
    StateBurdenYtd,
    FederalBurdenYtd,
    StatePaidYtd,
    FederalPaidYtd,
    MonthlyStatePayment,
    MonthlyFederalPayment,
    MonthsRemaining,
}

impl WithholdingField {
    pub const ALL: [WithholdingField; 9] = [
        WithholdingField::MonthlyStateBurden,
        WithholdingField::MonthlyFederalBurden,
        WithholdingField::StateBurdenYtd,
        WithholdingField::FederalBurdenYtd,
        WithholdingField::StatePaidYtd,
        WithholdingField::FederalPaidYtd,
        WithholdingField::MonthlyStatePayment,
        WithholdingField::MonthlyFederalPayment,
        WithholdingField::MonthsRemaining,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthlyStateBurden => "monthlyStateBurden",
            Self::MonthlyFederalBurden => "monthlyFederalBurden",
            Self::StateBurdenYtd => "stateBurdenYtd",
            Self::FederalBurdenYtd => "federalBurdenYtd",
            Self::StatePaidYtd => "statePaidYtd",
            Self::FederalPaidYtd => "federalPaidYtd",
            Self::MonthlyStatePayment => "monthlyStatePmt",
            Self::MonthlyFederalPayment => "monthlyFederalPmt",
            Self::MonthsRemaining => "monthsRemaining",
        }
    }
}

/// Output regions receiving the formatted results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    ExtraStateWithholding,
    ExtraFederalWithholding,
    EstimatedStateRefund,
    EstimatedFederalRefund,
}

impl DisplayTarget {
    pub const ALL: [DisplayTarget; 4] = [
        DisplayTarget::ExtraStateWithholding,
        DisplayTarget::ExtraFederalWithholding,
        DisplayTarget::EstimatedStateRefund,
        DisplayTarget::EstimatedFederalRefund,
    ];

    /// Element id of the region.
    pub fn id(&self) -> &'static str {
        match self {
            Self::ExtraStateWithholding => "ExtraStateWH",
            Self::ExtraFederalWithholding => "ExtraFederalWH",
            Self::EstimatedStateRefund => "EstStateRef",
            Self::EstimatedFederalRefund => "EstFederalRef",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ExtraStateWithholding => "Extra state withholding",
            Self::ExtraFederalWithholding => "Extra federal withholding",
            Self::EstimatedStateRefund => "Estimated state refund",
            Self::EstimatedFederalRefund => "Estimated federal refund",
        }
    }

    fn value_of(
        &self,
        results: &WithholdingResults,
    ) -> Decimal {
        match self {
            Self::ExtraStateWithholding => results.extra_state_withholding,
            Self::ExtraFederalWithholding => results.extra_federal_withholding,
            Self::EstimatedStateRefund => results.estimated_state_refund,
            Self::EstimatedFederalRefund => results.estimated_federal_refund,
        }
    }
}

fn amount(
    data: &FormData,
    field: WithholdingField,
) -> Decimal {
    match data.get(field.as_str()) {
        Some(raw) => parse_amount(raw),
        None => {
            debug!(field = field.as_str(), "input absent, using zero");
            Decimal::ZERO
        }
    }
}

fn parse_months(raw: &str) -> Result<MonthsRemaining, WithholdingFormError> {
    let invalid = || WithholdingFormError::InvalidMonthsRemaining(raw.to_string());

    let value = raw.trim().parse::<Decimal>().map_err(|_| invalid())?;
    if !value.fract().is_zero() {
        return Err(invalid());
    }
    let months = value.to_u32().ok_or_else(invalid)?;
    MonthsRemaining::new(months).map_err(|_| invalid())
}

/// Reads calculator inputs from a submission.
///
/// Missing or unparsable amounts become zero. `monthsRemaining` is
/// checked strictly; when it is absent or blank, `fallback_months` is used.
///
/// # Errors
///
/// * [`WithholdingFormError::InvalidMonthsRemaining`] when the month count
///   is not a whole number of at least 1.
/// * [`WithholdingFormError::MissingMonthsRemaining`] when it is absent and
///   no fallback was given.
pub fn read_inputs(
    data: &FormData,
    fallback_months: Option<MonthsRemaining>,
) -> Result<WithholdingInputs, WithholdingFormError> {
    let months_remaining = match data
        .get(WithholdingField::MonthsRemaining.as_str())
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
    {
        Some(raw) => {
            parse_months(raw).inspect_err(|e| warn!(error = %e, "rejected month count"))?
        }
        None => fallback_months.ok_or(WithholdingFormError::MissingMonthsRemaining)?,
    };

    Ok(WithholdingInputs {
        monthly_state_burden: amount(data, WithholdingField::MonthlyStateBurden),
        monthly_federal_burden: amount(data, WithholdingField::MonthlyFederalBurden),
        state_burden_ytd: amount(data, WithholdingField::StateBurdenYtd),
        federal_burden_ytd: amount(data, WithholdingField::FederalBurdenYtd),
        state_paid_ytd: amount(data, WithholdingField::StatePaidYtd),
        federal_paid_ytd: amount(data, WithholdingField::FederalPaidYtd),
        monthly_state_payment: amount(data, WithholdingField::MonthlyStatePayment),
        monthly_federal_payment: amount(data, WithholdingField::MonthlyFederalPayment),
        months_remaining,
    })
}

/// Formats each result for its display target, in [`DisplayTarget::ALL`] order.
pub fn render(results: &WithholdingResults) -> Vec<(DisplayTarget, String)> {
    DisplayTarget::ALL
        .iter()
        .map(|target| (*target, format_amount(target.value_of(results))))
        .collect()
}

/// Renders the results as a submission keyed by display target id.
pub fn render_form_data(results: &WithholdingResults) -> FormData {
    render(results)
        .into_iter()
        .map(|(target, text)| (target.id(), text))
        .collect()
}
