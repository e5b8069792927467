use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MonthsRemaining;

/// Payroll figures entered on the withholding form.
///
/// All amounts are expected to be non-negative. Burden is the tax liability
/// accrued for a period, independent of what has been paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingInputs {
    pub monthly_state_burden: Decimal,
    pub monthly_federal_burden: Decimal,
    pub state_burden_ytd: Decimal,
    pub federal_burden_ytd: Decimal,
    pub state_paid_ytd: Decimal,
    pub federal_paid_ytd: Decimal,
    /// State tax currently withheld each month.
    pub monthly_state_payment: Decimal,
    /// Federal tax currently withheld each month.
    pub monthly_federal_payment: Decimal,
    pub months_remaining: MonthsRemaining,
}

/// The four figures describing one jurisdiction (state or federal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JurisdictionFigures {
    pub monthly_burden: Decimal,
    pub monthly_payment: Decimal,
    pub burden_ytd: Decimal,
    pub paid_ytd: Decimal,
}

impl WithholdingInputs {
    /// Inputs with every amount zero and the given number of months left.
    pub fn zeroed(months_remaining: MonthsRemaining) -> Self {
        Self {
            monthly_state_burden: Decimal::ZERO,
            monthly_federal_burden: Decimal::ZERO,
            state_burden_ytd: Decimal::ZERO,
            federal_burden_ytd: Decimal::ZERO,
            state_paid_ytd: Decimal::ZERO,
            federal_paid_ytd: Decimal::ZERO,
            monthly_state_payment: Decimal::ZERO,
            monthly_federal_payment: Decimal::ZERO,
            months_remaining,
        }
    }

    pub fn state(&self) -> JurisdictionFigures {
        JurisdictionFigures {
            monthly_burden: self.monthly_state_burden,
            monthly_payment: self.monthly_state_payment,
            burden_ytd: self.state_burden_ytd,
            paid_ytd: self.state_paid_ytd,
        }
    }

    pub fn federal(&self) -> JurisdictionFigures {
        JurisdictionFigures {
            monthly_burden: self.monthly_federal_burden,
            monthly_payment: self.monthly_federal_payment,
            burden_ytd: self.federal_burden_ytd,
            paid_ytd: self.federal_paid_ytd,
        }
    }
}

/// Projected adjustments derived from [`WithholdingInputs`].
///
/// Values carry full precision; round only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingResults {
    /// Additional state tax to withhold each remaining month.
    pub extra_state_withholding: Decimal,
    /// Additional federal tax to withhold each remaining month.
    pub extra_federal_withholding: Decimal,
    pub estimated_state_refund: Decimal,
    pub estimated_federal_refund: Decimal,
}
