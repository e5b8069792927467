//! Monthly withholding adjustments for the tax calculator form.
//!
//! Given what has been accrued and paid so far this year and what is
//! currently withheld each month, project the rest of the year forward for
//! each jurisdiction (state and federal):
//!
//! | Output | Formula |
//! |--------|---------|
//! | Extra withholding | `max(0, monthly burden - monthly payment + (burden YTD - paid YTD) / months remaining)` |
//! | Estimated refund  | `max(0, (monthly payment - monthly burden) * months remaining + paid YTD - burden YTD)` |
//!
//! The two outputs are one-sided views of the same projected balance: a
//! shortfall becomes extra withholding spread over the remaining months, a
//! surplus becomes a refund. At most one of them is positive.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use rust_decimal_macros::dec;
//! use ledger_core::calculations::common::round_half_up;
//! use ledger_core::{MonthsRemaining, WithholdingCalculator, WithholdingInputs};
//!
//! let mut input = WithholdingInputs::zeroed(MonthsRemaining::new(6).unwrap());
//! input.monthly_state_burden = dec!(500);
//! input.monthly_state_payment = dec!(400);
//! input.state_burden_ytd = dec!(3000);
//! input.state_paid_ytd = dec!(2000);
//!
//! let result = WithholdingCalculator::new().calculate(&input);
//!
//! assert_eq!(round_half_up(result.extra_state_withholding), dec!(266.67));
//! assert_eq!(result.estimated_state_refund, Decimal::ZERO);
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::max;
use crate::models::{JurisdictionFigures, MonthsRemaining, WithholdingInputs, WithholdingResults};

/// Calculator for the withholding adjustment form.
///
/// Holds no state; every call recomputes from its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithholdingCalculator;

impl WithholdingCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Projects extra withholding and refunds for both jurisdictions.
    ///
    /// Never fails: [`MonthsRemaining`] guarantees a nonzero divisor, and
    /// intermediate sums saturate at the bounds of [`Decimal`].
    pub fn calculate(
        &self,
        input: &WithholdingInputs,
    ) -> WithholdingResults {
        let months = input.months_remaining;
        let state = input.state();
        let federal = input.federal();

        let result = WithholdingResults {
            extra_state_withholding: self.extra_withholding(&state, months),
            extra_federal_withholding: self.extra_withholding(&federal, months),
            estimated_state_refund: self.estimated_refund(&state, months),
            estimated_federal_refund: self.estimated_refund(&federal, months),
        };

        debug!(
            months_remaining = months.get(),
            extra_state = %result.extra_state_withholding,
            extra_federal = %result.extra_federal_withholding,
            state_refund = %result.estimated_state_refund,
            federal_refund = %result.estimated_federal_refund,
            "withholding calculated"
        );

        result
    }

    /// Monthly shortfall plus the YTD shortfall spread over the months left.
    fn extra_withholding(
        &self,
        figures: &JurisdictionFigures,
        months: MonthsRemaining,
    ) -> Decimal {
        let monthly_gap = figures.monthly_burden.saturating_sub(figures.monthly_payment);
        let ytd_gap = figures.burden_ytd.saturating_sub(figures.paid_ytd);

        max(
            Decimal::ZERO,
            monthly_gap.saturating_add(ytd_gap / months.as_decimal()),
        )
    }

    /// Projected year-end surplus at the current monthly payment.
    fn estimated_refund(
        &self,
        figures: &JurisdictionFigures,
        months: MonthsRemaining,
    ) -> Decimal {
        let monthly_surplus = figures.monthly_payment.saturating_sub(figures.monthly_burden);

        max(
            Decimal::ZERO,
            monthly_surplus
                .saturating_mul(months.as_decimal())
                .saturating_add(figures.paid_ytd)
                .saturating_sub(figures.burden_ytd),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::{parse_amount, round_half_up};

    fn months(n: u32) -> MonthsRemaining {
        MonthsRemaining::new(n).unwrap()
    }

    fn figures(
        monthly_burden: Decimal,
        monthly_payment: Decimal,
        burden_ytd: Decimal,
        paid_ytd: Decimal,
    ) -> JurisdictionFigures {
        JurisdictionFigures {
            monthly_burden,
            monthly_payment,
            burden_ytd,
            paid_ytd,
        }
    }

    fn test_input() -> WithholdingInputs {
        WithholdingInputs {
            monthly_state_burden: dec!(500),
            monthly_federal_burden: dec!(1200),
            state_burden_ytd: dec!(3000),
            federal_burden_ytd: dec!(7200),
            state_paid_ytd: dec!(2000),
            federal_paid_ytd: dec!(6000),
            monthly_state_payment: dec!(400),
            monthly_federal_payment: dec!(1000),
            months_remaining: months(6),
        }
    }

    // =========================================================================
    // extra_withholding tests
    // =========================================================================

    #[test]
    fn extra_withholding_spreads_ytd_shortfall() {
        let calculator = WithholdingCalculator::new();

        let result = calculator.extra_withholding(
            &figures(dec!(500), dec!(400), dec!(3000), dec!(2000)),
            months(6),
        );

        // 500 - 400 + (3000 - 2000) / 6 = 266.666...
        assert_eq!(round_half_up(result), dec!(266.67));
    }

    #[test]
    fn extra_withholding_is_zero_when_overpaid() {
        let calculator = WithholdingCalculator::new();

        let result = calculator.extra_withholding(
            &figures(dec!(500), dec!(600), dec!(3000), dec!(3600)),
            months(6),
        );

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn extra_withholding_with_one_month_left_owes_full_gap() {
        let calculator = WithholdingCalculator::new();

        let result = calculator.extra_withholding(
            &figures(dec!(500), dec!(450), dec!(5500), dec!(5000)),
            months(1),
        );

        assert_eq!(result, dec!(550));
    }

    #[test]
    fn extra_withholding_saturates_on_extreme_burden() {
        let calculator = WithholdingCalculator::new();

        let result = calculator.extra_withholding(
            &figures(Decimal::MAX, Decimal::MIN, Decimal::MAX, Decimal::ZERO),
            months(1),
        );

        assert_eq!(result, Decimal::MAX);
    }

    // =========================================================================
    // estimated_refund tests
    // =========================================================================

    #[test]
    fn estimated_refund_projects_surplus() {
        let calculator = WithholdingCalculator::new();

        let result = calculator.estimated_refund(
            &figures(dec!(500), dec!(600), dec!(3000), dec!(3600)),
            months(6),
        );

        // (600 - 500) * 6 + 3600 - 3000 = 1200
        assert_eq!(result, dec!(1200));
    }

    #[test]
    fn estimated_refund_is_zero_when_short() {
        let calculator = WithholdingCalculator::new();

        let result = calculator.estimated_refund(
            &figures(dec!(500), dec!(400), dec!(3000), dec!(2000)),
            months(6),
        );

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn estimated_refund_is_zero_when_exactly_on_track() {
        let calculator = WithholdingCalculator::new();

        let result = calculator.estimated_refund(
            &figures(dec!(500), dec!(500), dec!(3000), dec!(3000)),
            months(6),
        );

        assert_eq!(result, Decimal::ZERO);
    }

    // =========================================================================
    // calculate (integration) tests
    // =========================================================================

    #[test]
    fn calculate_both_jurisdictions_short() {
        let result = WithholdingCalculator::new().calculate(&test_input());

        assert_eq!(round_half_up(result.extra_state_withholding), dec!(266.67));
        // 1200 - 1000 + (7200 - 6000) / 6 = 400
        assert_eq!(result.extra_federal_withholding, dec!(400));
        assert_eq!(result.estimated_state_refund, Decimal::ZERO);
        assert_eq!(result.estimated_federal_refund, Decimal::ZERO);
    }

    #[test]
    fn calculate_state_surplus_federal_short() {
        let mut input = test_input();
        input.monthly_state_payment = dec!(600);
        input.state_paid_ytd = dec!(3600);

        let result = WithholdingCalculator::new().calculate(&input);

        assert_eq!(result.extra_state_withholding, Decimal::ZERO);
        assert_eq!(result.estimated_state_refund, dec!(1200));
        assert_eq!(result.extra_federal_withholding, dec!(400));
        assert_eq!(result.estimated_federal_refund, Decimal::ZERO);
    }

    #[test]
    fn calculate_all_zero_inputs() {
        let input = WithholdingInputs::zeroed(months(12));

        let result = WithholdingCalculator::new().calculate(&input);

        assert_eq!(
            result,
            WithholdingResults {
                extra_state_withholding: Decimal::ZERO,
                extra_federal_withholding: Decimal::ZERO,
                estimated_state_refund: Decimal::ZERO,
                estimated_federal_refund: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn calculate_is_repeatable() {
        let calculator = WithholdingCalculator::new();
        let input = test_input();

        assert_eq!(calculator.calculate(&input), calculator.calculate(&input));
    }

    #[test]
    fn calculate_with_oversized_typed_payment_treats_it_as_zero() {
        let mut input = WithholdingInputs::zeroed(months(12));
        input.monthly_state_payment = parse_amount("10000000000000000000000000000");

        let result = WithholdingCalculator::new().calculate(&input);

        assert_eq!(result.estimated_state_refund, Decimal::ZERO);
    }

    #[test]
    fn calculate_saturates_instead_of_overflowing() {
        let mut input = WithholdingInputs::zeroed(months(12));
        input.monthly_federal_payment = Decimal::MAX;

        let result = WithholdingCalculator::new().calculate(&input);

        assert_eq!(result.estimated_federal_refund, Decimal::MAX);
        assert_eq!(result.extra_federal_withholding, Decimal::ZERO);
    }

    // =========================================================================
    // properties
    // =========================================================================

    fn cents(value: u64) -> Decimal {
        Decimal::from(value) / Decimal::from(100)
    }

    proptest! {
        #[test]
        fn results_are_never_negative(
            monthly_burden in 0u64..10_000_000u64,
            monthly_payment in 0u64..10_000_000u64,
            burden_ytd in 0u64..100_000_000u64,
            paid_ytd in 0u64..100_000_000u64,
            remaining in 1u32..=12u32,
        ) {
            let mut input = WithholdingInputs::zeroed(months(remaining));
            input.monthly_federal_burden = cents(monthly_burden);
            input.monthly_federal_payment = cents(monthly_payment);
            input.federal_burden_ytd = cents(burden_ytd);
            input.federal_paid_ytd = cents(paid_ytd);

            let result = WithholdingCalculator::new().calculate(&input);

            prop_assert!(result.extra_federal_withholding >= Decimal::ZERO);
            prop_assert!(result.estimated_federal_refund >= Decimal::ZERO);
            prop_assert!(result.extra_state_withholding >= Decimal::ZERO);
            prop_assert!(result.estimated_state_refund >= Decimal::ZERO);
        }

        #[test]
        fn extra_withholding_and_refund_are_exclusive(
            monthly_burden in 0u64..10_000_000u64,
            monthly_payment in 0u64..10_000_000u64,
            burden_ytd in 0u64..100_000_000u64,
            paid_ytd in 0u64..100_000_000u64,
            remaining in 1u32..=12u32,
        ) {
            let mut input = WithholdingInputs::zeroed(months(remaining));
            input.monthly_state_burden = cents(monthly_burden);
            input.monthly_state_payment = cents(monthly_payment);
            input.state_burden_ytd = cents(burden_ytd);
            input.state_paid_ytd = cents(paid_ytd);

            let result = WithholdingCalculator::new().calculate(&input);

            prop_assert!(
                !(result.extra_state_withholding > Decimal::ZERO
                    && result.estimated_state_refund > Decimal::ZERO),
                "extra {} and refund {} both positive",
                result.extra_state_withholding,
                result.estimated_state_refund
            );
        }
    }
}
