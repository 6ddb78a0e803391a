//! Common utility functions for finance calculations.
//!
//! This module provides shared functionality used by the amortization
//! calculator and the loan input clamps, including rounding and snapping a
//! value onto a slider's step grid.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(226.374)), dec!(226.37));
/// assert_eq!(round_half_up(dec!(226.375)), dec!(226.38));
/// assert_eq!(round_half_up(dec!(-226.375)), dec!(-226.38)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into `[min, max]` and snaps it onto the grid
/// `min, min + step, min + 2·step, ...`.
///
/// This mirrors how a range slider constrains its value: inputs outside the
/// range land on the nearest bound, and inputs between grid points go to the
/// nearest grid point (midpoints round up). When `max` is not itself on the
/// grid the largest grid point not above it is used. A non-positive `step`
/// disables snapping.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::calculations::common::snap_to_step;
///
/// assert_eq!(snap_to_step(dec!(10049), dec!(1000), dec!(50000), dec!(100)), dec!(10000));
/// assert_eq!(snap_to_step(dec!(10050), dec!(1000), dec!(50000), dec!(100)), dec!(10100));
/// assert_eq!(snap_to_step(dec!(999999), dec!(1000), dec!(50000), dec!(100)), dec!(50000));
/// assert_eq!(snap_to_step(dec!(-5), dec!(0), dec!(2500), dec!(100)), dec!(0));
/// ```
pub fn snap_to_step(
    value: Decimal,
    min: Decimal,
    max: Decimal,
    step: Decimal,
) -> Decimal {
    if max <= min {
        return min;
    }
    let clamped = value.clamp(min, max);
    if step <= Decimal::ZERO {
        return clamped;
    }

    let steps = ((clamped - min) / step).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let snapped = min + steps * step;
    if snapped > max {
        let floor_steps = ((max - min) / step).floor();
        min + floor_steps * step
    } else {
        snapped
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_long_fractions() {
        let result = round_half_up(dec!(227.8312742076920552911501590));

        assert_eq!(result, dec!(227.83));
    }

    // =========================================================================
    // snap_to_step tests
    // =========================================================================

    #[test]
    fn snap_to_step_keeps_grid_values() {
        let result = snap_to_step(dec!(25000), dec!(5000), dec!(100000), dec!(1000));

        assert_eq!(result, dec!(25000));
    }

    #[test]
    fn snap_to_step_rounds_to_nearest_grid_point() {
        assert_eq!(
            snap_to_step(dec!(25400), dec!(5000), dec!(100000), dec!(1000)),
            dec!(25000)
        );
        assert_eq!(
            snap_to_step(dec!(25500), dec!(5000), dec!(100000), dec!(1000)),
            dec!(26000)
        );
    }

    #[test]
    fn snap_to_step_clamps_below_minimum() {
        let result = snap_to_step(dec!(10), dec!(1000), dec!(50000), dec!(100));

        assert_eq!(result, dec!(1000));
    }

    #[test]
    fn snap_to_step_clamps_above_maximum() {
        let result = snap_to_step(dec!(60000), dec!(1000), dec!(50000), dec!(100));

        assert_eq!(result, dec!(50000));
    }

    #[test]
    fn snap_to_step_stays_below_off_grid_maximum() {
        // Deposit cap of 50% on an amount of 10,150 is 5,075; the grid tops out at 5,000.
        let result = snap_to_step(dec!(5075), dec!(0), dec!(5075), dec!(100));

        assert_eq!(result, dec!(5000));
    }

    #[test]
    fn snap_to_step_without_step_only_clamps() {
        let result = snap_to_step(dec!(1234.56), dec!(0), dec!(5000), dec!(0));

        assert_eq!(result, dec!(1234.56));
    }

    #[test]
    fn snap_to_step_collapses_empty_range_to_minimum() {
        let result = snap_to_step(dec!(300), dec!(0), dec!(0), dec!(100));

        assert_eq!(result, dec!(0));
    }
}
