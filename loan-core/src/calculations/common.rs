//! Currency rounding shared by the calculators and the admin views.
//!
//! Calculations run unrounded; values are rounded only when they are shown
//! to a person or compared as money.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2144.845)), dec!(2144.85));
/// assert_eq!(round_half_up(dec!(2144.844)), dec!(2144.84));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a floating-point amount to a [`Decimal`] rounded to cents.
///
/// Returns `None` for NaN, infinities, or values outside the range a
/// [`Decimal`] can hold.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::common::to_currency;
///
/// assert_eq!(to_currency(1000.0), Some(dec!(1000.00)));
/// assert_eq!(to_currency(2144.8425273514595), Some(dec!(2144.84)));
/// assert_eq!(to_currency(f64::NAN), None);
/// ```
pub fn to_currency(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).map(round_half_up)
}
