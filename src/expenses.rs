//! Expense accumulation for projects.
//!
//! Amounts arrive as free text from the user. Only strictly positive numbers
//! are added; everything else leaves the running total unchanged.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Adds `amount` to `current`, rounded and padded to cents ("15.00").
/// Returns `current` unchanged if `amount` is not a positive number.
pub fn add_expense(current: Decimal, amount: &str) -> Decimal {
    try_add_expense(current, amount).unwrap_or(current)
}

/// Same as [`add_expense`] but reports rejected input as [`Error::InvalidAmount`].
pub fn try_add_expense(current: Decimal, amount: &str) -> Result<Decimal> {
    let parsed = parse_amount(amount).ok_or_else(|| Error::InvalidAmount(amount.to_string()))?;
    if parsed <= Decimal::ZERO {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    let total = current
        .checked_add(parsed)
        .ok_or_else(|| Error::InvalidAmount(amount.to_string()))?;
    Ok(to_cents(total))
}

/// Rounds to 2 places and pads the scale so the value always prints with cents.
pub(crate) fn to_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    cents.rescale(2);
    cents
}

/// Accepts plain decimals ("5.50") and scientific notation ("1e2").
fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_adds_positive_amount() {
        assert_eq!(add_expense(dec!(10.00), "5.50"), dec!(15.50));
        assert_eq!(add_expense(dec!(10.00), "5.50").to_string(), "15.50");
    }

    #[test]
    fn test_non_numeric_is_ignored() {
        assert_eq!(add_expense(dec!(10.00), "abc"), dec!(10.00));
        assert_eq!(add_expense(dec!(10.00), ""), dec!(10.00));
    }

    #[test]
    fn test_non_positive_is_ignored() {
        assert_eq!(add_expense(dec!(10.00), "-3"), dec!(10.00));
        assert_eq!(add_expense(dec!(10.00), "0"), dec!(10.00));
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(add_expense(dec!(0), "0.125"), dec!(0.12));
        assert_eq!(add_expense(dec!(0), "0.135"), dec!(0.14));
        assert_eq!(add_expense(dec!(1.10), "2.006"), dec!(3.11));
    }

    #[test]
    fn test_surrounding_whitespace_and_exponent() {
        assert_eq!(add_expense(dec!(1), " 2.5 "), dec!(3.50));
        assert_eq!(add_expense(dec!(0), "1e2"), dec!(100));
    }

    #[test]
    fn test_total_always_has_cents() {
        assert_eq!(add_expense(dec!(10), "5").to_string(), "15.00");
        assert_eq!(add_expense(dec!(0), "1e2").to_string(), "100.00");
        assert_eq!(add_expense(dec!(0), "0.5").to_string(), "0.50");
    }

    #[test]
    fn test_try_add_expense_reports_rejection() {
        assert!(matches!(
            try_add_expense(dec!(10), "abc"),
            Err(Error::InvalidAmount(text)) if text == "abc"
        ));
        assert!(matches!(
            try_add_expense(dec!(10), "-3"),
            Err(Error::InvalidAmount(_))
        ));
        assert_eq!(try_add_expense(dec!(10), "5.5").unwrap(), dec!(15.50));
    }
}
