//! Price formatting and discount arithmetic.
//!
//! The shop trades in INR only. Prices are carried as [`Decimal`] end to end;
//! formatting applies the Indian digit-grouping convention (last three
//! digits, then groups of two) with no fraction digits, e.g. `₹1,23,456`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Format a price in INR with Indian digit grouping.
///
/// Fractions are rounded away - jewelry prices are whole rupees.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative();
    let digits = rounded.abs().to_i128().unwrap_or(0).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 {
            let remaining = len - i;
            // Separator before the last 3 digits, then every 2 digits
            if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
                grouped.push(',');
            }
        }
        grouped.push(*c);
    }

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Calculate the discount percentage between a list price and the current
/// price, rounded to the nearest whole percent.
///
/// Returns 0 when the list price is zero or not actually higher than the
/// current price.
#[must_use]
pub fn discount_percent(original: Decimal, current: Decimal) -> u32 {
    if original <= Decimal::ZERO || current >= original {
        return 0;
    }
    let ratio = (original - current) / original * Decimal::from(100);
    ratio.round().to_u32().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr_small() {
        assert_eq!(format_inr(Decimal::from(0)), "₹0");
        assert_eq!(format_inr(Decimal::from(500)), "₹500");
        assert_eq!(format_inr(Decimal::from(999)), "₹999");
    }

    #[test]
    fn test_format_inr_indian_grouping() {
        assert_eq!(format_inr(Decimal::from(1_000)), "₹1,000");
        assert_eq!(format_inr(Decimal::from(12_345)), "₹12,345");
        assert_eq!(format_inr(Decimal::from(123_456)), "₹1,23,456");
        assert_eq!(format_inr(Decimal::from(12_345_678)), "₹1,23,45,678");
    }

    #[test]
    fn test_format_inr_rounds_fractions() {
        assert_eq!(format_inr(Decimal::new(49950, 2)), "₹500");
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(discount_percent(Decimal::from(1000), Decimal::from(750)), 25);
        assert_eq!(discount_percent(Decimal::from(999), Decimal::from(500)), 50);
    }

    #[test]
    fn test_discount_percent_degenerate() {
        // No list price, or price not actually discounted
        assert_eq!(discount_percent(Decimal::ZERO, Decimal::from(10)), 0);
        assert_eq!(discount_percent(Decimal::from(100), Decimal::from(100)), 0);
        assert_eq!(discount_percent(Decimal::from(100), Decimal::from(150)), 0);
    }
}
