//! Exact monetary helpers.
//!
//! Every amount inside the engine is a [`Decimal`]. Binary floats only appear at the
//! display boundary through [`from_display_f64`] and [`to_display_f64`]. All helpers are
//! free functions without shared state.

use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of minor units (cents) kept for stored amounts.
pub const CENT_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised while converting user supplied amounts.
pub enum MoneyError {
    Empty,
    Invalid(String),
    NonFinite,
    OutOfRange,
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::Empty => f.write_str("amount is empty"),
            MoneyError::Invalid(raw) => write!(f, "`{}` is not a valid amount", raw),
            MoneyError::NonFinite => f.write_str("amount must be a finite number"),
            MoneyError::OutOfRange => f.write_str("amount is out of range"),
        }
    }
}

impl std::error::Error for MoneyError {}

/// Parses a human amount such as `1,234.50`, `-$12` or `+7.25`.
pub fn parse_amount(input: &str) -> Result<Decimal, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::Empty);
    }
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest
        .trim_start_matches('$')
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return Err(MoneyError::Invalid(trimmed.to_string()));
    }
    let value: Decimal = digits
        .parse()
        .map_err(|_| MoneyError::Invalid(trimmed.to_string()))?;
    Ok(if negative { -value } else { value })
}

/// Rounds to whole cents, midpoints away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

pub fn to_minor_units(amount: Decimal) -> Result<i64, MoneyError> {
    round_cents(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or(MoneyError::OutOfRange)
}

pub fn from_minor_units(units: i64) -> Decimal {
    Decimal::new(units, CENT_SCALE)
}

/// Converts a display float into an exact amount rounded to cents.
pub fn from_display_f64(value: f64) -> Result<Decimal, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NonFinite);
    }
    Decimal::from_f64(value)
        .map(round_cents)
        .ok_or(MoneyError::OutOfRange)
}

/// Lossy conversion for charts and other display-only consumers; `None` when the
/// value has no `f64` representation.
pub fn to_display_f64(amount: Decimal) -> Option<f64> {
    amount.to_f64()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Rendering preferences for [`format_amount`].
pub struct AmountFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub negative_style: NegativeStyle,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self {
            symbol: "$".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            negative_style: NegativeStyle::Sign,
        }
    }
}

/// Renders an amount with grouping, two decimals and the configured symbol.
pub fn format_amount(amount: Decimal, format: &AmountFormat) -> String {
    let mut magnitude = round_cents(amount.abs());
    magnitude.rescale(CENT_SCALE);
    let raw = magnitude.to_string();
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let body = format!(
        "{}{}{}{}",
        format.symbol,
        group_digits(int_part, format.grouping_separator),
        format.decimal_separator,
        frac_part
    );
    if amount.is_sign_negative() && !magnitude.is_zero() {
        match format.negative_style {
            NegativeStyle::Sign => format!("-{}", body),
            NegativeStyle::Parentheses => format!("({})", body),
        }
    } else {
        body
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    #[test]
    fn parse_amount_accepts_symbols_signs_and_grouping() {
        assert_eq!(parse_amount("1,234.50").unwrap(), dec("1234.50"));
        assert_eq!(parse_amount("  -$12 ").unwrap(), dec("-12"));
        assert_eq!(parse_amount("+7.25").unwrap(), dec("7.25"));
        assert_eq!(parse_amount("$0.10").unwrap(), dec("0.10"));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("   "), Err(MoneyError::Empty));
        assert!(matches!(parse_amount("12a"), Err(MoneyError::Invalid(_))));
        assert!(matches!(parse_amount("1.2.3"), Err(MoneyError::Invalid(_))));
        assert!(matches!(parse_amount("$-5"), Err(MoneyError::Invalid(_))));
        assert!(matches!(parse_amount("-"), Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn rounding_goes_away_from_zero_on_midpoints() {
        assert_eq!(round_cents(dec("2.345")), dec("2.35"));
        assert_eq!(round_cents(dec("-2.345")), dec("-2.35"));
        assert_eq!(round_cents(dec("2.344")), dec("2.34"));
    }

    #[test]
    fn minor_units_are_exact() {
        assert_eq!(to_minor_units(dec("-1500.07")).unwrap(), -150_007);
        assert_eq!(from_minor_units(150_007), dec("1500.07"));
    }

    #[test]
    fn display_floats_are_rounded_into_cents() {
        assert_eq!(from_display_f64(0.1 + 0.2).unwrap(), dec("0.30"));
        assert_eq!(from_display_f64(f64::NAN), Err(MoneyError::NonFinite));
        assert_eq!(to_display_f64(dec("12.5")), Some(12.5));
    }

    #[test]
    fn format_amount_groups_and_marks_negatives() {
        let mut format = AmountFormat::default();
        assert_eq!(format_amount(dec("1234567.5"), &format), "$1,234,567.50");
        assert_eq!(format_amount(dec("-500"), &format), "-$500.00");
        assert_eq!(format_amount(dec("-0.001"), &format), "$0.00");
        format.negative_style = NegativeStyle::Parentheses;
        format.decimal_separator = ',';
        format.grouping_separator = '.';
        format.symbol = "€".into();
        assert_eq!(format_amount(dec("-1234.5"), &format), "(€1.234,50)");
    }
}
