//! Parsing and display helpers for money, terms and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::debug;

/// Currency glyph used for display.
pub const CURRENCY_SYMBOL: &str = "£";

/// A money box whose contents do not read as an amount.
#[derive(Debug, Error)]
#[error("'{input}' is not an amount of money")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// The digits of a typed amount with `£` and thousands commas dropped.
/// `None` when the box is blank.
fn read_amount(input: &str) -> Option<Result<Decimal, rust_decimal::Error>> {
    let digits: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '£'))
        .collect();
    (!digits.is_empty()).then(|| digits.parse())
}

/// Reads an amount typed as `£12,500`, `12500` or `9,999.50`.
///
/// A blank box reads as `0`.
///
/// # Errors
///
/// Anything else that is not a number.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    match read_amount(s) {
        None => Ok(Decimal::ZERO),
        Some(Ok(amount)) => Ok(amount),
        Some(Err(source)) => Err(ParseDecimalError {
            input: s.trim().to_string(),
            source,
        }),
    }
}

/// Like [`parse_decimal`], but a blank or unreadable box gives `None` so the
/// caller can keep its previous value.
pub fn parse_optional_decimal(s: &str) -> Option<Decimal> {
    match read_amount(s)? {
        Ok(amount) => Some(amount),
        Err(err) => {
            debug!(input = s, %err, "amount not readable");
            None
        }
    }
}

/// Formats an amount as pounds with thousands separators.
///
/// `decimals` is the number of fraction digits shown; the value is rounded
/// half-up to fit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(22995), 0), "£22,995");
/// assert_eq!(format_currency(dec!(227.8312), 2), "£227.83");
/// assert_eq!(format_currency(dec!(-1500), 0), "-£1,500");
/// ```
pub fn format_currency(
    value: Decimal,
    decimals: u32,
) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{CURRENCY_SYMBOL}{grouped}.{fraction}"),
        None => format!("{sign}{CURRENCY_SYMBOL}{grouped}"),
    }
}

/// Formats a loan term, in years when it is a whole number of years.
///
/// ```
/// use finance_core::format::format_term;
///
/// assert_eq!(format_term(12), "1 year");
/// assert_eq!(format_term(48), "4 years");
/// assert_eq!(format_term(18), "18 months");
/// ```
pub fn format_term(months: u32) -> String {
    match (months % 12, months / 12) {
        (0, 1) => "1 year".to_string(),
        (0, years) if years > 0 => format!("{years} years"),
        _ if months == 1 => "1 month".to_string(),
        _ => format!("{months} months"),
    }
}

/// Formats a date day first, e.g. `01/06/1985`.
pub fn format_date_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Returns the trimmed text, or `Not specified` when it is blank.
pub fn or_not_specified(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "Not specified".to_string()
    } else {
        trimmed.to_string()
    }
}
