//! Step validation for the application wizard.
//!
//! Validators never fail fast: every rule of a step is evaluated and all
//! failures are collected into a [`FieldErrors`] map, one message per field.

mod age;
mod employment;
mod personal;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::Field;

pub use age::AgePolicy;
pub use employment::validate_employment;
pub use personal::{DATE_OF_BIRTH_FORMAT, PersonalRules, validate_personal};

/// Validation messages keyed by field, listed in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`, replacing any earlier one.
    pub fn insert(
        &mut self,
        field: Field,
        message: impl Into<String>,
    ) {
        self.0.insert(field, message.into());
    }

    pub fn remove(
        &mut self,
        field: Field,
    ) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(
        &self,
        field: Field,
    ) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(
        &self,
        field: Field,
    ) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Whether a text input counts as filled in.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reads the integer at the start of `value` the way a browser number
/// input's `parseInt` does: leading whitespace and an optional sign, then
/// digits up to the first non-digit. `"42000.50"` reads as `42000`; input
/// with no leading digits reads as `None`. Very long digit runs saturate.
pub(crate) fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut seen_digit = false;
    let mut magnitude: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        magnitude = magnitude
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    seen_digit.then_some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // FieldErrors tests
    // =========================================================================

    #[test]
    fn field_errors_iterate_in_form_order() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Postcode, "Postcode is required");
        errors.insert(Field::Title, "Title is required");

        let fields: Vec<_> = errors.fields().collect();

        assert_eq!(fields, vec![Field::Title, Field::Postcode]);
    }

    #[test]
    fn field_errors_keep_one_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, "Email is required");
        errors.insert(Field::Email, "Please enter a valid email");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some("Please enter a valid email"));
    }

    #[test]
    fn field_errors_display_joins_messages() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Status, "Employment status is required");
        errors.insert(Field::Income, "Annual income is required");

        assert_eq!(
            errors.to_string(),
            "status: Employment status is required; income: Annual income is required"
        );
    }

    #[test]
    fn empty_field_errors_are_ok() {
        assert_eq!(FieldErrors::new().into_result(), Ok(()));
    }

    // =========================================================================
    // parse_leading_int tests
    // =========================================================================

    #[test]
    fn parse_leading_int_reads_plain_integers() {
        assert_eq!(parse_leading_int("42000"), Some(42000));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+12"), Some(12));
    }

    #[test]
    fn parse_leading_int_stops_at_first_non_digit() {
        assert_eq!(parse_leading_int("42000.50"), Some(42000));
        assert_eq!(parse_leading_int("5 years"), Some(5));
    }

    #[test]
    fn parse_leading_int_rejects_non_numeric_input() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(".5"), None);
    }

    #[test]
    fn parse_leading_int_saturates() {
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }
}
