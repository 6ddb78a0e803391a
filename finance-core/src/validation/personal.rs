use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AgePolicy, FieldErrors, is_blank};
use crate::models::{Field, PersonalDetails};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

static UK_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("phone pattern compiles"));

static UK_POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}$").expect("postcode pattern compiles")
});

/// Date format delivered by the date of birth input.
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Eligibility rules for the personal details step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalRules {
    pub age_policy: AgePolicy,
    pub minimum_age: i32,
}

impl Default for PersonalRules {
    fn default() -> Self {
        Self {
            age_policy: AgePolicy::CalendarYear,
            minimum_age: 18,
        }
    }
}

/// Checks the personal details step.
///
/// Every field is required. Email, phone and postcode are also checked for
/// shape, and the date of birth must parse and make the applicant at least
/// `rules.minimum_age` on `today`.
///
/// # Errors
///
/// Returns one message per failing field.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use finance_core::models::{Field, PersonalDetails};
/// use finance_core::validation::{PersonalRules, validate_personal};
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
/// let errors = validate_personal(&PersonalDetails::default(), &PersonalRules::default(), today)
///     .unwrap_err();
///
/// assert_eq!(errors.len(), 8);
/// assert_eq!(errors.get(Field::Email), Some("Email is required"));
/// ```
pub fn validate_personal(
    details: &PersonalDetails,
    rules: &PersonalRules,
    today: NaiveDate,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if details.title.is_none() {
        errors.insert(Field::Title, "Title is required");
    }
    if is_blank(&details.first_name) {
        errors.insert(Field::FirstName, "First name is required");
    }
    if is_blank(&details.last_name) {
        errors.insert(Field::LastName, "Last name is required");
    }

    if is_blank(&details.email) {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL.is_match(&details.email) {
        errors.insert(Field::Email, "Please enter a valid email");
    }

    if is_blank(&details.phone) {
        errors.insert(Field::Phone, "Phone number is required");
    } else {
        let digits: String = details.phone.split_whitespace().collect();
        if !UK_PHONE.is_match(&digits) {
            errors.insert(Field::Phone, "Please enter a valid UK phone number");
        }
    }

    if is_blank(&details.address) {
        errors.insert(Field::Address, "Address is required");
    }

    if is_blank(&details.postcode) {
        errors.insert(Field::Postcode, "Postcode is required");
    } else if !UK_POSTCODE.is_match(details.postcode.trim()) {
        errors.insert(Field::Postcode, "Please enter a valid UK postcode");
    }

    if is_blank(&details.date_of_birth) {
        errors.insert(Field::DateOfBirth, "Date of birth is required");
    } else {
        match NaiveDate::parse_from_str(details.date_of_birth.trim(), DATE_OF_BIRTH_FORMAT) {
            Ok(dob) if rules.age_policy.age_on(dob, today) < rules.minimum_age => {
                errors.insert(
                    Field::DateOfBirth,
                    format!("You must be at least {} years old", rules.minimum_age),
                );
            }
            Ok(_) => {}
            Err(_) => errors.insert(Field::DateOfBirth, "Please enter a valid date"),
        }
    }

    errors.into_result()
}
