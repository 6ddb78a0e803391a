use super::{FieldErrors, is_blank, parse_leading_int};
use crate::models::{EmploymentDetails, Field};

/// Checks the employment details step.
///
/// Status and income are always required. Employer, job title and years in
/// the job are only asked of the employed and self-employed. Income reads
/// as a whole number of pounds (commas allowed) and must be positive; years
/// must be zero or more.
///
/// # Errors
///
/// Returns one message per failing field.
pub fn validate_employment(details: &EmploymentDetails) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if details.status.is_none() {
        errors.insert(Field::Status, "Employment status is required");
    }

    if details.has_employer() {
        if is_blank(&details.employer) {
            errors.insert(Field::Employer, "Employer name is required");
        }
        if is_blank(&details.job_title) {
            errors.insert(Field::JobTitle, "Job title is required");
        }
    }

    if is_blank(&details.income) {
        errors.insert(Field::Income, "Annual income is required");
    } else {
        match parse_leading_int(&details.income.replace(',', "")) {
            Some(income) if income > 0 => {}
            _ => errors.insert(Field::Income, "Please enter a valid income amount"),
        }
    }

    if details.has_employer() {
        if is_blank(&details.employment_years) {
            errors.insert(
                Field::EmploymentYears,
                "Years at current employment is required",
            );
        } else {
            match parse_leading_int(&details.employment_years) {
                Some(years) if years >= 0 => {}
                _ => errors.insert(
                    Field::EmploymentYears,
                    "Please enter a valid number of years",
                ),
            }
        }
    }

    errors.into_result()
}
