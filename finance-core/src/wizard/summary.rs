//! Read-only summary shown on the review step.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::step::WizardVariant;
use crate::calculations::PaymentQuote;
use crate::format::{format_currency, format_date_dmy, or_not_specified, parse_optional_decimal};
use crate::models::{ApplicationState, EmploymentStatus};
use crate::validation::DATE_OF_BIRTH_FORMAT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub title: &'static str,
    pub rows: Vec<SummaryRow>,
}

impl SummarySection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(
        mut self,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.rows.push(SummaryRow {
            label: label.into(),
            value: value.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub sections: Vec<SummarySection>,
}

impl ReviewSummary {
    /// Builds the summary. Without a quote the payment row reads `Unavailable`.
    /// Forms that ask for a vehicle type list it first.
    pub fn build(
        variant: &WizardVariant,
        state: &ApplicationState,
        quote: Option<&PaymentQuote>,
    ) -> Self {
        let loan = &state.loan;
        let payment = quote
            .map(|q| format_currency(q.monthly_payment, 2))
            .unwrap_or_else(|| "Unavailable".to_string());
        let apr = quote
            .map(|q| format!("{}%", q.apr.normalize()))
            .unwrap_or_else(|| "Unavailable".to_string());

        let mut loan_section = SummarySection::new("Loan Details");
        if variant.asks_vehicle_type {
            loan_section = loan_section.row(
                "Vehicle Type",
                loan.vehicle_type
                    .map(|kind| kind.label().to_string())
                    .unwrap_or_else(|| or_not_specified("")),
            );
        }
        let loan_section = loan_section
            .row("Loan Amount", format_currency(loan.amount, 0))
            .row("Deposit", format_currency(loan.deposit, 0))
            .row("Term", format!("{} months", loan.term_months))
            .row("Monthly Payment", payment)
            .row("Representative APR", apr);

        let personal = &state.personal;
        let date_of_birth =
            NaiveDate::parse_from_str(personal.date_of_birth.trim(), DATE_OF_BIRTH_FORMAT)
                .map(format_date_dmy)
                .unwrap_or_else(|_| or_not_specified(&personal.date_of_birth));
        let personal_section = SummarySection::new("Personal Details")
            .row("Full Name", or_not_specified(&personal.display_name()))
            .row("Email", or_not_specified(&personal.email))
            .row("Phone", or_not_specified(&personal.phone))
            .row("Address", or_not_specified(&personal.address))
            .row("Postcode", or_not_specified(&personal.postcode).to_uppercase())
            .row("Date of Birth", date_of_birth);

        let employment = &state.employment;
        let mut employment_section = SummarySection::new("Employment Details").row(
            "Employment Status",
            employment
                .status
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| or_not_specified("")),
        );
        if employment.has_employer() {
            let employer_label = if employment.status == Some(EmploymentStatus::SelfEmployed) {
                "Business Name"
            } else {
                "Employer"
            };
            employment_section = employment_section
                .row(employer_label, or_not_specified(&employment.employer))
                .row("Job Title", or_not_specified(&employment.job_title))
                .row(
                    "Years at Current Employment",
                    or_not_specified(&employment.employment_years),
                );
        }
        let income = parse_optional_decimal(&employment.income)
            .map(|income| format_currency(income, 0))
            .unwrap_or_else(|| or_not_specified(&employment.income));
        employment_section = employment_section.row("Annual Income", income);

        Self {
            sections: vec![loan_section, personal_section, employment_section],
        }
    }

    /// Looks a row up by label across all sections.
    pub fn value(
        &self,
        label: &str,
    ) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|section| &section.rows)
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

impl fmt::Display for ReviewSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.title)?;
            for row in &section.rows {
                writeln!(f, "  {:<30} {}", format!("{}:", row.label), row.value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::{Amortization, AmortizationConfig};
    use crate::models::{LoanDetails, Title, VehicleType};

    fn state() -> ApplicationState {
        let mut state = ApplicationState::new(LoanDetails {
            amount: dec!(10000),
            term_months: 48,
            deposit: dec!(1000),
            vehicle_type: None,
        });
        state.personal.title = Some(Title::Mr);
        state.personal.first_name = "Simon".to_string();
        state.personal.last_name = "Dudley".to_string();
        state.personal.postcode = "ls1 4ap".to_string();
        state.personal.date_of_birth = "1985-06-01".to_string();
        state.employment.status = Some(EmploymentStatus::SelfEmployed);
        state.employment.employer = "Dudley Motors".to_string();
        state.employment.income = "42000".to_string();
        state
    }

    fn full() -> WizardVariant {
        WizardVariant::full_application()
    }

    fn quote() -> PaymentQuote {
        Amortization::new(AmortizationConfig::full_application())
            .quote(dec!(10000), dec!(1000), 48)
            .unwrap()
    }

    #[test]
    fn loan_rows_are_formatted() {
        let summary = ReviewSummary::build(&full(), &state(), Some(&quote()));

        assert_eq!(summary.value("Loan Amount"), Some("£10,000"));
        assert_eq!(summary.value("Deposit"), Some("£1,000"));
        assert_eq!(summary.value("Term"), Some("48 months"));
        assert_eq!(summary.value("Monthly Payment"), Some("£227.83"));
        assert_eq!(summary.value("Representative APR"), Some("9.9%"));
    }

    #[test]
    fn personal_rows_use_display_formats() {
        let summary = ReviewSummary::build(&full(), &state(), Some(&quote()));

        assert_eq!(summary.value("Full Name"), Some("MR Simon Dudley"));
        assert_eq!(summary.value("Date of Birth"), Some("01/06/1985"));
        assert_eq!(summary.value("Postcode"), Some("LS1 4AP"));
        assert_eq!(summary.value("Email"), Some("Not specified"));
    }

    #[test]
    fn self_employed_rows_name_the_business() {
        let summary = ReviewSummary::build(&full(), &state(), Some(&quote()));

        assert_eq!(summary.value("Business Name"), Some("Dudley Motors"));
        assert_eq!(summary.value("Employer"), None);
        assert_eq!(summary.value("Annual Income"), Some("£42,000"));
    }

    #[test]
    fn employer_rows_are_hidden_for_retired() {
        let mut state = state();
        state.employment.status = Some(EmploymentStatus::Retired);

        let summary = ReviewSummary::build(&full(), &state, Some(&quote()));

        assert_eq!(summary.value("Business Name"), None);
        assert_eq!(summary.value("Job Title"), None);
        assert_eq!(summary.value("Employment Status"), Some("Retired"));
    }

    #[test]
    fn missing_quote_is_reported() {
        let summary = ReviewSummary::build(&full(), &state(), None);

        assert_eq!(summary.value("Monthly Payment"), Some("Unavailable"));
    }

    #[test]
    fn vehicle_type_row_only_on_forms_that_ask() {
        let mut state = state();

        let application = ReviewSummary::build(&full(), &state, Some(&quote()));
        let quick = ReviewSummary::build(&WizardVariant::quick_quote(), &state, Some(&quote()));
        assert_eq!(application.value("Vehicle Type"), None);
        assert_eq!(quick.value("Vehicle Type"), Some("Not specified"));

        state.loan.vehicle_type = Some(VehicleType::Suv);
        let quick = ReviewSummary::build(&WizardVariant::quick_quote(), &state, Some(&quote()));
        assert_eq!(quick.value("Vehicle Type"), Some("SUV"));
    }
}
