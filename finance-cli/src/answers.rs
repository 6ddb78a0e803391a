//! Pre-filled form answers, read from a TOML file with one table per section.
//!
//! ```toml
//! [loan]
//! amount = 15000
//! deposit = 2000
//! term = 36
//!
//! [personal]
//! title = "mr"
//! firstName = "John"
//!
//! [employment]
//! status = "student"
//! income = "8000"
//! ```
//!
//! Keys are the form's field names. Values may be strings or numbers.

use std::path::Path;

use anyhow::{Context, Result};
use finance_core::models::{Field, Section};
use finance_core::wizard::Wizard;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Answers {
    pub loan: toml::Table,
    pub personal: toml::Table,
    pub employment: toml::Table,
}

fn value_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

impl Answers {
    /// # Errors
    ///
    /// Fails on malformed TOML.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid answers file")
    }

    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Failed to load: {}", path.display()))
    }

    pub fn section(
        &self,
        section: Section,
    ) -> &toml::Table {
        match section {
            Section::Loan => &self.loan,
            Section::Personal => &self.personal,
            Section::Employment => &self.employment,
        }
    }

    /// The answers for `section` that name a known field, in form order.
    pub fn entries(
        &self,
        section: Section,
    ) -> Vec<(Field, String)> {
        let mut entries: Vec<_> = self
            .section(section)
            .iter()
            .filter_map(|(key, value)| {
                let Some(field) = Field::parse(section, key) else {
                    warn!(section = section.as_str(), key, "unknown answer key");
                    return None;
                };
                let Some(text) = value_text(value) else {
                    warn!(field = %field, "answer is neither text nor a number");
                    return None;
                };
                Some((field, text))
            })
            .collect();
        entries.sort_by_key(|(field, _)| *field);
        entries
    }

    /// Types this section's answers into the wizard. Returns how many were
    /// accepted.
    pub fn fill(
        &self,
        wizard: &mut Wizard,
        section: Section,
    ) -> usize {
        self.entries(section)
            .into_iter()
            .filter(|(field, text)| wizard.update_field(*field, text))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use finance_core::validation::PersonalRules;
    use finance_core::wizard::WizardVariant;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn entries_follow_form_order() {
        let answers = Answers::from_toml(
            r#"
            [loan]
            term = 36
            deposit = "2,000"
            amount = 15000
            "#,
        )
        .unwrap();

        let fields: Vec<_> = answers
            .entries(Section::Loan)
            .into_iter()
            .map(|(field, _)| field)
            .collect();

        assert_eq!(fields, vec![Field::Amount, Field::TermMonths, Field::Deposit]);
    }

    #[test]
    fn unknown_keys_and_tables_are_skipped() {
        let answers = Answers::from_toml(
            r#"
            [personal]
            firstName = "John"
            nickname = "JJ"
            phone = ["0770", "0900"]
            "#,
        )
        .unwrap();

        assert_eq!(
            answers.entries(Section::Personal),
            vec![(Field::FirstName, "John".to_string())]
        );
    }

    #[test]
    fn fill_types_answers_into_wizard() {
        let answers = Answers::from_toml(
            r#"
            [loan]
            amount = 15000
            deposit = "2,000"
            term = 36
            "#,
        )
        .unwrap();
        let mut wizard = Wizard::new(WizardVariant::full_application(), PersonalRules::default());

        let accepted = answers.fill(&mut wizard, Section::Loan);

        assert_eq!(accepted, 3);
        assert_eq!(wizard.state().loan.amount, dec!(15000));
        assert_eq!(wizard.state().loan.deposit, dec!(2000));
        assert_eq!(wizard.state().loan.term_months, 36);
    }

    #[test]
    fn missing_sections_are_empty() {
        let answers = Answers::from_toml("").unwrap();

        assert!(answers.entries(Section::Employment).is_empty());
    }
}
