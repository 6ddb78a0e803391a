use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::AmortizationConfig;
use super::controller::WizardError;
use crate::models::{EmploymentStatus, LoanDetails, LoanLimits, Section};

/// A page of the application wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    LoanDetails,
    PersonalDetails,
    EmploymentDetails,
    Review,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoanDetails => "loanDetails",
            Self::PersonalDetails => "personalDetails",
            Self::EmploymentDetails => "employmentDetails",
            Self::Review => "review",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "loanDetails" | "loan" => Some(Self::LoanDetails),
            "personalDetails" | "personal" => Some(Self::PersonalDetails),
            "employmentDetails" | "employment" => Some(Self::EmploymentDetails),
            "review" => Some(Self::Review),
            _ => None,
        }
    }

    /// The application section edited on this step, if any.
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::LoanDetails => Some(Section::Loan),
            Self::PersonalDetails => Some(Section::Personal),
            Self::EmploymentDetails => Some(Section::Employment),
            Self::Review => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a variant's step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub step: Step,
    pub label: &'static str,
    /// Whether leaving this step forwards runs its validator.
    pub validated: bool,
}

impl StepSpec {
    pub const fn new(
        step: Step,
        label: &'static str,
        validated: bool,
    ) -> Self {
        Self {
            step,
            label,
            validated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// Progress indicator entry for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    /// 1-based position.
    pub number: usize,
    pub step: Step,
    pub label: &'static str,
    pub status: StepStatus,
}

/// Which application form a page embeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    /// Four validated steps: loan, personal, employment, review.
    #[default]
    Application,
    /// The shorter vehicle/finance/personal/complete form without field checks.
    QuickQuote,
}

impl VariantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::QuickQuote => "quick-quote",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "application" => Some(Self::Application),
            "quick-quote" | "quick" => Some(Self::QuickQuote),
            _ => None,
        }
    }
}

/// Everything that differs between form variants.
///
/// A variant always has at least one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardVariant {
    pub kind: VariantKind,
    steps: Vec<StepSpec>,
    pub limits: LoanLimits,
    pub amortization: AmortizationConfig,
    /// Loan values a fresh application starts with.
    pub seed: LoanDetails,
    /// Tab navigation: any step can be selected directly, skipping validation.
    pub allow_jump: bool,
    /// Employment statuses the form offers, in display order.
    pub statuses: &'static [EmploymentStatus],
    /// Whether the form asks for a vehicle type.
    pub asks_vehicle_type: bool,
}

impl WizardVariant {
    pub fn full_application() -> Self {
        Self {
            kind: VariantKind::Application,
            steps: vec![
                StepSpec::new(Step::LoanDetails, "Loan Details", true),
                StepSpec::new(Step::PersonalDetails, "Personal Details", true),
                StepSpec::new(Step::EmploymentDetails, "Employment Details", true),
                StepSpec::new(Step::Review, "Review", false),
            ],
            limits: LoanLimits::full_application(),
            amortization: AmortizationConfig::full_application(),
            seed: LoanDetails {
                amount: Decimal::from(10_000),
                term_months: 48,
                deposit: Decimal::from(1_000),
                vehicle_type: None,
            },
            allow_jump: false,
            statuses: EmploymentStatus::application_options(),
            asks_vehicle_type: false,
        }
    }

    pub fn quick_quote() -> Self {
        Self {
            kind: VariantKind::QuickQuote,
            steps: vec![
                StepSpec::new(Step::LoanDetails, "Vehicle", false),
                StepSpec::new(Step::EmploymentDetails, "Finance", false),
                StepSpec::new(Step::PersonalDetails, "Personal", false),
                StepSpec::new(Step::Review, "Complete", false),
            ],
            limits: LoanLimits::quick_quote(),
            amortization: AmortizationConfig::quick_quote(),
            seed: LoanDetails {
                amount: Decimal::from(25_000),
                term_months: 60,
                deposit: Decimal::from(5_000),
                vehicle_type: None,
            },
            allow_jump: false,
            statuses: EmploymentStatus::quick_quote_options(),
            asks_vehicle_type: true,
        }
    }

    pub fn from_kind(kind: VariantKind) -> Self {
        match kind {
            VariantKind::Application => Self::full_application(),
            VariantKind::QuickQuote => Self::quick_quote(),
        }
    }

    pub fn with_apr(
        mut self,
        apr: Decimal,
    ) -> Self {
        self.amortization.apr = apr;
        self
    }

    pub fn with_jump(
        mut self,
        allow_jump: bool,
    ) -> Self {
        self.allow_jump = allow_jump;
        self
    }

    /// Replaces the step list.
    ///
    /// # Errors
    ///
    /// [`WizardError::NoSteps`] for an empty list.
    pub fn with_steps(
        mut self,
        steps: Vec<StepSpec>,
    ) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        self.steps = steps;
        Ok(self)
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    pub fn offers_status(
        &self,
        status: EmploymentStatus,
    ) -> bool {
        self.statuses.contains(&status)
    }

    pub fn position(
        &self,
        step: Step,
    ) -> Option<usize> {
        self.steps.iter().position(|spec| spec.step == step)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn full_application_ends_at_review() {
        let variant = WizardVariant::full_application();

        let steps: Vec<_> = variant.steps().iter().map(|spec| spec.step).collect();

        assert_eq!(
            steps,
            vec![
                Step::LoanDetails,
                Step::PersonalDetails,
                Step::EmploymentDetails,
                Step::Review
            ]
        );
    }

    #[test]
    fn seeds_sit_inside_their_limits() {
        for variant in [WizardVariant::full_application(), WizardVariant::quick_quote()] {
            assert_eq!(variant.limits.clamp(variant.seed), variant.seed, "{:?}", variant.kind);
        }
    }

    #[test]
    fn quick_quote_asks_finance_before_personal() {
        let variant = WizardVariant::quick_quote();

        assert_eq!(variant.position(Step::EmploymentDetails), Some(1));
        assert_eq!(variant.position(Step::PersonalDetails), Some(2));
        assert!(variant.steps().iter().all(|spec| !spec.validated));
    }

    #[test]
    fn empty_step_list_is_rejected() {
        let result = WizardVariant::full_application().with_steps(Vec::new());

        assert_eq!(result, Err(WizardError::NoSteps));
    }

    #[test]
    fn with_steps_replaces_the_list() {
        let variant = WizardVariant::full_application()
            .with_steps(vec![StepSpec::new(Step::Review, "Review", false)])
            .unwrap();

        assert_eq!(variant.steps().len(), 1);
        assert_eq!(variant.position(Step::LoanDetails), None);
    }

    #[test]
    fn quick_quote_offers_its_own_statuses() {
        let quick = WizardVariant::quick_quote();
        let full = WizardVariant::full_application();

        assert!(quick.offers_status(EmploymentStatus::FullTime));
        assert!(!quick.offers_status(EmploymentStatus::Student));
        assert!(full.offers_status(EmploymentStatus::Student));
        assert!(!full.offers_status(EmploymentStatus::PartTime));
        assert!(quick.asks_vehicle_type);
        assert!(!full.asks_vehicle_type);
    }

    #[test]
    fn step_parse_accepts_short_names() {
        assert_eq!(Step::parse("personal"), Some(Step::PersonalDetails));
        assert_eq!(Step::parse("review"), Some(Step::Review));
        assert_eq!(Step::parse("summary"), None);
    }

    #[test]
    fn variant_kind_round_trips_through_str() {
        for kind in [VariantKind::Application, VariantKind::QuickQuote] {
            assert_eq!(VariantKind::parse(kind.as_str()), Some(kind));
        }
    }
}
