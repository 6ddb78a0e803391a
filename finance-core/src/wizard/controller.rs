//! The step-by-step application controller.
//!
//! A [`Wizard`] owns one in-progress application. The view feeds it field
//! edits and navigation requests; the wizard decides whether a transition is
//! allowed, keeps the field errors for the current step and hands the
//! finished application to a [`SubmissionHandler`].

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::step::{Step, StepProgress, StepSpec, StepStatus, WizardVariant};
use super::submission::{
    Acknowledgement, ApplicationSubmission, SubmissionError, SubmissionHandler,
};
use super::summary::ReviewSummary;
use crate::calculations::{Amortization, AmortizationError, PaymentQuote};
use crate::format::parse_optional_decimal;
use crate::models::{ApplicationState, EmploymentStatus, Field, Section, Title, VehicleType};
use crate::validation::{FieldErrors, PersonalRules, validate_employment, validate_personal};

/// Errors from driving the wizard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("applications can only be submitted from the review step")]
    NotAtReview,

    #[error("this form does not allow jumping between steps")]
    JumpNotAllowed,

    #[error("step {0} is not part of this form")]
    UnknownStep(Step),

    #[error("a form needs at least one step")]
    NoSteps,

    /// The step's validator refused the transition.
    #[error("{step} has {} invalid field(s): {errors}", .errors.len())]
    Validation { step: Step, errors: FieldErrors },

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("could not quote the loan: {0}")]
    Quote(#[from] AmortizationError),
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Drives one application through the steps of a [`WizardVariant`].
#[derive(Debug, Clone)]
pub struct Wizard {
    variant: WizardVariant,
    rules: PersonalRules,
    calculator: Amortization,
    state: ApplicationState,
    current: usize,
    errors: FieldErrors,
    clock: fn() -> NaiveDate,
}

impl Wizard {
    /// Starts a fresh application on the variant's first step.
    ///
    /// # Example
    ///
    /// ```
    /// use finance_core::validation::PersonalRules;
    /// use finance_core::wizard::{Step, Wizard, WizardVariant};
    ///
    /// let mut wizard = Wizard::new(WizardVariant::full_application(), PersonalRules::default());
    /// assert_eq!(wizard.current_step(), Step::LoanDetails);
    ///
    /// // The loan step has no field checks.
    /// assert_eq!(wizard.go_next(), Ok(Step::PersonalDetails));
    ///
    /// // An empty personal step is refused with every message at once.
    /// assert!(wizard.go_next().is_err());
    /// assert_eq!(wizard.errors().len(), 8);
    /// ```
    pub fn new(
        variant: WizardVariant,
        rules: PersonalRules,
    ) -> Self {
        let calculator = Amortization::new(variant.amortization);
        let state = ApplicationState::new(variant.limits.clamp(variant.seed));
        Self {
            variant,
            rules,
            calculator,
            state,
            current: 0,
            errors: FieldErrors::new(),
            clock: local_today,
        }
    }

    /// Replaces the source of "today" used for the age check and the
    /// submission date.
    pub fn with_clock(
        mut self,
        clock: fn() -> NaiveDate,
    ) -> Self {
        self.clock = clock;
        self
    }

    pub fn variant(&self) -> &WizardVariant {
        &self.variant
    }

    pub fn rules(&self) -> &PersonalRules {
        &self.rules
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    /// Errors from the last refused transition, minus fields edited since.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn steps(&self) -> &[StepSpec] {
        self.variant.steps()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_spec(&self) -> StepSpec {
        self.variant.steps()[self.current]
    }

    pub fn current_step(&self) -> Step {
        self.current_spec().step
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_terminal(&self) -> bool {
        self.current + 1 >= self.variant.steps().len()
    }

    pub fn progress(&self) -> Vec<StepProgress> {
        self.variant
            .steps()
            .iter()
            .enumerate()
            .map(|(i, spec)| StepProgress {
                number: i + 1,
                step: spec.step,
                label: spec.label,
                status: match i.cmp(&self.current) {
                    std::cmp::Ordering::Less => StepStatus::Completed,
                    std::cmp::Ordering::Equal => StepStatus::Current,
                    std::cmp::Ordering::Greater => StepStatus::Upcoming,
                },
            })
            .collect()
    }

    /// Leaves the current step forwards.
    ///
    /// Steps marked as validated must pass their checks first; on failure
    /// the wizard stays put, keeps every message in [`Wizard::errors`] and
    /// returns them. At the terminal step this does nothing.
    ///
    /// # Errors
    ///
    /// [`WizardError::Validation`] when the current step is refused.
    pub fn go_next(&mut self) -> Result<Step, WizardError> {
        if self.is_terminal() {
            return Ok(self.current_step());
        }

        let spec = self.current_spec();
        if spec.validated {
            if let Err(errors) = self.validate_step(spec.step) {
                debug!(step = %spec.step, failures = errors.len(), "step refused");
                self.errors = errors.clone();
                return Err(WizardError::Validation {
                    step: spec.step,
                    errors,
                });
            }
        }

        self.errors.clear();
        self.current += 1;
        debug!(from = %spec.step, to = %self.current_step(), "advanced");
        Ok(self.current_step())
    }

    /// Moves back one step without validating. At the first step this does
    /// nothing.
    pub fn go_prev(&mut self) -> Step {
        if self.current > 0 {
            self.current -= 1;
            debug!(to = %self.current_step(), "went back");
        }
        self.current_step()
    }

    /// Selects a step directly, skipping validation. Only forms with tab
    /// navigation allow it.
    ///
    /// # Errors
    ///
    /// [`WizardError::JumpNotAllowed`] without tab navigation, or
    /// [`WizardError::UnknownStep`] for a step the form does not have.
    pub fn jump_to(
        &mut self,
        step: Step,
    ) -> Result<Step, WizardError> {
        if !self.variant.allow_jump {
            return Err(WizardError::JumpNotAllowed);
        }
        let index = self
            .variant
            .position(step)
            .ok_or(WizardError::UnknownStep(step))?;
        self.current = index;
        self.errors.clear();
        debug!(to = %step, "jumped");
        Ok(step)
    }

    /// Applies one edit to the application.
    ///
    /// Only `field` changes, and its error (if any) is cleared. Loan values
    /// are held to the form's slider limits. Input that cannot be read for
    /// the field, such as a non-numeric amount or an unknown title, is
    /// ignored. Returns whether the edit was applied.
    pub fn update_field(
        &mut self,
        field: Field,
        value: &str,
    ) -> bool {
        let applied = match field.section() {
            Section::Loan => self.update_loan(field, value),
            Section::Personal => self.update_personal(field, value),
            Section::Employment => self.update_employment(field, value),
        };

        if applied {
            self.errors.remove(field);
        } else {
            warn!(field = %field, value, "ignored unreadable input");
        }
        applied
    }

    /// [`Wizard::update_field`] addressed by section and form key, as a
    /// submitted form names its inputs.
    pub fn update_named(
        &mut self,
        section: Section,
        name: &str,
        value: &str,
    ) -> bool {
        match Field::parse(section, name) {
            Some(field) => self.update_field(field, value),
            None => {
                warn!(section = section.as_str(), name, "ignored unknown field");
                false
            }
        }
    }

    fn update_loan(
        &mut self,
        field: Field,
        value: &str,
    ) -> bool {
        let limits = &self.variant.limits;
        let loan = &mut self.state.loan;
        match field {
            Field::VehicleType => {
                if !self.variant.asks_vehicle_type {
                    return false;
                }
                if value.trim().is_empty() {
                    loan.vehicle_type = None;
                    return true;
                }
                let Some(vehicle_type) = VehicleType::parse(value) else {
                    return false;
                };
                loan.vehicle_type = Some(vehicle_type);
            }
            Field::Amount => {
                let Some(amount) = parse_optional_decimal(value) else {
                    return false;
                };
                loan.amount = limits.clamp_amount(amount);
                loan.deposit = limits.clamp_deposit(loan.deposit, loan.amount);
            }
            Field::Deposit => {
                let Some(deposit) = parse_optional_decimal(value) else {
                    return false;
                };
                loan.deposit = limits.clamp_deposit(deposit, loan.amount);
            }
            Field::TermMonths => {
                let Ok(term) = value.trim().parse::<u32>() else {
                    return false;
                };
                loan.term_months = limits.terms.snap(term);
            }
            _ => return false,
        }
        true
    }

    fn update_personal(
        &mut self,
        field: Field,
        value: &str,
    ) -> bool {
        let personal = &mut self.state.personal;
        let text = match field {
            Field::Title => {
                if value.trim().is_empty() {
                    personal.title = None;
                    return true;
                }
                return match Title::parse(value) {
                    Some(title) => {
                        personal.title = Some(title);
                        true
                    }
                    None => false,
                };
            }
            Field::FirstName => &mut personal.first_name,
            Field::LastName => &mut personal.last_name,
            Field::Email => &mut personal.email,
            Field::Phone => &mut personal.phone,
            Field::Address => &mut personal.address,
            Field::Postcode => &mut personal.postcode,
            Field::DateOfBirth => &mut personal.date_of_birth,
            _ => return false,
        };
        *text = value.to_string();
        true
    }

    fn update_employment(
        &mut self,
        field: Field,
        value: &str,
    ) -> bool {
        let employment = &mut self.state.employment;
        let text = match field {
            Field::Status => {
                if value.trim().is_empty() {
                    employment.status = None;
                    return true;
                }
                return match EmploymentStatus::parse(value) {
                    Some(status) if self.variant.offers_status(status) => {
                        employment.status = Some(status);
                        true
                    }
                    _ => false,
                };
            }
            Field::Employer => &mut employment.employer,
            Field::JobTitle => &mut employment.job_title,
            Field::Income => &mut employment.income,
            Field::EmploymentYears => &mut employment.employment_years,
            _ => return false,
        };
        *text = value.to_string();
        true
    }

    /// Runs the checks for `step` against the current application.
    ///
    /// # Errors
    ///
    /// Returns every failing field of that step.
    pub fn validate_step(
        &self,
        step: Step,
    ) -> Result<(), FieldErrors> {
        match step {
            Step::LoanDetails | Step::Review => Ok(()),
            Step::PersonalDetails => {
                validate_personal(&self.state.personal, &self.rules, (self.clock)())
            }
            Step::EmploymentDetails => validate_employment(&self.state.employment),
        }
    }

    /// Quotes the loan as currently entered.
    ///
    /// # Errors
    ///
    /// See [`Amortization::quote`].
    pub fn quote(&self) -> Result<PaymentQuote, AmortizationError> {
        let loan = &self.state.loan;
        self.calculator
            .quote(loan.amount, loan.deposit, loan.term_months)
    }

    pub fn review_summary(&self) -> ReviewSummary {
        ReviewSummary::build(&self.variant, &self.state, self.quote().ok().as_ref())
    }

    /// Hands the application to `handler` and starts over.
    ///
    /// Every validated step is checked again first, since tab navigation can
    /// skip them; the wizard moves to the first refused step. After the
    /// handler accepts, the application is discarded and the wizard returns
    /// to its first step with the form's starting loan values. If the handler
    /// fails, the application is kept so the applicant can retry.
    ///
    /// # Errors
    ///
    /// [`WizardError::NotAtReview`] before the terminal step,
    /// [`WizardError::Validation`] for a refused step, and errors from
    /// quoting or from the handler.
    pub fn submit(
        &mut self,
        handler: &mut dyn SubmissionHandler,
    ) -> Result<Acknowledgement, WizardError> {
        if !self.is_terminal() {
            return Err(WizardError::NotAtReview);
        }

        for (index, spec) in self.variant.steps().iter().enumerate() {
            if !spec.validated {
                continue;
            }
            if let Err(errors) = self.validate_step(spec.step) {
                warn!(step = %spec.step, failures = errors.len(), "submission refused");
                self.current = index;
                self.errors = errors.clone();
                return Err(WizardError::Validation {
                    step: spec.step,
                    errors,
                });
            }
        }

        let submission = ApplicationSubmission {
            variant: self.variant.kind,
            application: self.state.clone(),
            quote: self.quote()?,
            submitted_on: (self.clock)(),
        };
        let acknowledgement = handler.submit(&submission)?;
        info!(variant = self.variant.kind.as_str(), "application submitted");

        self.reset();
        Ok(acknowledgement)
    }

    /// Discards the application and returns to the first step.
    pub fn reset(&mut self) {
        self.state = ApplicationState::new(self.variant.limits.clamp(self.variant.seed));
        self.errors.clear();
        self.current = 0;
    }
}
