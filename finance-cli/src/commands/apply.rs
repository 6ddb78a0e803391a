use std::io::Write;

use anyhow::Result;
use finance_core::calculations::AmortizationError;
use finance_core::format::format_currency;
use finance_core::validation::FieldErrors;
use finance_core::wizard::{
    Acknowledgement, ApplicationSubmission, Step, SubmissionError, SubmissionHandler, Wizard,
    WizardError,
};
use tracing::{debug, info};

use crate::answers::Answers;

/// How an `apply` run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Submitted(Acknowledgement),
    /// A step refused the answers it was given.
    Refused { step: Step, errors: FieldErrors },
    /// The loan could not be quoted, so there was nothing to submit.
    Unquotable(AmortizationError),
}

/// Prints each submitted application as JSON.
pub struct ConsoleHandler<W: Write> {
    out: W,
}

impl<W: Write> ConsoleHandler<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SubmissionHandler for ConsoleHandler<W> {
    fn submit(
        &mut self,
        submission: &ApplicationSubmission,
    ) -> Result<Acknowledgement, SubmissionError> {
        let json = serde_json::to_string_pretty(submission)
            .map_err(|e| SubmissionError::Unavailable(e.to_string()))?;
        writeln!(self.out, "{json}").map_err(|e| SubmissionError::Unavailable(e.to_string()))?;
        info!(
            variant = submission.variant.as_str(),
            principal = %submission.quote.principal,
            "application printed"
        );
        Ok(Acknowledgement::received())
    }
}

fn print_errors(
    out: &mut impl Write,
    errors: &FieldErrors,
) -> Result<()> {
    for (field, message) in errors.iter() {
        writeln!(out, "  ✗ {field}: {message}")?;
    }
    Ok(())
}

/// Walks the wizard from its first step to submission, typing in each
/// step's answers before moving on.
///
/// # Errors
///
/// Fails when the handler fails or output cannot be written. Refused steps
/// are reported through [`ApplyOutcome`].
pub fn run_apply(
    wizard: &mut Wizard,
    answers: &Answers,
    handler: &mut dyn SubmissionHandler,
    out: &mut impl Write,
) -> Result<ApplyOutcome> {
    loop {
        let spec = wizard.current_spec();
        writeln!(
            out,
            "Step {} of {}: {}",
            wizard.current_index() + 1,
            wizard.steps().len(),
            spec.label
        )?;

        if let Some(section) = spec.step.section() {
            let accepted = answers.fill(wizard, section);
            debug!(step = %spec.step, accepted, "filled answers");
        }

        if wizard.is_terminal() {
            break;
        }

        if spec.step == Step::LoanDetails {
            match wizard.quote() {
                Ok(quote) => writeln!(
                    out,
                    "  monthly payment {} over {} months",
                    format_currency(quote.monthly_payment, 2),
                    quote.term_months
                )?,
                Err(err) => return Ok(ApplyOutcome::Unquotable(err)),
            }
        }

        match wizard.go_next() {
            Ok(_) => {}
            Err(WizardError::Validation { step, errors }) => {
                print_errors(out, &errors)?;
                return Ok(ApplyOutcome::Refused { step, errors });
            }
            Err(other) => return Err(other.into()),
        }
    }

    write!(out, "{}", wizard.review_summary())?;

    match wizard.submit(handler) {
        Ok(ack) => {
            writeln!(out, "{}", ack.title)?;
            writeln!(out, "{}", ack.message)?;
            Ok(ApplyOutcome::Submitted(ack))
        }
        Err(WizardError::Validation { step, errors }) => {
            print_errors(out, &errors)?;
            Ok(ApplyOutcome::Refused { step, errors })
        }
        Err(WizardError::Quote(err)) => Ok(ApplyOutcome::Unquotable(err)),
        Err(other) => Err(other.into()),
    }
}
