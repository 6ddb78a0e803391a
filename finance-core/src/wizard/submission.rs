//! The boundary between the wizard and whatever receives a finished application.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::VariantKind;
use crate::calculations::PaymentQuote;
use crate::models::ApplicationState;

/// Everything handed over when an application is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub variant: VariantKind,
    pub application: ApplicationState,
    pub quote: PaymentQuote,
    pub submitted_on: NaiveDate,
}

/// What the applicant is told once the application has been received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub title: String,
    pub message: String,
}

impl Acknowledgement {
    pub fn received() -> Self {
        Self {
            title: "Application submitted!".to_string(),
            message: "We've received your application and will contact you shortly.".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The receiver looked at the application and refused it.
    #[error("application rejected: {0}")]
    Rejected(String),

    /// The receiver could not take the application at all.
    #[error("submission handler unavailable: {0}")]
    Unavailable(String),
}

/// Receives finished applications.
pub trait SubmissionHandler {
    fn submit(
        &mut self,
        submission: &ApplicationSubmission,
    ) -> Result<Acknowledgement, SubmissionError>;
}

/// Acknowledges every application without sending it anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcknowledgeOnly;

impl SubmissionHandler for AcknowledgeOnly {
    fn submit(
        &mut self,
        submission: &ApplicationSubmission,
    ) -> Result<Acknowledgement, SubmissionError> {
        info!(
            variant = submission.variant.as_str(),
            principal = %submission.quote.principal,
            monthly_payment = %submission.quote.monthly_payment,
            "application acknowledged"
        );
        Ok(Acknowledgement::received())
    }
}
