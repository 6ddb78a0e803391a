//! The multi-step finance application form.

mod controller;
mod step;
mod submission;
mod summary;

pub use controller::{Wizard, WizardError};
pub use step::{Step, StepProgress, StepSpec, StepStatus, VariantKind, WizardVariant};
pub use submission::{
    AcknowledgeOnly, Acknowledgement, ApplicationSubmission, SubmissionError, SubmissionHandler,
};
pub use summary::{ReviewSummary, SummaryRow, SummarySection};
