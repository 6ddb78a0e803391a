mod apply;
mod quote;
mod showcase;

pub use apply::{ApplyOutcome, ConsoleHandler, run_apply};
pub use quote::run_quote;
pub use showcase::{Frame, run_showcase};
