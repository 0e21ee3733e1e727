pub mod investigator;
pub mod state;

pub use investigator::{Investigator, DEFAULT_TIMEOUT};
pub use state::{Notice, Phase, Severity, Submission, SubmitOutcome, Ticket};
