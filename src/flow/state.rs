use crate::error::{AnalysisError, FlowError, InputError};
use crate::models::{ResultSet, Statement};
use crate::video_url::{self, InputHint};
use serde::Serialize;
use tracing::debug;

/// Identifies one fetch. Completions carrying an older ticket are stale.
pub type Ticket = u64;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Invalid(InputError),
    Fetching { ticket: Ticket },
    Succeeded { found: usize },
    Failed(AnalysisError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Success,
}

/// The message region. Derived from [`Phase`], never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(InputError),
    Started(Ticket),
}

/// Everything the input form and results view show, as one value.
#[derive(Clone, Debug, Default)]
pub struct Submission {
    url: String,
    phase: Phase,
    results: ResultSet,
    analyzed: bool,
    last_ticket: Ticket,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// True once any analysis has succeeded in this session.
    pub fn has_analyzed(&self) -> bool {
        self.analyzed
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Fetching { .. })
    }

    pub fn in_flight(&self) -> Option<Ticket> {
        match self.phase {
            Phase::Fetching { ticket } => Some(ticket),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.url.trim().is_empty()
    }

    pub fn input_hint(&self) -> InputHint {
        video_url::input_hint(&self.url)
    }

    /// Whether the summary and statement list are shown.
    pub fn shows_results(&self) -> bool {
        self.analyzed && !self.results.is_empty()
    }

    pub fn notice(&self) -> Option<Notice> {
        match &self.phase {
            Phase::Idle | Phase::Fetching { .. } => None,
            Phase::Invalid(err) => Some(Notice {
                severity: Severity::Error,
                text: err.to_string(),
            }),
            Phase::Succeeded { found } => Some(Notice {
                severity: Severity::Success,
                text: format!("Found {found} statements to analyze"),
            }),
            Phase::Failed(_) => Some(Notice {
                severity: Severity::Error,
                text: AnalysisError::USER_MESSAGE.to_string(),
            }),
        }
    }

    /// Replaces the input text and clears any message. Results stay.
    pub fn edit(&mut self, url: impl Into<String>) -> Result<(), FlowError> {
        if self.is_loading() {
            return Err(FlowError::Busy);
        }
        self.url = url.into();
        self.phase = Phase::Idle;
        Ok(())
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        if self.is_loading() {
            return Err(FlowError::Busy);
        }
        debug!(url = %self.url, "validating");
        if let Err(err) = video_url::validate_submission(&self.url) {
            self.phase = Phase::Invalid(err);
            return Ok(SubmitOutcome::Rejected(err));
        }
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.results = ResultSet::empty();
        self.phase = Phase::Fetching { ticket };
        Ok(SubmitOutcome::Started(ticket))
    }

    /// Applies the collaborator's answer. Returns false, changing nothing,
    /// when `ticket` is not the fetch currently in flight.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Statement>, AnalysisError>,
    ) -> bool {
        if self.in_flight() != Some(ticket) {
            debug!(ticket, current = ?self.in_flight(), "ignoring stale completion");
            return false;
        }
        let checked = outcome.and_then(|statements| {
            ResultSet::try_from_statements(statements).map_err(AnalysisError::from)
        });
        match checked {
            Ok(results) => {
                self.phase = Phase::Succeeded {
                    found: results.len(),
                };
                self.results = results;
                self.analyzed = true;
            }
            Err(err) => {
                self.results = ResultSet::empty();
                self.phase = Phase::Failed(err);
            }
        }
        true
    }

    /// Abandons the fetch in flight, if any, and returns to idle.
    pub fn cancel(&mut self) -> Option<Ticket> {
        let ticket = self.in_flight()?;
        self.phase = Phase::Idle;
        Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::canned_statements;

    fn started(submission: &mut Submission) -> Ticket {
        match submission.submit().expect("not busy") {
            SubmitOutcome::Started(ticket) => ticket,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn blank_input_never_fetches() {
        for input in ["", "   ", "\t\n"] {
            let mut submission = Submission::new();
            submission.edit(input).expect("idle");
            let outcome = submission.submit().expect("not busy");
            assert_eq!(outcome, SubmitOutcome::Rejected(InputError::Empty));
            assert!(!submission.is_loading());
            assert_eq!(
                submission.notice().map(|n| n.text),
                Some("Please enter a YouTube URL".to_string())
            );
        }
    }

    #[test]
    fn unrecognized_input_is_rejected() {
        let mut submission = Submission::new();
        submission.edit("https://vimeo.com/1").expect("idle");
        assert_eq!(
            submission.submit().expect("not busy"),
            SubmitOutcome::Rejected(InputError::InvalidShape)
        );
        let notice = submission.notice().expect("message");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.text, "Please enter a valid YouTube URL");
    }

    #[test]
    fn fetching_clears_message_and_results() {
        let mut submission = Submission::new();
        submission.edit("youtu.be/abc123").expect("idle");
        let ticket = started(&mut submission);
        submission.complete(ticket, Ok(canned_statements()));
        assert_eq!(submission.results().len(), 5);

        started(&mut submission);
        assert!(submission.is_loading());
        assert!(submission.notice().is_none());
        assert!(submission.results().is_empty());
        assert!(!submission.can_submit());
    }

    #[test]
    fn success_populates_results_and_reports_count() {
        let mut submission = Submission::new();
        submission
            .edit("https://youtube.com/watch?v=abc123")
            .expect("idle");
        let ticket = started(&mut submission);
        assert!(submission.complete(ticket, Ok(canned_statements())));

        assert_eq!(submission.phase(), &Phase::Succeeded { found: 5 });
        assert!(!submission.is_loading());
        assert!(submission.has_analyzed());
        assert!(submission.shows_results());
        let notice = submission.notice().expect("message");
        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.text, "Found 5 statements to analyze");
    }

    #[test]
    fn failure_leaves_results_empty() {
        let mut submission = Submission::new();
        submission.edit("youtu.be/abc123").expect("idle");
        let ticket = started(&mut submission);
        submission.complete(ticket, Err(AnalysisError::Transport("reset".into())));

        assert!(matches!(submission.phase(), Phase::Failed(_)));
        assert!(submission.results().is_empty());
        assert!(!submission.has_analyzed());
        assert_eq!(
            submission.notice().map(|n| n.text),
            Some("Failed to analyze. Please try again.".to_string())
        );
    }

    #[test]
    fn invariant_violations_fail_the_analysis() {
        let mut submission = Submission::new();
        submission.edit("youtu.be/abc123").expect("idle");
        let ticket = started(&mut submission);
        let mut statements = canned_statements();
        statements[2].score = 140;
        submission.complete(ticket, Ok(statements));
        assert!(matches!(
            submission.phase(),
            Phase::Failed(AnalysisError::InvalidStatement(_))
        ));
        assert!(submission.results().is_empty());
    }

    #[test]
    fn editing_after_error_keeps_previous_results() {
        let mut submission = Submission::new();
        submission.edit("youtu.be/abc123").expect("idle");
        let ticket = started(&mut submission);
        submission.complete(ticket, Ok(canned_statements()));

        submission.edit("nonsense").expect("idle");
        submission.submit().expect("not busy");
        assert!(submission.notice().is_some());

        submission.edit("nonsense!").expect("idle");
        assert!(submission.notice().is_none());
        assert_eq!(submission.phase(), &Phase::Idle);
        assert_eq!(submission.results().len(), 5);
        assert!(submission.shows_results());
    }

    #[test]
    fn input_is_locked_while_fetching() {
        let mut submission = Submission::new();
        submission.edit("youtu.be/abc123").expect("idle");
        started(&mut submission);
        assert_eq!(submission.edit("other"), Err(FlowError::Busy));
        assert_eq!(submission.submit(), Err(FlowError::Busy));
        assert_eq!(submission.url(), "youtu.be/abc123");
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut submission = Submission::new();
        submission.edit("youtu.be/abc123").expect("idle");
        let first = started(&mut submission);
        assert_eq!(submission.cancel(), Some(first));

        let second = started(&mut submission);
        assert_ne!(first, second);
        assert!(!submission.complete(first, Ok(canned_statements())));
        assert!(submission.is_loading());

        assert!(submission.complete(second, Ok(Vec::new())));
        assert_eq!(submission.phase(), &Phase::Succeeded { found: 0 });
        assert!(!submission.complete(second, Ok(canned_statements())));
        assert!(submission.results().is_empty());
    }

    #[test]
    fn can_submit_requires_text_and_no_fetch() {
        let mut submission = Submission::new();
        assert!(!submission.can_submit());
        submission.edit("  ").expect("idle");
        assert!(!submission.can_submit());
        submission.edit("anything").expect("idle");
        assert!(submission.can_submit());
        assert_eq!(submission.input_hint(), InputHint::Invalid);
    }

    #[test]
    fn cancel_without_fetch_is_a_no_op() {
        let mut submission = Submission::new();
        assert_eq!(submission.cancel(), None);
        assert_eq!(submission.phase(), &Phase::Idle);
    }
}
