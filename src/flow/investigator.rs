use crate::error::{AnalysisError, FlowError};
use crate::flow::state::{Phase, Submission, SubmitOutcome, Ticket};
use crate::models::{RequestId, SessionId, Statement};
use crate::pipeline::VideoAnalyzer;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

struct InFlight {
    ticket: Ticket,
    request: RequestId,
    handle: JoinHandle<Result<Vec<Statement>, AnalysisError>>,
}

/// Drives a [`Submission`] against an analyzer.
///
/// Each fetch runs as its own tokio task bounded by `timeout`. The task is
/// aborted on [`Investigator::cancel`] and when the investigator is dropped,
/// so a late answer can never land on a torn-down session.
pub struct Investigator<A: VideoAnalyzer + 'static> {
    session: SessionId,
    analyzer: Arc<A>,
    timeout: Duration,
    submission: Submission,
    in_flight: Option<InFlight>,
}

impl<A: VideoAnalyzer + 'static> Investigator<A> {
    pub fn new(analyzer: A, timeout: Duration) -> Self {
        Self::from_arc(Arc::new(analyzer), timeout)
    }

    pub fn from_arc(analyzer: Arc<A>, timeout: Duration) -> Self {
        Self {
            session: SessionId::new(),
            analyzer,
            timeout,
            submission: Submission::new(),
            in_flight: None,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn edit(&mut self, url: impl Into<String>) -> Result<(), FlowError> {
        self.submission.edit(url)
    }

    /// Validates the current input and, if it passes, starts the analysis in
    /// the background. Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        let outcome = self.submission.submit()?;
        match outcome {
            SubmitOutcome::Rejected(err) => {
                info!(session = %self.session, reason = %err, "submission rejected");
            }
            SubmitOutcome::Started(ticket) => {
                let request = RequestId::new();
                let analyzer = Arc::clone(&self.analyzer);
                let url = self.submission.url().to_string();
                let timeout = self.timeout;
                info!(session = %self.session, %request, ticket, url = %url, "analysis started");
                let handle = tokio::spawn(async move {
                    match tokio::time::timeout(timeout, analyzer.analyze(&url)).await {
                        Ok(result) => result,
                        Err(_) => Err(AnalysisError::Timeout(timeout)),
                    }
                });
                self.in_flight = Some(InFlight {
                    ticket,
                    request,
                    handle,
                });
            }
        }
        Ok(outcome)
    }

    /// True when nothing is in flight or the in-flight task has finished.
    pub fn is_settled(&self) -> bool {
        self.in_flight
            .as_ref()
            .map_or(true, |in_flight| in_flight.handle.is_finished())
    }

    /// Waits for the fetch in flight and applies its outcome.
    ///
    /// Dropping this future before it resolves leaves the fetch in flight;
    /// a later `settle` picks it up again.
    pub async fn settle(&mut self) -> Result<&Phase, FlowError> {
        let in_flight = self.in_flight.as_mut().ok_or(FlowError::NothingInFlight)?;
        let joined = (&mut in_flight.handle).await;
        let InFlight {
            ticket, request, ..
        } = self.in_flight.take().ok_or(FlowError::NothingInFlight)?;

        let outcome = match joined {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(AnalysisError::Cancelled),
            Err(err) => Err(AnalysisError::Task(err.to_string())),
        };
        match &outcome {
            Ok(statements) => {
                info!(session = %self.session, %request, found = statements.len(), "analysis finished")
            }
            Err(err) => {
                warn!(session = %self.session, %request, error = %err, "analysis failed")
            }
        }
        self.submission.complete(ticket, outcome);
        Ok(self.submission.phase())
    }

    /// Edit, submit and, when a fetch starts, wait for it.
    pub async fn investigate(&mut self, url: impl Into<String>) -> Result<&Phase, FlowError> {
        self.edit(url)?;
        match self.submit()? {
            SubmitOutcome::Rejected(_) => Ok(self.submission.phase()),
            SubmitOutcome::Started(_) => self.settle().await,
        }
    }

    /// Aborts the fetch in flight. Returns false when there was none.
    pub fn cancel(&mut self) -> bool {
        let Some(in_flight) = self.in_flight.take() else {
            return false;
        };
        in_flight.handle.abort();
        self.submission.cancel();
        info!(session = %self.session, request = %in_flight.request, "analysis cancelled");
        true
    }
}

impl<A: VideoAnalyzer + 'static> Drop for Investigator<A> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}
