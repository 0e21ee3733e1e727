use std::time::Duration;
use thiserror::Error;

/// Rejections raised before any analysis starts. The display text is the
/// message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a YouTube URL")]
    Empty,

    #[error("Please enter a valid YouTube URL")]
    InvalidShape,
}

/// A collaborator response that breaks the result-set invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    #[error("statement {id} has empty text")]
    EmptyText { id: u32 },

    #[error("statement {id} has score {score} outside 0..=100")]
    ScoreOutOfRange { id: u32, score: i64 },

    #[error("duplicate statement id {id}")]
    DuplicateId { id: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),

    #[error("no 11-character video id in {0:?}")]
    NoVideoId(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {status}: {detail}")]
    Backend { status: u16, detail: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid statement: {0}")]
    InvalidStatement(#[from] StatementError),

    #[error("statement extraction failed: {0}")]
    Extraction(String),

    #[error("analysis cancelled")]
    Cancelled,

    #[error("analysis task aborted: {0}")]
    Task(String),
}

impl AnalysisError {
    /// Every analysis failure is reported to the user the same way.
    pub const USER_MESSAGE: &'static str = "Failed to analyze. Please try again.";
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AnalysisError::Malformed(err.to_string())
        } else {
            AnalysisError::Transport(err.to_string())
        }
    }
}

/// Misuse of the submission driver.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    #[error("an analysis is already in flight")]
    Busy,

    #[error("no analysis in flight")]
    NothingInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_display_user_messages() {
        assert_eq!(InputError::Empty.to_string(), "Please enter a YouTube URL");
        assert_eq!(
            InputError::InvalidShape.to_string(),
            "Please enter a valid YouTube URL"
        );
    }

    #[test]
    fn statement_errors_convert_into_analysis_errors() {
        let err: AnalysisError = StatementError::DuplicateId { id: 3 }.into();
        assert_eq!(
            err.to_string(),
            "invalid statement: duplicate statement id 3"
        );
    }
}
