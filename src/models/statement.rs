use crate::error::StatementError;
use crate::models::score::{classify, Breakdown, Classification};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A claim extracted from a video, with its credibility estimate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: u32,
    #[serde(alias = "statement")]
    pub text: String,
    #[serde(alias = "factScore")]
    pub score: i64,
    pub source: String,
    /// Position in the video, `M:SS` or `H:MM:SS`. Display only.
    pub timestamp: String,
}

impl Statement {
    pub fn new(
        id: u32,
        text: impl Into<String>,
        score: i64,
        source: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            score,
            source: source.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn classification(&self) -> Classification {
        classify(self.score)
    }
}

/// Renders a video offset in seconds as `M:SS`, or `H:MM:SS` past the hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Statements of one analysis, in extraction order.
///
/// Only constructed through [`ResultSet::try_from_statements`], so every
/// instance has unique ids, non-empty text and scores within `0..=100`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    statements: Vec<Statement>,
}

impl ResultSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn try_from_statements(statements: Vec<Statement>) -> Result<Self, StatementError> {
        let mut seen = HashSet::with_capacity(statements.len());
        for statement in &statements {
            if statement.text.trim().is_empty() {
                return Err(StatementError::EmptyText { id: statement.id });
            }
            if !(0..=100).contains(&statement.score) {
                return Err(StatementError::ScoreOutOfRange {
                    id: statement.id,
                    score: statement.score,
                });
            }
            if !seen.insert(statement.id) {
                return Err(StatementError::DuplicateId { id: statement.id });
            }
        }
        Ok(Self { statements })
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Mean score rounded half up; 0 for an empty set.
    pub fn average_score(&self) -> i64 {
        if self.statements.is_empty() {
            return 0;
        }
        let n = self.statements.len() as i64;
        let sum: i64 = self.statements.iter().map(|s| s.score).sum();
        (2 * sum + n) / (2 * n)
    }

    pub fn breakdown(&self) -> Breakdown {
        let mut breakdown = Breakdown::default();
        for statement in &self.statements {
            breakdown.record(statement.score);
        }
        breakdown
    }

    pub fn summary(&self) -> Summary {
        let average_score = self.average_score();
        Summary {
            statement_count: self.len(),
            average_score,
            overall: classify(average_score),
            breakdown: self.breakdown(),
        }
    }
}

/// Derived view of a [`ResultSet`]; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub statement_count: usize,
    pub average_score: i64,
    pub overall: Classification,
    pub breakdown: Breakdown,
}
