use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest score that still counts as [`Category::High`].
pub const HIGH_THRESHOLD: i64 = 80;
/// Lowest score that still counts as [`Category::Medium`].
pub const MEDIUM_THRESHOLD: i64 = 50;

/// Credibility bucket of a statement.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::High => "Verified",
            Category::Medium => "Partially True",
            Category::Low => "Misleading",
        }
    }

    /// Shorter label used by the summary breakdown.
    pub fn short_label(self) -> &'static str {
        match self {
            Category::High => "Verified",
            Category::Medium => "Partial",
            Category::Low => "Misleading",
        }
    }

    pub fn color_key(self) -> &'static str {
        match self {
            Category::High => "high",
            Category::Medium => "medium",
            Category::Low => "low",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub label: &'static str,
    pub color_key: &'static str,
}

/// Thresholds are inclusive lower bounds checked from high to low. Values
/// outside `0..=100` are bucketed by the same rules.
pub fn classify(score: i64) -> Classification {
    let category = if score >= HIGH_THRESHOLD {
        Category::High
    } else if score >= MEDIUM_THRESHOLD {
        Category::Medium
    } else {
        Category::Low
    };
    Classification {
        category,
        label: category.label(),
        color_key: category.color_key(),
    }
}

/// Per-category statement counts shown next to the overall score.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl Breakdown {
    pub fn record(&mut self, score: i64) {
        match classify(score).category {
            Category::High => self.high += 1,
            Category::Medium => self.medium += 1,
            Category::Low => self.low += 1,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::High => self.high,
            Category::Medium => self.medium,
            Category::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}
