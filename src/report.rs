//! Plain-text rendering of a submission: message, summary, statement list.

use crate::flow::{Severity, Submission};
use crate::models::{Category, ResultSet, Statement};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub fn render(submission: &Submission) -> String {
    let mut out = String::new();
    if let Some(notice) = submission.notice() {
        let marker = match notice.severity {
            Severity::Error => "error",
            Severity::Success => "ok",
        };
        let _ = writeln!(out, "[{marker}] {}", notice.text);
    }
    if submission.shows_results() {
        out.push('\n');
        render_summary(&mut out, submission.results());
        out.push('\n');
        render_statements(&mut out, submission.results());
    }
    out
}

fn render_summary(out: &mut String, results: &ResultSet) {
    let summary = results.summary();
    let _ = writeln!(
        out,
        "Analysis Summary ({} statements)",
        summary.statement_count
    );
    let _ = writeln!(
        out,
        "  Overall Credibility: {}/100 ({})",
        summary.average_score, summary.overall.label
    );
    for category in [Category::High, Category::Medium, Category::Low] {
        let _ = writeln!(
            out,
            "  {:<11}{}",
            category.short_label(),
            summary.breakdown.count(category)
        );
    }
}

fn render_statements(out: &mut String, results: &ResultSet) {
    let _ = writeln!(out, "Extracted Statements");
    for statement in results.iter() {
        render_statement(out, statement);
    }
}

fn render_statement(out: &mut String, statement: &Statement) {
    let classification = statement.classification();
    let _ = writeln!(
        out,
        "  [{}] {:>3} {}",
        statement.timestamp, statement.score, classification.label
    );
    let _ = writeln!(out, "    {}", statement.text);
    let _ = writeln!(
        out,
        "    {} {}",
        score_bar(statement.score),
        statement.source
    );
}

/// Fixed-width bar, one cell per five points.
pub fn score_bar(score: i64) -> String {
    let filled = (score.clamp(0, 100) as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}
