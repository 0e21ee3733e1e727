//! API routes

use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use investigator::error::AnalysisError;
use investigator::flow::{Investigator, Notice, Phase};
use investigator::models::{classify, Classification, ResultSet, Summary, VideoId};
use investigator::video_url::{extract_video_id, input_hint, is_recognized_video_url, InputHint};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub docs: &'static str,
    pub health: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub recognized: bool,
    pub hint: InputHint,
    pub video_id: Option<VideoId>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub message: Option<Notice>,
    pub statements: ResultSet,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

pub async fn root() -> Json<Banner> {
    Json(Banner {
        message: "Video Investigator API",
        docs: "POST /api/analyze with {\"url\": \"...\"}",
        health: "/api/health",
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "investigator-api",
    })
}

pub async fn validate(Json(request): Json<UrlRequest>) -> Json<ValidateResponse> {
    Json(ValidateResponse {
        recognized: is_recognized_video_url(&request.url),
        hint: input_hint(&request.url),
        video_id: extract_video_id(&request.url),
    })
}

pub async fn classify_score(Path(score): Path<i64>) -> Json<Classification> {
    Json(classify(score))
}

/// Runs one submission to completion on a fresh investigator.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<UrlRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut investigator = Investigator::from_arc(Arc::clone(&state.analyzer), state.timeout);
    let phase = investigator
        .investigate(request.url)
        .await
        .map_err(|err| internal_error(err.to_string()))?
        .clone();

    match phase {
        Phase::Succeeded { .. } => {
            let submission = investigator.submission();
            Ok(Json(AnalyzeResponse {
                message: submission.notice(),
                statements: submission.results().clone(),
                summary: submission.results().summary(),
            }))
        }
        Phase::Invalid(err) => Err(error_body(StatusCode::BAD_REQUEST, err.to_string())),
        Phase::Failed(err) => {
            warn!(session = %investigator.session(), error = %err, "analysis request failed");
            Err(error_body(
                StatusCode::BAD_GATEWAY,
                AnalysisError::USER_MESSAGE,
            ))
        }
        Phase::Idle | Phase::Fetching { .. } => {
            error!(?phase, "submission did not settle");
            Err(internal_error("analysis did not settle"))
        }
    }
}

fn error_body(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            detail: detail.into(),
        }),
    )
}

fn internal_error(detail: impl Into<String>) -> ApiError {
    error_body(StatusCode::INTERNAL_SERVER_ERROR, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use investigator::flow::Severity;
    use investigator::models::Category;
    use investigator::pipeline::{Analyzer, MockAnalyzer};
    use std::time::Duration;

    fn state(analyzer: MockAnalyzer) -> AppState {
        AppState {
            analyzer: Arc::new(Analyzer::Mock(analyzer)),
            timeout: Duration::from_secs(5),
        }
    }

    fn url(value: &str) -> Json<UrlRequest> {
        Json(UrlRequest {
            url: value.to_string(),
        })
    }

    #[tokio::test]
    async fn health_names_the_service() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.service, "investigator-api");
    }

    #[tokio::test]
    async fn validate_reports_shape_and_id() {
        let Json(body) = validate(url("https://youtu.be/dQw4w9WgXcQ")).await;
        assert!(body.recognized);
        assert_eq!(body.hint, InputHint::Valid);
        assert_eq!(body.video_id.as_ref().map(VideoId::as_str), Some("dQw4w9WgXcQ"));

        let Json(body) = validate(url("youtube.com/watch?v=abc123")).await;
        assert!(body.recognized);
        assert!(body.video_id.is_none());

        let Json(body) = validate(url("")).await;
        assert!(!body.recognized);
        assert_eq!(body.hint, InputHint::Empty);
    }

    #[tokio::test]
    async fn classify_uses_thresholds() {
        let Json(body) = classify_score(Path(80)).await;
        assert_eq!(body.category, Category::High);
        assert_eq!(body.label, "Verified");
        let Json(body) = classify_score(Path(49)).await;
        assert_eq!(body.label, "Misleading");
    }

    #[tokio::test]
    async fn analyze_returns_statements_and_summary() {
        let state = state(MockAnalyzer::canned(Duration::ZERO));
        let Json(body) = analyze(State(state), url("https://www.youtube.com/shorts/abc123"))
            .await
            .expect("success");

        let message = body.message.expect("message");
        assert_eq!(message.severity, Severity::Success);
        assert_eq!(message.text, "Found 5 statements to analyze");
        assert_eq!(body.statements.len(), 5);
        assert_eq!(body.summary.average_score, 58);
    }

    #[tokio::test]
    async fn analyze_rejects_bad_links() {
        let (status, Json(body)) = analyze(State(state(MockAnalyzer::default())), url("  "))
            .await
            .err()
            .expect("rejected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.detail, "Please enter a YouTube URL");

        let (status, Json(body)) = analyze(
            State(state(MockAnalyzer::default())),
            url("https://vimeo.com/123"),
        )
        .await
        .err()
        .expect("rejected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.detail, "Please enter a valid YouTube URL");
    }

    #[tokio::test]
    async fn analysis_failures_are_bad_gateway() {
        let failing = MockAnalyzer::failing(
            Duration::ZERO,
            AnalysisError::Transport("connection refused".to_string()),
        );
        let (status, Json(body)) = analyze(State(state(failing)), url("youtu.be/abc123"))
            .await
            .err()
            .expect("failed");
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.detail, "Failed to analyze. Please try again.");
    }
}
