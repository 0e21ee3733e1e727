use crate::error::AnalysisError;
use crate::models::{
    format_timestamp, FetchedTranscript, IsoDateTime, SourceMeta, Statement, Transcript,
    TranscriptOrigin, TranscriptSegment, VideoId,
};
use crate::pipeline::traits::{StatementExtractor, TranscriptFetcher, VideoAnalyzer};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(2000);

/// The five statements every mock analysis returns.
pub fn canned_statements() -> Vec<Statement> {
    vec![
        Statement::new(
            1,
            "The Earth is approximately 4.5 billion years old, based on radiometric age dating of meteorite material.",
            95,
            "Scientific consensus",
            "0:45",
        ),
        Statement::new(
            2,
            "Water covers about 71% of the Earth's surface, with oceans holding 96.5% of all Earth's water.",
            98,
            "USGS",
            "1:23",
        ),
        Statement::new(
            3,
            "The Great Wall of China is visible from space with the naked eye.",
            15,
            "NASA debunked",
            "2:10",
        ),
        Statement::new(
            4,
            "Humans share approximately 60% of their DNA with bananas.",
            72,
            "Partially accurate",
            "3:45",
        ),
        Statement::new(
            5,
            "Lightning never strikes the same place twice.",
            8,
            "Common myth",
            "4:30",
        ),
    ]
}

/// Waits a fixed delay, then answers with a preset outcome.
#[derive(Clone, Debug)]
pub struct MockAnalyzer {
    delay: Duration,
    outcome: Result<Vec<Statement>, AnalysisError>,
}

impl MockAnalyzer {
    pub fn canned(delay: Duration) -> Self {
        Self {
            delay,
            outcome: Ok(canned_statements()),
        }
    }

    pub fn with_statements(delay: Duration, statements: Vec<Statement>) -> Self {
        Self {
            delay,
            outcome: Ok(statements),
        }
    }

    pub fn failing(delay: Duration, error: AnalysisError) -> Self {
        Self {
            delay,
            outcome: Err(error),
        }
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::canned(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl VideoAnalyzer for MockAnalyzer {
    async fn analyze(&self, url: &str) -> Result<Vec<Statement>, AnalysisError> {
        debug!(url, delay_ms = self.delay.as_millis() as u64, "mock analysis");
        tokio::time::sleep(self.delay).await;
        self.outcome.clone()
    }
}

/// Builds a short transcript out of the video id without any network call.
pub struct DummyTranscriptFetcher;

#[async_trait]
impl TranscriptFetcher for DummyTranscriptFetcher {
    async fn fetch(&self, video: &VideoId) -> Result<FetchedTranscript, AnalysisError> {
        let segments = vec![
            TranscriptSegment {
                start: 12.0,
                duration: 4.0,
                text: format!("This is video {video}."),
            },
            TranscriptSegment {
                start: 75.0,
                duration: 5.0,
                text: "Lightning never strikes the same place twice.".to_string(),
            },
        ];
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let url = url::Url::parse(&video.watch_url())
            .map_err(|err| AnalysisError::Malformed(err.to_string()))?;
        Ok(FetchedTranscript {
            transcript: Transcript {
                video_id: video.clone(),
                title: "Unknown".to_string(),
                channel: "Unknown".to_string(),
                duration: 80,
                text,
                segments,
                source: TranscriptOrigin::YoutubeCaptions,
            },
            meta: SourceMeta {
                url,
                retrieved_at: IsoDateTime::now(),
                sha256_hex: String::new(),
            },
        })
    }
}

/// Turns every transcript segment into an unscored-looking statement.
pub struct DummyExtractor;

#[async_trait]
impl StatementExtractor for DummyExtractor {
    async fn extract(&self, transcript: &Transcript) -> anyhow::Result<Vec<Statement>> {
        Ok(transcript
            .segments
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .zip(1u32..)
            .map(|(segment, id)| {
                Statement::new(
                    id,
                    segment.text.trim(),
                    50,
                    "dummy extractor",
                    format_timestamp(segment.start),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultSet;

    #[test]
    fn canned_statements_form_a_valid_result_set() {
        let set = ResultSet::try_from_statements(canned_statements()).expect("valid");
        assert_eq!(set.len(), 5);
        assert_eq!(set.average_score(), 58);
    }

    #[tokio::test(start_paused = true)]
    async fn mock_waits_for_its_delay() {
        let mock = MockAnalyzer::canned(Duration::from_secs(2));
        let started = tokio::time::Instant::now();
        let statements = mock.analyze("youtu.be/abc").await.expect("canned");
        assert_eq!(statements.len(), 5);
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn failing_mock_reports_its_error() {
        let mock = MockAnalyzer::failing(Duration::ZERO, AnalysisError::Cancelled);
        assert_eq!(mock.analyze("x").await, Err(AnalysisError::Cancelled));
    }

    #[tokio::test]
    async fn dummy_extractor_numbers_segments() {
        let video = VideoId::parse("dQw4w9WgXcQ").expect("id");
        let fetched = DummyTranscriptFetcher.fetch(&video).await.expect("fetch");
        let statements = DummyExtractor.extract(&fetched.transcript).await.expect("extract");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].id, 1);
        assert_eq!(statements[0].timestamp, "0:12");
        assert_eq!(statements[1].timestamp, "1:15");
    }
}
