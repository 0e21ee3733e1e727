use crate::error::AnalysisError;
use crate::models::Statement;
use crate::pipeline::traits::{StatementExtractor, TranscriptFetcher, VideoAnalyzer};
use crate::video_url::extract_video_id;
use async_trait::async_trait;
use tracing::info;

/// Transcript first, then statement extraction over it.
pub struct TranscriptAnalyzer<F, E>
where
    F: TranscriptFetcher,
    E: StatementExtractor,
{
    pub fetcher: F,
    pub extractor: E,
}

#[async_trait]
impl<F, E> VideoAnalyzer for TranscriptAnalyzer<F, E>
where
    F: TranscriptFetcher,
    E: StatementExtractor,
{
    async fn analyze(&self, url: &str) -> Result<Vec<Statement>, AnalysisError> {
        let video =
            extract_video_id(url).ok_or_else(|| AnalysisError::NoVideoId(url.to_string()))?;
        let fetched = self.fetcher.fetch(&video).await?;
        info!(
            video = %video,
            title = %fetched.transcript.title,
            segments = fetched.transcript.segments.len(),
            origin = ?fetched.transcript.source,
            sha256 = %fetched.meta.sha256_hex,
            "transcript fetched"
        );
        let statements = self
            .extractor
            .extract(&fetched.transcript)
            .await
            .map_err(|err| AnalysisError::Extraction(format!("{err:#}")))?;
        info!(video = %video, statements = statements.len(), "statements extracted");
        Ok(statements)
    }
}
