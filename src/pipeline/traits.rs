use crate::error::AnalysisError;
use crate::models::{FetchedTranscript, Statement, Transcript, VideoId};
use async_trait::async_trait;

/// The analysis collaborator behind a submission: one validated URL in,
/// an ordered list of scored statements out. Completes or fails exactly once.
#[async_trait]
pub trait VideoAnalyzer: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<Vec<Statement>, AnalysisError>;
}

#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(&self, video: &VideoId) -> Result<FetchedTranscript, AnalysisError>;
}

#[async_trait]
pub trait StatementExtractor: Send + Sync {
    async fn extract(&self, transcript: &Transcript) -> anyhow::Result<Vec<Statement>>;
}

