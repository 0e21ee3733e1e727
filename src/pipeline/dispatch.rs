use crate::error::AnalysisError;
use crate::models::{Statement, Transcript};
use crate::pipeline::analyze::TranscriptAnalyzer;
use crate::pipeline::fetch::BackendTranscriptFetcher;
use crate::pipeline::llm_extractor::LlmStatementExtractor;
use crate::pipeline::mock::{DummyExtractor, MockAnalyzer};
use crate::pipeline::traits::{StatementExtractor, VideoAnalyzer};
use async_trait::async_trait;

pub enum Extractor {
    Dummy(DummyExtractor),
    Llm(LlmStatementExtractor),
}

#[async_trait]
impl StatementExtractor for Extractor {
    async fn extract(&self, transcript: &Transcript) -> anyhow::Result<Vec<Statement>> {
        match self {
            Extractor::Dummy(e) => e.extract(transcript).await,
            Extractor::Llm(e) => e.extract(transcript).await,
        }
    }
}

pub enum Analyzer {
    Mock(MockAnalyzer),
    Live(TranscriptAnalyzer<BackendTranscriptFetcher, Extractor>),
}

impl Analyzer {
    pub fn kind(&self) -> &'static str {
        match self {
            Analyzer::Mock(_) => "mock",
            Analyzer::Live(_) => "live",
        }
    }
}

#[async_trait]
impl VideoAnalyzer for Analyzer {
    async fn analyze(&self, url: &str) -> Result<Vec<Statement>, AnalysisError> {
        match self {
            Analyzer::Mock(a) => a.analyze(url).await,
            Analyzer::Live(a) => a.analyze(url).await,
        }
    }
}
