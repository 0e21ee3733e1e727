pub mod analyze;
pub mod dispatch;
pub mod fetch;
pub mod llm_extractor;
pub mod mock;
pub mod traits;

pub use analyze::TranscriptAnalyzer;
pub use dispatch::{Analyzer, Extractor};
pub use fetch::{BackendHealth, BackendTranscriptFetcher};
pub use llm_extractor::LlmStatementExtractor;
pub use mock::{
    canned_statements, DummyExtractor, DummyTranscriptFetcher, MockAnalyzer, DEFAULT_MOCK_DELAY,
};
pub use traits::{StatementExtractor, TranscriptFetcher, VideoAnalyzer};
