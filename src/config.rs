use crate::flow::DEFAULT_TIMEOUT;
use crate::pipeline::{
    Analyzer, BackendTranscriptFetcher, DummyExtractor, Extractor, LlmStatementExtractor,
    MockAnalyzer, TranscriptAnalyzer, DEFAULT_MOCK_DELAY,
};
use clap::{Args, ValueEnum};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Canned statements after a fixed delay.
    Mock,
    /// Transcription backend plus statement extraction.
    Live,
}

/// Analyzer selection shared by the CLI and the HTTP service.
#[derive(Args, Debug, Clone)]
pub struct AnalyzerArgs {
    /// Which analysis collaborator to use.
    #[arg(long, env = "INVESTIGATOR_MODE", value_enum, default_value_t = Mode::Mock)]
    pub mode: Mode,

    /// Base URL of the transcription backend.
    #[arg(long, env = "INVESTIGATOR_BACKEND_URL", default_value = "http://127.0.0.1:8000")]
    pub backend_url: Url,

    /// Seconds before an analysis is abandoned.
    #[arg(long, env = "INVESTIGATOR_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Delay of the mock analyzer in milliseconds.
    #[arg(long, env = "INVESTIGATOR_MOCK_DELAY_MS", default_value_t = DEFAULT_MOCK_DELAY.as_millis() as u64)]
    pub mock_delay_ms: u64,

    /// API key for statement extraction; without one, live mode uses the dummy extractor.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Chat model used for statement extraction.
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o")]
    pub openai_model: String,
}

impl AnalyzerArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn build(&self) -> anyhow::Result<Analyzer> {
        let analyzer = match self.mode {
            Mode::Mock => Analyzer::Mock(MockAnalyzer::canned(Duration::from_millis(
                self.mock_delay_ms,
            ))),
            Mode::Live => {
                let fetcher = BackendTranscriptFetcher::new(self.backend_url.clone(), self.timeout())?;
                let extractor = match self.openai_api_key.as_deref() {
                    Some(key) if valid_api_key(key) => {
                        Extractor::Llm(LlmStatementExtractor::new(key, &self.openai_model))
                    }
                    _ => {
                        warn!("no usable OPENAI_API_KEY, statements come from the dummy extractor");
                        Extractor::Dummy(DummyExtractor)
                    }
                };
                Analyzer::Live(TranscriptAnalyzer { fetcher, extractor })
            }
        };
        info!(
            analyzer = analyzer.kind(),
            backend = %self.backend_url,
            timeout_secs = self.timeout().as_secs(),
            "analyzer configured"
        );
        Ok(analyzer)
    }
}

pub fn valid_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && !trimmed.contains("...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        analyzer: AnalyzerArgs,
    }

    #[test]
    fn placeholder_keys_are_rejected() {
        assert!(valid_api_key("sk-live"));
        assert!(!valid_api_key("   "));
        assert!(!valid_api_key("sk-..."));
    }

    #[test]
    fn flags_override_defaults() {
        let harness = Harness::try_parse_from([
            "test",
            "--mode",
            "live",
            "--backend-url",
            "http://backend:9000",
            "--timeout-secs",
            "0",
            "--mock-delay-ms",
            "5",
        ])
        .expect("parse");
        assert_eq!(harness.analyzer.mode, Mode::Live);
        assert_eq!(harness.analyzer.backend_url.as_str(), "http://backend:9000/");
        assert_eq!(harness.analyzer.timeout(), Duration::from_secs(1));
        assert_eq!(harness.analyzer.mock_delay_ms, 5);
    }

    #[test]
    fn live_mode_without_key_uses_dummy_extractor() {
        let harness = Harness::try_parse_from([
            "test",
            "--mode",
            "live",
            "--openai-api-key",
            "...",
        ])
        .expect("parse");
        match harness.analyzer.build().expect("build") {
            Analyzer::Live(live) => assert!(matches!(live.extractor, Extractor::Dummy(_))),
            Analyzer::Mock(_) => panic!("expected live analyzer"),
        }
    }
}
