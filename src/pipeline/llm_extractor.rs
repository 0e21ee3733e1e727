use crate::models::{format_timestamp, Statement, Transcript};
use crate::pipeline::traits::StatementExtractor;
use anyhow::{Context, Result};
use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

const MAX_TRANSCRIPT_CHARS: usize = 12_000;
const MAX_STATEMENTS: usize = 12;

pub struct LlmStatementExtractor {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmStatementExtractor {
    pub fn new(api_key: &str, model: &str) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_API_BASE") {
            config = config.with_api_base(base_url);
        }
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct LlmExtraction {
    #[serde(default)]
    statements: Vec<LlmStatement>,
}

#[derive(Deserialize)]
struct LlmStatement {
    text: String,
    score: f64,
    #[serde(default)]
    source: String,
    #[serde(default)]
    start: f64,
}

fn clamp_score(raw: f64) -> i64 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as i64
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Model output to statements. Unparsable output yields no statements.
fn parse_statements(content: &str) -> Vec<Statement> {
    let parsed: LlmExtraction = match serde_json::from_str(strip_code_fence(content)) {
        Ok(v) => v,
        Err(err) => {
            warn!(error = %err, "unparsable extraction output");
            return Vec::new();
        }
    };
    parsed
        .statements
        .into_iter()
        .filter(|s| !s.text.trim().is_empty())
        .take(MAX_STATEMENTS)
        .zip(1u32..)
        .map(|(s, id)| {
            let source = if s.source.trim().is_empty() {
                "Unattributed".to_string()
            } else {
                s.source.trim().to_string()
            };
            Statement::new(
                id,
                s.text.trim(),
                clamp_score(s.score),
                source,
                format_timestamp(s.start),
            )
        })
        .collect()
}

#[async_trait]
impl StatementExtractor for LlmStatementExtractor {
    async fn extract(&self, transcript: &Transcript) -> Result<Vec<Statement>> {
        let timed = transcript.timed_text(MAX_TRANSCRIPT_CHARS);
        if timed.trim().is_empty() {
            return Ok(Vec::new());
        }

        let system_prompt = "You are a strict fact-checking engine. From the TRANSCRIPT, pick the \
factual claims a viewer could verify. For each, estimate credibility from 0 (false) to 100 \
(well established). Output JSON only: { \"statements\": [ { \"text\": string, \"score\": number, \
\"source\": string, \"start\": number } ] }. source names the basis for the score in a few words. \
start is the offset in seconds of the line the claim comes from. At most 12 statements.";

        let user_prompt = format!(
            "TITLE:\n{}\n\nCHANNEL:\n{}\n\nTRANSCRIPT:\n{}",
            transcript.title, transcript.channel, timed
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .context("LLM response missing content")?;

        Ok(parse_statements(&content))
    }
}
