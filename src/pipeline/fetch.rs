use crate::error::AnalysisError;
use crate::models::{FetchedTranscript, IsoDateTime, SourceMeta, Transcript, VideoId};
use crate::pipeline::traits::TranscriptFetcher;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

#[derive(Serialize)]
struct TranscribeRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    pub service: String,
}

/// Client for the transcription backend (`/api/transcribe`, `/api/health`).
pub struct BackendTranscriptFetcher {
    client: Client,
    base: Url,
}

impl BackendTranscriptFetcher {
    pub fn new(base: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("investigator/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, AnalysisError> {
        self.base
            .join(path)
            .map_err(|err| AnalysisError::Transport(format!("bad endpoint {path}: {err}")))
    }

    pub async fn health(&self) -> Result<BackendHealth, AnalysisError> {
        let url = self.endpoint("api/health")?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(backend_error(status, &body));
        }
        serde_json::from_slice(&body).map_err(|err| AnalysisError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl TranscriptFetcher for BackendTranscriptFetcher {
    async fn fetch(&self, video: &VideoId) -> Result<FetchedTranscript, AnalysisError> {
        let url = self.endpoint("api/transcribe")?;
        let watch_url = video.watch_url();
        debug!(%url, video = %video, "requesting transcript");

        let response = self
            .client
            .post(url.clone())
            .json(&TranscribeRequest { url: &watch_url })
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let err = backend_error(status, &body);
            warn!(video = %video, error = %err, "transcription backend refused");
            return Err(err);
        }

        let mut hasher = Sha256::new();
        hasher.update(&body);
        let sha256_hex = format!("{:x}", hasher.finalize());

        let transcript: Transcript = serde_json::from_slice(&body)
            .map_err(|err| AnalysisError::Malformed(err.to_string()))?;
        if transcript.video_id != *video {
            return Err(AnalysisError::Malformed(format!(
                "asked for {video}, backend answered for {}",
                transcript.video_id
            )));
        }

        Ok(FetchedTranscript {
            transcript,
            meta: SourceMeta {
                url,
                retrieved_at: IsoDateTime::now(),
                sha256_hex,
            },
        })
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn backend_error(status: StatusCode, body: &[u8]) -> AnalysisError {
    let detail = serde_json::from_slice::<ErrorDetail>(body)
        .map(|d| d.detail)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).chars().take(200).collect());
    AnalysisError::Backend {
        status: status.as_u16(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_paths_keep_their_prefix() {
        let fetcher = BackendTranscriptFetcher::new(
            Url::parse("http://localhost:8000/investigator").expect("url"),
            Duration::from_secs(1),
        )
        .expect("client");
        assert_eq!(
            fetcher.endpoint("api/transcribe").expect("join").as_str(),
            "http://localhost:8000/investigator/api/transcribe"
        );
    }

    #[test]
    fn root_base_joins_cleanly() {
        let fetcher = BackendTranscriptFetcher::new(
            Url::parse("http://127.0.0.1:8000").expect("url"),
            Duration::from_secs(1),
        )
        .expect("client");
        assert_eq!(
            fetcher.endpoint("api/health").expect("join").as_str(),
            "http://127.0.0.1:8000/api/health"
        );
    }

    #[test]
    fn backend_errors_prefer_the_detail_field() {
        let err = backend_error(
            StatusCode::NOT_FOUND,
            br#"{"detail":"Could not fetch video info."}"#,
        );
        assert_eq!(
            err,
            AnalysisError::Backend {
                status: 404,
                detail: "Could not fetch video info.".to_string()
            }
        );

        let err = backend_error(StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(
            err,
            AnalysisError::Backend {
                status: 502,
                detail: "upstream down".to_string()
            }
        );
    }
}
