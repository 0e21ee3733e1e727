use crate::models::common::IsoDateTime;
use crate::models::statement::format_timestamp;
use crate::models::video::VideoId;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

/// Where the transcription backend got the text from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptOrigin {
    YoutubeCaptions,
    Whisper,
    #[serde(other)]
    Unknown,
}

/// Body of a successful `POST /api/transcribe`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub title: String,
    pub channel: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(rename = "transcript")]
    pub text: String,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
    pub source: TranscriptOrigin,
}

impl Transcript {
    /// One `[M:SS] text` line per segment, cut at `max_chars`. Falls back to
    /// the flat text when the backend sent no segments.
    pub fn timed_text(&self, max_chars: usize) -> String {
        let mut out = String::new();
        if self.segments.is_empty() {
            out.extend(self.text.chars().take(max_chars));
            return out;
        }
        for segment in &self.segments {
            let line = format!("[{}] {}\n", format_timestamp(segment.start), segment.text.trim());
            if out.chars().count() + line.chars().count() > max_chars {
                break;
            }
            out.push_str(&line);
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceMeta {
    pub url: Url,
    pub retrieved_at: IsoDateTime,
    pub sha256_hex: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FetchedTranscript {
    pub transcript: Transcript,
    pub meta: SourceMeta,
}
