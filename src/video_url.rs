//! Recognition of YouTube link shapes.
//!
//! [`is_recognized_video_url`] is the permissive check applied to user input:
//! an anchored prefix match against the watch, shorts, short-link and embed
//! shapes. [`extract_video_id`] is the stricter extraction used when talking
//! to the transcription backend, which needs the canonical 11-character id.

use crate::error::InputError;
use crate::models::VideoId;
use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

static RECOGNIZED_SHAPES: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"^(https?://)?(www\.)?youtube\.com/watch\?v=[A-Za-z0-9_-]+",
        r"^(https?://)?(www\.)?youtube\.com/shorts/[A-Za-z0-9_-]+",
        r"^(https?://)?youtu\.be/[A-Za-z0-9_-]+",
        r"^(https?://)?(www\.)?youtube\.com/embed/[A-Za-z0-9_-]+",
    ])
    .expect("video url patterns compile")
});

static ID_AFTER_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/)([A-Za-z0-9_-]{11})",
    )
    .expect("video id pattern compiles")
});

static ID_IN_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"youtube\.com/watch\?.*v=([A-Za-z0-9_-]{11})")
        .expect("video id query pattern compiles")
});

/// True when `input` starts with one of the recognized video-link shapes.
/// Trailing content after the match is allowed.
pub fn is_recognized_video_url(input: &str) -> bool {
    RECOGNIZED_SHAPES.is_match(input)
}

/// State of the URL input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputHint {
    Empty,
    Valid,
    Invalid,
}

pub fn input_hint(input: &str) -> InputHint {
    if input.is_empty() {
        InputHint::Empty
    } else if is_recognized_video_url(input) {
        InputHint::Valid
    } else {
        InputHint::Invalid
    }
}

/// The checks run on submit, in order: blank input, then link shape.
pub fn validate_submission(input: &str) -> Result<(), InputError> {
    if input.trim().is_empty() {
        return Err(InputError::Empty);
    }
    if !is_recognized_video_url(input) {
        return Err(InputError::InvalidShape);
    }
    Ok(())
}

pub fn extract_video_id(input: &str) -> Option<VideoId> {
    [&*ID_AFTER_PATH, &*ID_IN_QUERY]
        .into_iter()
        .find_map(|pattern| pattern.captures(input))
        .and_then(|caps| caps.get(1))
        .and_then(|m| VideoId::parse(m.as_str()).ok())
}
