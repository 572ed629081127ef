use serde::{Deserialize, Serialize};

use crate::error::FormatError;

pub const DEFAULT_LANGUAGE: &str = "es-419";

/// A transcription as returned by the server, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    #[serde(rename = "transcription", default)]
    pub text: String,
    #[serde(rename = "timestamps", default)]
    pub words: Vec<TimedWord>,
    #[serde(default = "default_language", deserialize_with = "language_or_default")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl TranscriptionResult {
    pub fn new(text: impl Into<String>, words: Vec<TimedWord>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            words,
            language: language.into(),
            source: None,
        }
    }

    pub fn has_timings(&self) -> bool {
        !self.words.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.words.last().map(|w| w.end_time).unwrap_or(0.0).max(0.0)
    }

    pub fn language_name(&self) -> &str {
        language_display_name(&self.language)
    }
}

/// Where the server got the transcript from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Published subtitles; text only, no word timings.
    Subtitles,
    /// Speech recognition over the audio track.
    Audio,
    /// Any value this client does not know about.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedWord {
    pub word: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl TimedWord {
    pub fn new(word: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            word: word.into(),
            start_time,
            end_time,
        }
    }
}

/// Rejects entries that would render as negative or nonsensical time ranges,
/// including words whose start precedes the previous word's start.
pub fn validate_words(words: &[TimedWord]) -> Result<(), FormatError> {
    let mut prev_start: Option<f64> = None;
    for (index, w) in words.iter().enumerate() {
        let reason = if !w.start_time.is_finite() || !w.end_time.is_finite() {
            Some("time is not a finite number".to_string())
        } else if w.start_time < 0.0 || w.end_time < 0.0 {
            Some(format!(
                "negative time (start {}, end {})",
                w.start_time, w.end_time
            ))
        } else if w.end_time < w.start_time {
            Some(format!(
                "end_time {} is before start_time {}",
                w.end_time, w.start_time
            ))
        } else if let Some(prev) = prev_start.filter(|p| w.start_time < *p) {
            Some(format!(
                "start_time {} precedes previous word's start_time {}",
                w.start_time, prev
            ))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(FormatError::MalformedEntry {
                index,
                word: w.word.clone(),
                reason,
            });
        }
        prev_start = Some(w.start_time);
    }
    Ok(())
}

pub fn language_display_name(code: &str) -> &str {
    match code {
        "es-419" => "Latin American Spanish",
        "es-ES" => "Spanish (Spain)",
        "en-US" => "English (US)",
        "en-GB" => "English (UK)",
        other => other,
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn language_or_default<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_language))
}
