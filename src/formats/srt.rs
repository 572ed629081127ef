use std::sync::LazyLock;

use regex::Regex;

use crate::{error::FormatError, formats::time::format_srt_timestamp, model::TimedWord};

static TIMING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2},\d{3}").expect("valid timing regex"));
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid separator regex"));

/// Groups `words` positionally into cues of `words_per_cue` and renders SubRip.
///
/// A cue runs from its first word's start to its last word's end. Time gaps
/// between words are ignored; an empty slice renders as an empty document.
pub fn generate_srt(words: &[TimedWord], words_per_cue: usize) -> Result<String, FormatError> {
    if words_per_cue == 0 {
        return Err(FormatError::InvalidParameter {
            name: "words_per_cue",
            reason: "must be at least 1".to_string(),
        });
    }

    let mut out = String::new();

    for (i, group) in words.chunks(words_per_cue).enumerate() {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };

        out.push_str(&(i + 1).to_string());
        out.push('\n');

        out.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(first.start_time),
            format_srt_timestamp(last.end_time)
        ));

        out.push_str(&join_words(group));
        out.push_str("\n\n");
    }

    Ok(out)
}

/// Strips an SRT document down to its spoken text, one line per cue.
///
/// Index and timing lines are dropped, markup tags removed and whitespace
/// collapsed. Tolerates the loose formatting of auto-generated captions.
pub fn srt_to_plain_text(srt: &str) -> String {
    let normalized = srt.replace("\r\n", "\n");
    let mut lines = Vec::new();

    for block in BLOCK_SEPARATOR.split(normalized.trim()) {
        let mut parts: Vec<&str> = block.trim().lines().collect();
        if parts.is_empty() {
            continue;
        }
        if is_index_line(parts[0]) {
            parts.remove(0);
        }
        if parts.first().is_some_and(|p| TIMING_LINE.is_match(p)) {
            parts.remove(0);
        }

        let joined = parts.join(" ");
        let text = normalize_ws(&MARKUP_TAG.replace_all(&joined, ""));
        if !text.is_empty() {
            lines.push(text);
        }
    }

    lines.join("\n")
}

pub(crate) fn join_words(words: &[TimedWord]) -> String {
    words
        .iter()
        .map(|w| w.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_index_line(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty() && t.chars().all(|c| c.is_ascii_digit())
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
