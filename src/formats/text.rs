use crate::model::TranscriptionResult;

/// Transcript text preceded by the detected language, as first shown after a
/// successful transcription.
pub fn render_transcript(r: &TranscriptionResult) -> String {
    format!(
        "[Detected language: {}]\n\n{}",
        r.language_name(),
        r.text.trim()
    )
}

/// Transcript text alone, suitable for copying elsewhere.
pub fn render_plain(r: &TranscriptionResult) -> String {
    let mut out = r.text.trim().to_string();
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_uses_language_display_name() {
        let r = TranscriptionResult::new(" hola a todos ", vec![], "es-419");
        assert_eq!(
            render_transcript(&r),
            "[Detected language: Latin American Spanish]\n\nhola a todos"
        );

        let r = TranscriptionResult::new("olá", vec![], "auto");
        assert_eq!(render_transcript(&r), "[Detected language: auto]\n\nolá");
    }

    #[test]
    fn plain_text_has_trailing_newline_only_when_non_empty() {
        assert_eq!(
            render_plain(&TranscriptionResult::new("a b\n", vec![], "en-US")),
            "a b\n"
        );
        assert_eq!(render_plain(&TranscriptionResult::new("  ", vec![], "en-US")), "");
    }
}
