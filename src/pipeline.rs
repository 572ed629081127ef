use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tracing::Instrument;

use crate::{
    cli::{FetchCmd, InputFormat, OutputArgs, RenderCmd, View},
    client::TranscriptionClient,
    config::Config,
    formats,
    model::{self, Source, TranscriptionResult},
};

pub fn run_render(cmd: RenderCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("render", input = cmd.input.as_str(), to = ?cmd.out.to);
    let _g = span.enter();

    let input_format = cmd
        .from
        .unwrap_or_else(|| infer_format_from_path_or_dash(&cmd.input));
    tracing::info!(?input_format, "input format selected");

    let raw = read_input_to_string(&cmd.input)?;
    tracing::info!(bytes = raw.len(), "read input");

    let result = parse_any(&raw, input_format)
        .with_context(|| format!("failed parsing input as {:?}", input_format))?;

    let default_path = derive_output_path(&cmd.input, cmd.out.to)?;
    emit(&result, &cmd.out, cfg, default_path)
}

pub async fn run_fetch(cmd: FetchCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("fetch", url = cmd.url.as_str(), to = ?cmd.out.to);

    let lang = cmd.lang.as_deref().unwrap_or(cfg.server.default_lang.as_str());
    let client = TranscriptionClient::new(&cfg.server)?;
    let result = client
        .transcribe(&cmd.url, lang)
        .instrument(span.clone())
        .await?;
    let _g = span.enter();

    let default_path = match cmd.out.to {
        View::Srt => Some(cfg.output.srt_file_name.clone()),
        other => Some(format!("transcript.{}", other.extension())),
    };
    emit(&result, &cmd.out, cfg, default_path)
}

fn emit(
    result: &TranscriptionResult,
    out: &OutputArgs,
    cfg: &Config,
    default_path: Option<String>,
) -> Result<()> {
    model::validate_words(&result.words).context("transcription has malformed word timings")?;

    log_transcript_summary(result, cfg);

    let rendered = render_view(result, out.to, cfg)?;

    if out.stdout {
        print!("{rendered}");
        tracing::info!(mode = "stdout", "wrote output");
        return Ok(());
    }

    let out_path = out
        .output
        .clone()
        .or(default_path)
        .ok_or_else(|| {
            anyhow!("output path required when input is stdin and --stdout is not set")
        })?;
    write_output(&out_path, &rendered, out.overwrite)?;
    tracing::info!(path = out_path.as_str(), "wrote output file");

    Ok(())
}

fn infer_format_from_path_or_dash(input: &str) -> InputFormat {
    if input == "-" {
        return InputFormat::Json;
    }
    let p = Path::new(input);
    match p
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "srt" => InputFormat::Srt,
        _ => InputFormat::Json,
    }
}

fn read_input_to_string(input: &str) -> Result<String> {
    if input == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed reading input: {input}"))
    }
}

fn parse_any(raw: &str, fmt: InputFormat) -> Result<TranscriptionResult> {
    match fmt {
        InputFormat::Json => Ok(formats::json::parse_response(raw)?),
        InputFormat::Srt => {
            let text = formats::srt::srt_to_plain_text(raw);
            if text.is_empty() {
                return Err(anyhow!("no subtitle text found"));
            }
            let mut result = TranscriptionResult::new(text, Vec::new(), model::DEFAULT_LANGUAGE);
            result.source = Some(Source::Subtitles);
            Ok(result)
        }
    }
}

fn log_transcript_summary(r: &TranscriptionResult, cfg: &Config) {
    tracing::info!(
        words = r.words.len(),
        chars = r.text.chars().count(),
        duration_secs = r.duration_secs(),
        language = r.language.as_str(),
        source = ?r.source,
        "transcript summary"
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_word_samples.min(r.words.len());
        for (i, w) in r.words.iter().take(n).enumerate() {
            tracing::debug!(
                idx = i,
                word = w.word.as_str(),
                start_time = w.start_time,
                end_time = w.end_time,
                "word sample"
            );
        }
    }
}

fn render_view(r: &TranscriptionResult, view: View, cfg: &Config) -> Result<String> {
    if view.needs_timings() && !r.has_timings() {
        tracing::warn!(?view, "no word timings in transcription; nothing to display");
    }

    match view {
        View::Srt => Ok(formats::srt::generate_srt(
            &r.words,
            cfg.formatter.words_per_cue,
        )?),
        View::Script => {
            let blocks =
                formats::script::group_by_time_window(&r.words, cfg.formatter.window_seconds)?;
            let mut out = formats::script::render_script(&blocks);
            if !out.is_empty() {
                out.push('\n');
            }
            Ok(out)
        }
        View::Text => {
            if r.text.trim().is_empty() {
                tracing::warn!("transcription text is empty");
            }
            let mut out = formats::text::render_transcript(r);
            out.push('\n');
            Ok(out)
        }
        View::Transcript => Ok(formats::text::render_plain(r)),
        View::Json => formats::json::write_json(r),
    }
}

fn derive_output_path(input: &str, view: View) -> Result<Option<String>> {
    if input == "-" {
        return Ok(None);
    }

    let p = Path::new(input);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("bad input filename"))?;

    let parent = p.parent().unwrap_or_else(|| Path::new("."));
    let mut out = parent.join(format!("{stem}.{}", view.extension()));
    if out == p {
        out = parent.join(format!("{stem}.{}.{}", view_suffix(view), view.extension()));
    }
    Ok(Some(out.to_string_lossy().to_string()))
}

fn view_suffix(view: View) -> &'static str {
    match view {
        View::Srt => "words",
        View::Script => "script",
        View::Text => "text",
        View::Transcript => "transcript",
        View::Json => "normalized",
    }
}

fn write_output(path: &str, data: &str, overwrite: bool) -> Result<()> {
    if Path::new(path).exists() && !overwrite {
        return Err(anyhow!(
            "refusing to overwrite existing file (pass --overwrite): {path}"
        ));
    }
    fs::write(path, data).with_context(|| format!("failed writing output: {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimedWord;

    const RESPONSE: &str = r#"{
        "transcription": "uno dos tres cuatro cinco seis siete",
        "timestamps": [
            {"word": "uno", "start_time": 0.0, "end_time": 0.4},
            {"word": "dos", "start_time": 0.5, "end_time": 0.9},
            {"word": "tres", "start_time": 1.0, "end_time": 1.4},
            {"word": "cuatro", "start_time": 1.5, "end_time": 1.9},
            {"word": "cinco", "start_time": 2.0, "end_time": 2.4},
            {"word": "seis", "start_time": 12.0, "end_time": 12.4},
            {"word": "siete", "start_time": 12.5, "end_time": 13.25}
        ],
        "language": "es-419",
        "source": "audio"
    }"#;

    fn output(to: View, path: Option<String>, overwrite: bool) -> OutputArgs {
        OutputArgs {
            to,
            output: path,
            stdout: false,
            overwrite,
        }
    }

    #[test]
    fn infers_input_format_from_extension() {
        assert_eq!(infer_format_from_path_or_dash("-"), InputFormat::Json);
        assert_eq!(infer_format_from_path_or_dash("a/b.SRT"), InputFormat::Srt);
        assert_eq!(infer_format_from_path_or_dash("resp.json"), InputFormat::Json);
        assert_eq!(infer_format_from_path_or_dash("resp"), InputFormat::Json);
    }

    #[test]
    fn srt_input_becomes_untimed_subtitle_result() {
        let r = parse_any(
            "1\n00:00:01,000 --> 00:00:02,000\nhola\n\n2\n00:00:02,000 --> 00:00:03,000\nmundo\n",
            InputFormat::Srt,
        )
        .unwrap();
        assert_eq!(r.text, "hola\nmundo");
        assert!(!r.has_timings());
        assert_eq!(r.source, Some(Source::Subtitles));
        assert!(parse_any("\n\n", InputFormat::Srt).is_err());
    }

    #[test]
    fn renders_each_view() {
        let cfg = Config::default();
        let r = parse_any(RESPONSE, InputFormat::Json).unwrap();

        let srt = render_view(&r, View::Srt, &cfg).unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,400\nuno dos tres cuatro cinco\n\n"));
        assert!(srt.ends_with("2\n00:00:12,000 --> 00:00:13,250\nseis siete\n\n"));

        let script = render_view(&r, View::Script, &cfg).unwrap();
        assert_eq!(
            script,
            "[0:00 - 0:02]\nuno dos tres cuatro cinco\n\n[0:12 - 0:12]\nseis siete\n"
        );

        let text = render_view(&r, View::Text, &cfg).unwrap();
        assert!(text.starts_with("[Detected language: Latin American Spanish]\n\n"));

        let json = render_view(&r, View::Json, &cfg).unwrap();
        assert_eq!(formats::json::parse_response(&json).unwrap(), r);
    }

    #[test]
    fn untimed_result_renders_empty_timed_views() {
        let cfg = Config::default();
        let r = TranscriptionResult::new("solo texto", vec![], "es");
        assert_eq!(render_view(&r, View::Srt, &cfg).unwrap(), "");
        assert_eq!(render_view(&r, View::Script, &cfg).unwrap(), "");
        assert_eq!(render_view(&r, View::Transcript, &cfg).unwrap(), "solo texto\n");
    }

    #[test]
    fn grouping_follows_config() {
        let mut cfg = Config::default();
        cfg.formatter.words_per_cue = 7;
        cfg.formatter.window_seconds = 20.0;
        let r = parse_any(RESPONSE, InputFormat::Json).unwrap();

        let srt = render_view(&r, View::Srt, &cfg).unwrap();
        assert_eq!(srt.matches(" --> ").count(), 1);

        let script = render_view(&r, View::Script, &cfg).unwrap();
        assert!(script.starts_with("[0:00 - 0:12]\n"));
    }

    #[test]
    fn output_path_follows_input_stem() {
        assert_eq!(
            derive_output_path("dir/video.json", View::Srt).unwrap(),
            Some(Path::new("dir").join("video.srt").to_string_lossy().to_string())
        );
        assert_eq!(
            derive_output_path("dir/video.json", View::Json).unwrap(),
            Some(
                Path::new("dir")
                    .join("video.normalized.json")
                    .to_string_lossy()
                    .to_string()
            )
        );
        assert_eq!(derive_output_path("-", View::Srt).unwrap(), None);
    }

    #[test]
    fn emit_writes_file_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subs.srt").to_string_lossy().to_string();
        let cfg = Config::default();
        let r = parse_any(RESPONSE, InputFormat::Json).unwrap();

        emit(&r, &output(View::Srt, Some(path.clone()), false), &cfg, None).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("1\n"));

        let err = emit(&r, &output(View::Srt, Some(path.clone()), false), &cfg, None).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));

        emit(&r, &output(View::Script, Some(path.clone()), true), &cfg, None).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("[0:00 - 0:02]"));
    }

    #[test]
    fn emit_requires_a_destination() {
        let r = TranscriptionResult::new("a", vec![], "es");
        let err = emit(&r, &output(View::Text, None, false), &Config::default(), None).unwrap_err();
        assert!(err.to_string().contains("output path required"));
    }

    #[test]
    fn emit_rejects_malformed_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.srt").to_string_lossy().to_string();
        let r = TranscriptionResult::new(
            "a b",
            vec![TimedWord::new("a", 0.0, 1.0), TimedWord::new("b", 3.0, 2.0)],
            "es",
        );
        let err = emit(&r, &output(View::Srt, Some(path.clone()), false), &Config::default(), None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("end_time 2 is before start_time 3"));
        assert!(!Path::new(&path).exists());

        let backwards = TranscriptionResult::new(
            "late early",
            vec![TimedWord::new("late", 10.0, 10.5), TimedWord::new("early", 2.0, 3.0)],
            "es",
        );
        for view in [View::Srt, View::Script] {
            let err = emit(&backwards, &output(view, Some(path.clone()), false), &Config::default(), None)
                .unwrap_err();
            assert!(format!("{err:#}").contains("precedes previous word"));
            assert!(!Path::new(&path).exists());
        }
    }
}
