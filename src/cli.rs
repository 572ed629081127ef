use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "wordcue")]
#[command(about = "Render video transcriptions as SRT subtitles, timestamped scripts, or plain text.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a saved transcription response or SRT file
    Render(RenderCmd),
    /// Transcribe a video through the server, then render it
    Fetch(FetchCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Parser)]
pub struct RenderCmd {
    /// Input file path, or '-' for stdin
    pub input: String,

    /// Force input format (otherwise inferred from extension)
    #[arg(long, value_enum)]
    pub from: Option<InputFormat>,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Parser)]
pub struct FetchCmd {
    /// Video URL to transcribe
    pub url: String,

    /// Preferred subtitle language (defaults to server.default_lang)
    #[arg(long)]
    pub lang: Option<String>,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, ClapArgs)]
pub struct OutputArgs {
    /// View to render
    #[arg(long, value_enum)]
    pub to: View,

    /// Output file path (optional)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Allow overwriting output file
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    Json,
    Srt,
}

/// Which rendering of the transcription to produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum View {
    /// SubRip subtitles, fixed number of words per cue
    Srt,
    /// Script grouped into fixed time windows
    Script,
    /// Transcript with detected-language header
    Text,
    /// Transcript text only
    Transcript,
    /// Normalized transcription result
    Json,
}

impl View {
    pub fn extension(self) -> &'static str {
        match self {
            View::Srt => "srt",
            View::Script | View::Text | View::Transcript => "txt",
            View::Json => "json",
        }
    }

    pub fn needs_timings(self) -> bool {
        matches!(self, View::Srt | View::Script)
    }
}
