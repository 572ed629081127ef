use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: Logging,
    pub formatter: Formatter,
    pub server: Server,
    pub output: Output,
}

impl Config {
    pub fn load(path_opt: Option<&Path>) -> Result<Self> {
        let default_path = Path::new("config.toml");
        let path = if let Some(p) = path_opt {
            Some(p)
        } else if default_path.exists() {
            Some(default_path)
        } else {
            None
        };

        let mut cfg = Config::default();

        if let Some(path) = path {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed reading config file: {}", path.display()))?;
            cfg = Self::from_toml(&raw)
                .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        }

        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_pretty(&self) -> Result<String> {
        let s = toml::to_string_pretty(self).context("failed serializing config as TOML")?;
        Ok(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub format: String,
    pub debug_word_samples: usize,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            debug_word_samples: 20,
        }
    }
}

/// Grouping policy for the SRT and script views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Formatter {
    pub words_per_cue: usize,
    pub window_seconds: f64,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            words_per_cue: 5,
            window_seconds: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub default_lang: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/transcribir".to_string(),
            // long-running recognition can take up to 15 minutes server side
            timeout_secs: 900,
            default_lang: "es".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub srt_file_name: String,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            srt_file_name: "subtitulos.srt".to_string(),
        }
    }
}

pub fn init_tracing(logging: &Logging, cli_override_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = cli_override_level.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let is_json = logging.format.to_lowercase() == "json";

    // stdout carries rendered output, so logs go to stderr
    if is_json {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .event_format(fmt::format().json())
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .pretty()
            .init();
    }

    tracing::info!(
        level = level,
        format = logging.format.as_str(),
        "logging initialized"
    );

    Ok(())
}
