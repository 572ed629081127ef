use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::{
    config::Server,
    error::ResponseError,
    formats::json::{parse_response, server_error},
    model::TranscriptionResult,
};

/// Calls the transcription endpoint. One request per call; no retries.
pub struct TranscriptionClient {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct TranscribeRequest<'a> {
    url: &'a str,
    lang: &'a str,
}

impl TranscriptionClient {
    pub fn new(cfg: &Server) -> Result<Self> {
        Url::parse(&cfg.endpoint)
            .with_context(|| format!("invalid server endpoint: {}", cfg.endpoint))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: cfg.endpoint.clone(),
            client,
        })
    }

    pub async fn transcribe(&self, video_url: &str, lang: &str) -> Result<TranscriptionResult> {
        let video_url = validate_video_url(video_url)?;
        let request = TranscribeRequest {
            url: video_url.as_str(),
            lang,
        };

        tracing::info!(
            endpoint = self.endpoint.as_str(),
            url = request.url,
            lang,
            "requesting transcription"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("failed connecting to {}", self.endpoint))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed reading transcription response")?;
        tracing::debug!(%status, bytes = body.len(), "transcription response");

        decode_body(status, &body)
    }
}

fn decode_body(status: reqwest::StatusCode, body: &str) -> Result<TranscriptionResult> {
    if !status.is_success() {
        let reason = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| server_error(&v));
        return Err(match reason {
            Some(msg) => ResponseError::Server(msg).into(),
            None => anyhow!("transcription failed ({status})"),
        });
    }

    Ok(parse_response(body)?)
}

fn validate_video_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("a video URL is required"));
    }
    let url = Url::parse(trimmed).with_context(|| format!("invalid video URL: {trimmed}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("unsupported URL scheme '{other}': {trimmed}")),
    }
}
