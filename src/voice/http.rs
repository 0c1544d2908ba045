use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use super::{Transcriber, TranscriptionError};

/// Transcriber backed by an HTTP speech-to-text service.
///
/// The service receives the raw audio as the request body and answers with
/// `{"transcript": "..."}`. A 422 status or an empty transcript means the audio
/// could not be understood.
#[derive(Debug, Clone)]
pub(crate) struct HttpTranscriber {
    http: Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    transcript: Option<String>,
}

impl HttpTranscriber {
    pub(crate) fn new(endpoint: &str, language: &str, timeout: Duration) -> Result<Self> {
        let mut endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid transcription endpoint: {endpoint}"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!(
                "Transcription endpoint must be http(s), got '{}'",
                endpoint.scheme()
            );
        }
        endpoint
            .query_pairs_mut()
            .append_pair("language", language);

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, endpoint })
    }

    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transcriber for HttpTranscriber {
    fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        tracing::info!(endpoint = %self.endpoint, bytes = audio.len(), "transcribing audio");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
            .body(audio.to_vec())
            .send()
            .map_err(|e| {
                tracing::warn!(error = %e, "transcription request failed");
                TranscriptionError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(TranscriptionError::Unintelligible);
        }
        if !status.is_success() {
            tracing::warn!(%status, "transcription service returned an error status");
            return Err(TranscriptionError::Unavailable(format!("HTTP {status}")));
        }

        let body: TranscriptResponse = response
            .json()
            .map_err(|e| TranscriptionError::Unavailable(format!("invalid response: {e}")))?;

        match body.transcript.map(|t| t.trim().to_string()) {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(TranscriptionError::Unintelligible),
        }
    }
}
