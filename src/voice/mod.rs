mod http;

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use crate::categorize::classify;
use crate::models::Category;

pub(crate) use http::HttpTranscriber;

/// Why a voice note could not be turned into an entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum TranscriptionError {
    #[error("Speech recognition service unavailable: {0}")]
    Unavailable(String),

    #[error("Could not understand audio")]
    Unintelligible,

    #[error("Amount '{0}' is too large")]
    AmountOutOfRange(String),
}

/// Speech-to-text provider.
pub(crate) trait Transcriber {
    fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError>;
}

/// What a transcribed note was understood to mean.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VoiceEntry {
    pub(crate) text: String,
    pub(crate) category: Category,
    /// Zero means no amount was found in the text.
    pub(crate) amount: Decimal,
}

impl VoiceEntry {
    pub(crate) fn has_amount(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

static AMOUNT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([0-9]+[.,]?[0-9]*)").ok());

/// First number in `text`, or zero when there is none.
///
/// Thousands separators are dropped before scanning, so "1,200" reads as 1200.
/// A number too large for `Decimal` is an error rather than "no amount".
pub(crate) fn extract_amount(text: &str) -> Result<Decimal, TranscriptionError> {
    let cleaned = text.replace(',', "");
    let Some(re) = AMOUNT_RE.as_ref() else {
        return Ok(Decimal::ZERO);
    };
    match re.captures(&cleaned).and_then(|caps| caps.get(1)) {
        Some(m) => parse_number(m.as_str()),
        None => Ok(Decimal::ZERO),
    }
}

fn parse_number(token: &str) -> Result<Decimal, TranscriptionError> {
    let normalized = token.replace(',', ".");
    let trimmed = normalized.trim_end_matches('.');
    Decimal::from_str(trimmed).map_err(|_| TranscriptionError::AmountOutOfRange(trimmed.into()))
}

/// Classify and extract the amount from already-transcribed text.
pub(crate) fn interpret(text: &str) -> Result<VoiceEntry, TranscriptionError> {
    Ok(VoiceEntry {
        text: text.to_string(),
        category: classify(text),
        amount: extract_amount(text)?,
    })
}

/// Transcribe `audio` and interpret the result.
pub(crate) fn process_audio(
    transcriber: &dyn Transcriber,
    audio: &[u8],
) -> Result<VoiceEntry, TranscriptionError> {
    let text = transcriber.transcribe(audio)?;
    let entry = interpret(&text)?;
    tracing::debug!(
        category = %entry.category,
        amount = %entry.amount,
        "interpreted voice note"
    );
    Ok(entry)
}

#[cfg(test)]
mod tests;
