#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

use super::*;
use crate::models::Category;

/// Returns a canned result regardless of the audio.
struct FakeTranscriber {
    result: Result<String, TranscriptionError>,
}

impl FakeTranscriber {
    fn text(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
        }
    }

    fn failing(err: TranscriptionError) -> Self {
        Self { result: Err(err) }
    }
}

impl Transcriber for FakeTranscriber {
    fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscriptionError> {
        self.result.clone()
    }
}

/// Serve exactly one HTTP request with a fixed status line and body.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        // Read headers, then as much body as Content-Length announces
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{addr}/transcribe")
}

fn transcriber(endpoint: &str) -> HttpTranscriber {
    HttpTranscriber::new(endpoint, "en-US", Duration::from_secs(5)).unwrap()
}

// ── extract_amount ────────────────────────────────────────────

#[test]
fn test_extract_amount_integer() {
    assert_eq!(extract_amount("Bought groceries 800").unwrap(), dec!(800));
}

#[test]
fn test_extract_amount_decimal_point() {
    assert_eq!(extract_amount("coffee 4.50 this morning").unwrap(), dec!(4.50));
}

#[test]
fn test_extract_amount_thousands_separator() {
    assert_eq!(extract_amount("rent 12,500 for March").unwrap(), dec!(12500));
}

#[test]
fn test_extract_amount_first_number_wins() {
    assert_eq!(extract_amount("2 tickets for 900").unwrap(), dec!(2));
}

#[test]
fn test_extract_amount_trailing_separator() {
    assert_eq!(extract_amount("taxi 300.").unwrap(), dec!(300));
}

#[test]
fn test_extract_amount_none_is_zero() {
    assert_eq!(extract_amount("no numbers here").unwrap(), Decimal::ZERO);
    assert_eq!(extract_amount("").unwrap(), Decimal::ZERO);
}

#[test]
fn test_extract_amount_too_large_is_an_error() {
    assert_eq!(
        extract_amount("paid 123456789012345678901234567890 for rent"),
        Err(TranscriptionError::AmountOutOfRange(
            "123456789012345678901234567890".into()
        ))
    );
}

// ── interpret / process_audio ─────────────────────────────────

#[test]
fn test_interpret() {
    let entry = interpret("Took an uber for 450").unwrap();
    assert_eq!(entry.category, Category::Transport);
    assert_eq!(entry.amount, dec!(450));
    assert!(entry.has_amount());
}

#[test]
fn test_interpret_without_amount() {
    let entry = interpret("movie night").unwrap();
    assert_eq!(entry.category, Category::Entertainment);
    assert!(!entry.has_amount());
}

#[test]
fn test_process_audio_success() {
    let fake = FakeTranscriber::text("groceries 800");
    let entry = process_audio(&fake, b"RIFF").unwrap();
    assert_eq!(entry.text, "groceries 800");
    assert_eq!(entry.category, Category::Food);
    assert_eq!(entry.amount, dec!(800));
}

#[test]
fn test_process_audio_unavailable_is_surfaced() {
    let fake = FakeTranscriber::failing(TranscriptionError::Unavailable("offline".into()));
    assert_eq!(
        process_audio(&fake, b"RIFF"),
        Err(TranscriptionError::Unavailable("offline".into()))
    );
}

#[test]
fn test_process_audio_unintelligible_is_surfaced() {
    let fake = FakeTranscriber::failing(TranscriptionError::Unintelligible);
    assert_eq!(
        process_audio(&fake, b"RIFF"),
        Err(TranscriptionError::Unintelligible)
    );
}

#[test]
fn test_process_audio_oversized_amount_is_surfaced() {
    let fake = FakeTranscriber::text("rent 99999999999999999999999999999999");
    let err = process_audio(&fake, b"RIFF").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Amount '99999999999999999999999999999999' is too large"
    );
}

#[test]
fn test_transcription_error_display() {
    assert_eq!(
        TranscriptionError::Unintelligible.to_string(),
        "Could not understand audio"
    );
    assert_eq!(
        TranscriptionError::Unavailable("timeout".into()).to_string(),
        "Speech recognition service unavailable: timeout"
    );
}

// ── HttpTranscriber ───────────────────────────────────────────

#[test]
fn test_http_transcriber_rejects_bad_endpoint() {
    assert!(HttpTranscriber::new("not a url", "en-US", Duration::from_secs(1)).is_err());
    assert!(HttpTranscriber::new("ftp://host/x", "en-US", Duration::from_secs(1)).is_err());
}

#[test]
fn test_http_transcriber_appends_language() {
    let t = transcriber("http://localhost:9000/transcribe");
    assert_eq!(
        t.endpoint().as_str(),
        "http://localhost:9000/transcribe?language=en-US"
    );
}

#[test]
fn test_http_transcriber_success() {
    let endpoint = serve_once("HTTP/1.1 200 OK", r#"{"transcript":"  groceries 800 "}"#);
    let text = transcriber(&endpoint).transcribe(b"audio-bytes").unwrap();
    assert_eq!(text, "groceries 800");
}

#[test]
fn test_http_transcriber_unprocessable_is_unintelligible() {
    let endpoint = serve_once("HTTP/1.1 422 Unprocessable Entity", "{}");
    assert_eq!(
        transcriber(&endpoint).transcribe(b"noise"),
        Err(TranscriptionError::Unintelligible)
    );
}

#[test]
fn test_http_transcriber_blank_transcript_is_unintelligible() {
    let endpoint = serve_once("HTTP/1.1 200 OK", r#"{"transcript":"   "}"#);
    assert_eq!(
        transcriber(&endpoint).transcribe(b"noise"),
        Err(TranscriptionError::Unintelligible)
    );
}

#[test]
fn test_http_transcriber_server_error_is_unavailable() {
    let endpoint = serve_once("HTTP/1.1 503 Service Unavailable", "{}");
    assert!(matches!(
        transcriber(&endpoint).transcribe(b"audio"),
        Err(TranscriptionError::Unavailable(_))
    ));
}

#[test]
fn test_http_transcriber_unreachable_is_unavailable() {
    // Bind then drop to get a port nobody listens on
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let t = transcriber(&format!("http://{addr}/transcribe"));
    assert!(matches!(
        t.transcribe(b"audio"),
        Err(TranscriptionError::Unavailable(_))
    ));
}
