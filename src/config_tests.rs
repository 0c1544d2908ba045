#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use std::io::Write;

use super::*;
use crate::models::Category;

fn make_config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_parse_empty_is_default() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.currency, "DA");
    assert_eq!(config.income, dec!(50000));
    assert_eq!(config.forecast_horizon, 3);
    assert_eq!(config.history_months, 6);
    assert!(!config.high_contrast);
    assert_eq!(config.benchmark, BenchmarkTable::default());
    assert_eq!(config.transcription, TranscriptionConfig::default());
}

#[test]
fn test_parse_full() {
    let config = Config::parse(
        r#"
currency = "EUR"
income = 3200.50
forecast_horizon = 6
history_months = 12
high_contrast = true

[benchmark]
Food = 450
transport = 120.5

[transcription]
endpoint = "http://localhost:9000/transcribe"
language = "fr-FR"
timeout_secs = 5
"#,
    )
    .unwrap();

    assert_eq!(config.currency, "EUR");
    assert_eq!(config.income, dec!(3200.50));
    assert_eq!(config.forecast_horizon, 6);
    assert_eq!(config.history_months, 12);
    assert!(config.high_contrast);
    assert_eq!(config.benchmark.get(Category::Food), Some(dec!(450)));
    assert_eq!(config.benchmark.get(Category::Transport), Some(dec!(120.5)));
    // Unlisted categories keep their defaults
    assert_eq!(config.benchmark.get(Category::Housing), Some(dec!(20000)));
    assert_eq!(
        config.transcription.endpoint.as_deref(),
        Some("http://localhost:9000/transcribe")
    );
    assert_eq!(config.transcription.language, "fr-FR");
    assert_eq!(config.transcription.timeout(), Duration::from_secs(5));
}

#[test]
fn test_parse_unknown_benchmark_category() {
    let err = Config::parse("[benchmark]\nRent = 100\nPets = 5\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Pets"));
    assert!(msg.contains("Rent"));
}

#[test]
fn test_parse_negative_benchmark_rejected() {
    assert!(Config::parse("[benchmark]\nFood = -10\n").is_err());
}

#[test]
fn test_parse_zero_horizon_rejected() {
    assert!(Config::parse("forecast_horizon = 0\n").is_err());
}

#[test]
fn test_parse_negative_income_rejected() {
    assert!(Config::parse("income = -5\n").is_err());
}

#[test]
fn test_parse_unknown_key_rejected() {
    assert!(Config::parse("colour = \"blue\"\n").is_err());
}

#[test]
fn test_parse_malformed_toml() {
    assert!(Config::parse("currency = \n").is_err());
}

#[test]
fn test_load_from_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config.currency, "DA");
}

#[test]
fn test_load_from_file() {
    let file = make_config_file("currency = \"USD\"\n");
    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.currency, "USD");
}

#[test]
fn test_load_from_invalid_file_mentions_path() {
    let file = make_config_file("forecast_horizon = \"many\"\n");
    let err = Config::load_from(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid config file"));
}
