#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::config::Config;
use crate::voice::interpret;

fn app() -> App {
    App::new(Config::default()).unwrap()
}

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("", ""), 0);
    assert_eq!(levenshtein("invest", "invest"), 0);
    assert_eq!(levenshtein("exprt", "export"), 1);
    assert_eq!(levenshtein("kitten", "sitting"), 3);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let mut app = app();
    handle_command("exprt", &mut app).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :exprt. Did you mean :export?"
    );
}

#[test]
fn test_every_command_has_description() {
    assert!(COMMANDS.values().all(|c| !c.description.is_empty()));
    assert!(COMMANDS.contains_key("voice"));
}

#[test]
fn test_quit() {
    let mut app = app();
    handle_command("q", &mut app).unwrap();
    assert!(!app.running);
}

#[test]
fn test_navigation_commands() {
    let mut app = app();
    handle_command("e", &mut app).unwrap();
    assert_eq!(app.screen, Screen::Expenses);
    handle_command("analytics", &mut app).unwrap();
    assert_eq!(app.screen, Screen::Analytics);
    handle_command("help", &mut app).unwrap();
    assert!(app.show_help);
}

#[test]
fn test_contrast_toggles_palette() {
    let mut app = app();
    let before = theme::high_contrast();
    handle_command("contrast", &mut app).unwrap();
    assert_eq!(theme::high_contrast(), !before);
    assert_eq!(theme::palette(), theme::palette_for(!before));
    handle_command("contrast", &mut app).unwrap();
    assert_eq!(theme::high_contrast(), before);
}

// ── Data entry ────────────────────────────────────────────────

#[test]
fn test_add_classifies_description() {
    let mut app = app();
    handle_command("add 800 groceries at the market", &mut app).unwrap();
    assert_eq!(app.session.ledger().get(Category::Food), dec!(800));
    assert_eq!(app.status_message, "Added 800 to Food");
    assert_eq!(app.summary.total_expenses, dec!(800));
}

#[test]
fn test_add_without_description_shows_usage() {
    let mut app = app();
    handle_command("add 800", &mut app).unwrap();
    assert!(app.status_message.starts_with("Usage"));
    assert_eq!(app.session.ledger().total(), dec!(0));
}

#[test]
fn test_add_rejects_non_positive_amount() {
    let mut app = app();
    let err = handle_command("add 0 taxi", &mut app).unwrap_err();
    assert_eq!(err.to_string(), "Provide description and amount");
}

#[test]
fn test_set_category_case_insensitive() {
    let mut app = app();
    handle_command("set housing 20000", &mut app).unwrap();
    assert_eq!(app.session.ledger().get(Category::Housing), dec!(20000));
}

#[test]
fn test_set_unknown_category() {
    let mut app = app();
    handle_command("set Rent 100", &mut app).unwrap();
    assert!(app.status_message.starts_with("Unknown category 'Rent'"));
}

#[test]
fn test_income() {
    let mut app = app();
    handle_command("income 60,000", &mut app).unwrap();
    assert_eq!(app.session.income(), dec!(60000));
    assert_eq!(app.summary.savings, dec!(60000));
    assert!(handle_command("income -1", &mut app).is_err());
}

#[test]
fn test_note() {
    let mut app = app();
    handle_command("note paid rent early", &mut app).unwrap();
    assert_eq!(app.session.notes(), ["paid rent early"]);
    assert!(handle_command("note", &mut app).is_err());
}

#[test]
fn test_invest() {
    let mut app = app();
    handle_command("invest 1000 6% 3 Index fund", &mut app).unwrap();
    assert_eq!(app.session.portfolio().len(), 1);
    assert_eq!(app.session.portfolio()[0].name, "Index fund");
    assert_eq!(app.screen, Screen::Investments);
    assert_eq!(app.portfolio_curve.len(), 36);
}

#[test]
fn test_invest_rejects_bad_years() {
    let mut app = app();
    assert!(handle_command("invest 1000 6 31 Bonds", &mut app).is_err());
    assert!(handle_command("invest 1000 six 3 Bonds", &mut app).is_err());
    assert!(app.session.portfolio().is_empty());
}

#[test]
fn test_classify() {
    let mut app = app();
    handle_command("classify Uber to airport", &mut app).unwrap();
    assert_eq!(app.status_message, "'Uber to airport' -> Transport");
}

// ── Voice ─────────────────────────────────────────────────────

#[test]
fn test_voice_without_endpoint() {
    let mut app = app();
    handle_command("voice note.wav", &mut app).unwrap();
    assert_eq!(app.status_message, "No transcription endpoint configured");
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_voice_missing_file() {
    let mut config = Config::default();
    config.transcription.endpoint = Some("http://127.0.0.1:9/transcribe".into());
    let mut app = App::new(config).unwrap();
    let err = handle_command("voice /nonexistent/note.wav", &mut app).unwrap_err();
    assert!(err.to_string().contains("Failed to read audio file"));
}

#[test]
fn test_confirm_pending_records_voice_entry() {
    let mut app = app();
    let entry = interpret("I spent 1,200 on groceries").unwrap();
    app.pending_action = Some(PendingAction::RecordVoice(entry));
    confirm_pending(&mut app).unwrap();
    assert!(app.pending_action.is_none());
    assert_eq!(app.session.ledger().get(Category::Food), dec!(1200));
    assert_eq!(app.status_message, "Added 1200 to Food");
}

#[test]
fn test_confirm_pending_without_action_is_noop() {
    let mut app = app();
    confirm_pending(&mut app).unwrap();
    assert_eq!(app.session.ledger().total(), dec!(0));
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.csv");
    let mut app = app();
    handle_command("set Food 12000", &mut app).unwrap();
    handle_command(&format!("export {}", path.display()), &mut app).unwrap();
    assert!(path.exists());
    assert!(dir.path().join("wallet-totals.csv").exists());
    assert!(app.status_message.starts_with("Exported 6 categories"));
}

#[test]
fn test_report_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    let mut app = app();
    handle_command("note first month", &mut app).unwrap();
    handle_command(&format!("report {}", path.display()), &mut app).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Income: 50000 DA"));
    assert!(text.ends_with("first month"));
}

#[test]
fn test_report_as_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    let mut app = app();
    handle_command(&format!("report {}", path.display()), &mut app).unwrap();
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
    assert!(app.status_message.starts_with("Report written to"));
}

#[test]
fn test_export_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.xlsx");
    let mut app = app();
    handle_command(&format!("export {}", path.display()), &mut app).unwrap();
    assert!(path.exists());
    assert_eq!(
        app.status_message,
        format!("Exported 6 categories to {}", path.display())
    );
}
