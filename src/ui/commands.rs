use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use super::theme;
use super::util::parse_amount;
use crate::categorize::classify;
use crate::export::{export_pdf, export_report, export_session, ExportFormat};
use crate::models::{Category, Investment, MAX_YEARS};
use crate::voice::process_audio;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit WalleTUI", cmd_quit, r);
    register_command!("quit", "Quit WalleTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("i", "Go to Investments", cmd_investments, r);
    register_command!("investments", "Go to Investments", cmd_investments, r);
    register_command!("a", "Go to Analytics", cmd_analytics, r);
    register_command!("analytics", "Go to Analytics", cmd_analytics, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "contrast",
        "Toggle the high-contrast palette",
        cmd_contrast,
        r
    );
    register_command!(
        "income",
        "Set monthly income (e.g. :income 60000)",
        cmd_income,
        r
    );
    register_command!(
        "add",
        "Add a classified expense (e.g. :add 800 groceries at the market)",
        cmd_add,
        r
    );
    register_command!(
        "set",
        "Set a category total (e.g. :set Housing 20000)",
        cmd_set,
        r
    );
    register_command!(
        "note",
        "Add a note to the report (e.g. :note paid rent early)",
        cmd_note,
        r
    );
    register_command!(
        "invest",
        "Add an investment (e.g. :invest 1000 6 3 Index fund)",
        cmd_invest,
        r
    );
    register_command!(
        "voice",
        "Transcribe a recorded note (e.g. :voice ~/note.wav)",
        cmd_voice,
        r
    );
    register_command!(
        "classify",
        "Show the category for a description (e.g. :classify taxi home)",
        cmd_classify,
        r
    );
    register_command!(
        "export",
        "Export to CSV, XLSX or PDF by extension (e.g. :export ~/wallet.xlsx)",
        cmd_export,
        r
    );
    register_command!(
        "report",
        "Write the monthly summary as text or PDF (e.g. :report ~/report.pdf)",
        cmd_report,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.switch_screen(Screen::Dashboard);
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.switch_screen(Screen::Expenses);
    Ok(())
}

fn cmd_investments(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.switch_screen(Screen::Investments);
    Ok(())
}

fn cmd_analytics(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.switch_screen(Screen::Analytics);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_contrast(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let on = !theme::high_contrast();
    theme::set_high_contrast(on);
    app.set_status(if on {
        "High contrast on"
    } else {
        "High contrast off"
    });
    Ok(())
}

fn cmd_income(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :income <amount>");
        return Ok(());
    }
    let income = parse_amount(args)?;
    app.session.set_income(income)?;
    app.refresh_dashboard();
    app.set_status(format!("Income set to {}", app.session.income()));
    Ok(())
}

fn cmd_add(args: &str, app: &mut App) -> anyhow::Result<()> {
    let mut parts = args.splitn(2, ' ');
    let amount_str = parts.next().unwrap_or("");
    let description = parts.next().unwrap_or("").trim();
    if amount_str.is_empty() || description.is_empty() {
        app.set_status("Usage: :add <amount> <description>");
        return Ok(());
    }

    let amount = parse_amount(amount_str)?;
    let category = app.session.add_expense(description, amount)?;
    app.refresh_all();
    app.set_status(format!("Added {amount} to {category}"));
    Ok(())
}

fn cmd_set(args: &str, app: &mut App) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :set <category> <amount>");
        return Ok(());
    }

    let amount = parse_amount(parts[0])?;
    let Some(category) = Category::parse(parts[1]) else {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        app.set_status(format!(
            "Unknown category '{}'. Available: {}",
            parts[1],
            names.join(", ")
        ));
        return Ok(());
    };

    app.session.set_expense(category, amount)?;
    app.refresh_all();
    app.set_status(format!("{category} set to {amount}"));
    Ok(())
}

fn cmd_note(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.session.add_note(args)?;
    app.set_status(format!("Note added ({} total)", app.session.notes().len()));
    Ok(())
}

fn cmd_invest(args: &str, app: &mut App) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.splitn(4, ' ').collect();
    if parts.len() < 4 {
        app.set_status(format!(
            "Usage: :invest <principal> <rate%> <years 1-{MAX_YEARS}> <name>"
        ));
        return Ok(());
    }

    let principal = parse_amount(parts[0])?;
    let rate: f64 = parts[1]
        .trim_end_matches('%')
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid rate: '{}'", parts[1]))?;
    let years: u32 = parts[2]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid years: '{}'", parts[2]))?;

    let investment = Investment::new(parts[3].to_string(), principal, rate, years)?;
    let label = investment.to_string();
    app.session.add_investment(investment);
    app.switch_screen(Screen::Investments);
    app.set_status(format!("Added {label}"));
    Ok(())
}

fn cmd_voice(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :voice <audio-file>");
        return Ok(());
    }
    let Some(transcriber) = app.transcriber.as_ref() else {
        app.set_status("No transcription endpoint configured");
        return Ok(());
    };

    let path = crate::run::shellexpand(args);
    let audio = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read audio file {path}: {e}"))?;
    let entry = process_audio(transcriber, &audio)?;

    app.screen = Screen::Expenses;
    app.last_voice = Some(entry.clone());
    if entry.has_amount() {
        app.confirm_message = format!(
            "Record {} in {} from \"{}\"?",
            entry.amount, entry.category, entry.text
        );
        app.pending_action = Some(PendingAction::RecordVoice(entry));
        app.input_mode = InputMode::Confirm;
    } else {
        app.set_status(format!(
            "Heard \"{}\". No amount detected, use :add instead",
            entry.text
        ));
    }
    Ok(())
}

fn cmd_classify(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :classify <description>");
        return Ok(());
    }
    app.set_status(format!("'{args}' -> {}", classify(args)));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        default_export_path("csv")
    } else {
        crate::run::shellexpand(args)
    };

    let message = export_session(Path::new(&path), &app.session, &app.config.currency)?;
    app.set_status(message);
    Ok(())
}

fn cmd_report(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        default_export_path("txt")
    } else {
        crate::run::shellexpand(args)
    };

    let target = Path::new(&path);
    match ExportFormat::from_path(target) {
        ExportFormat::Pdf => export_pdf(target, &app.session, &app.config.currency)?,
        _ => export_report(target, &app.session, &app.config.currency)?,
    }
    app.set_status(format!("Report written to {path}"));
    Ok(())
}

fn default_export_path(extension: &str) -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    let month = chrono::Local::now().format("%Y-%m");
    format!("{home}/walletui-{month}.{extension}")
}

/// Apply the action the user just confirmed.
pub(crate) fn confirm_pending(app: &mut App) -> anyhow::Result<()> {
    let Some(action) = app.pending_action.take() else {
        return Ok(());
    };
    match action {
        PendingAction::RecordVoice(entry) => {
            let category = app.session.record_voice_entry(&entry)?;
            app.refresh_all();
            app.set_status(format!("Added {} to {category}", entry.amount));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
