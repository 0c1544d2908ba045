use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::Path;

use crate::analytics::{compare, forecast, growth_curve, income_alert, spending_tips};
use crate::categorize::classify_all;
use crate::config::Config;
use crate::export::export_session;
use crate::models::{Category, ExpenseLedger, Investment};
use crate::session::Session;
use crate::ui::util::{format_amount, format_whole, parse_amount};
use crate::voice::{process_audio, HttpTranscriber};

pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    match args[1].as_str() {
        "classify" | "c" => cli_classify(&args[2..]),
        "forecast" | "f" => cli_forecast(&args[2..], config),
        "compare" => cli_compare(&args[2..], config),
        "grow" => cli_grow(&args[2..], config),
        "transcribe" => cli_transcribe(&args[2..], config),
        "summary" | "s" => cli_summary(&args[2..], config),
        "export" => cli_export(&args[2..], config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("walletui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("WalleTUI - terminal wallet tracker");
    println!();
    println!("Usage: walletui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  classify <text>...              Categorize each description");
    println!("  forecast <v1> <v2>...           Project monthly spending from history");
    println!("    --horizon <N>                 Months to project (default: from config)");
    println!("  compare <Category=amount>...    Compare spending with the benchmark");
    println!("  grow <principal> <rate%> <years>  Monthly compound growth of one investment");
    println!("  transcribe <audio-file>         Transcribe a voice note and classify it");
    println!("  summary [Category=amount...]    Print income, expenses, savings and alerts");
    println!("    --income <N>                  Monthly income (default: from config)");
    println!("  export <path> [Category=amount...]  Write CSV (with totals), XLSX or PDF by extension");
    println!("    --income <N>                  Monthly income (default: from config)");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn cli_classify(args: &[String]) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: walletui classify <text>...");
    }
    for (text, category) in args.iter().zip(classify_all(args)) {
        println!("{:<14} {text}", category.as_str());
    }
    Ok(())
}

fn cli_forecast(args: &[String], config: &Config) -> Result<()> {
    let horizon = match flag_value(args, "--horizon") {
        Some(v) => v
            .parse::<usize>()
            .with_context(|| format!("Invalid horizon: '{v}'"))?,
        None => config.forecast_horizon,
    };
    if horizon == 0 {
        anyhow::bail!("Horizon must be at least 1");
    }

    let history = positional(args, &["--horizon"])
        .into_iter()
        .map(|v| {
            v.parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .with_context(|| format!("Invalid value: '{v}'"))
        })
        .collect::<Result<Vec<f64>>>()?;

    for (i, value) in forecast(&history, horizon).iter().enumerate() {
        println!("  +{:<3} {}", i + 1, format_whole(*value, &config.currency));
    }
    Ok(())
}

fn cli_compare(args: &[String], config: &Config) -> Result<()> {
    let ledger = parse_ledger(&positional(args, &[]))?;
    let insights = compare(&ledger, &config.benchmark);
    if insights.is_empty() {
        println!("Spending is within 20% of the benchmark in every category");
    }
    for insight in &insights {
        println!(
            "{:<14} {:<30} {}",
            insight.category.as_str(),
            insight.band.as_str(),
            insight.message()
        );
    }
    Ok(())
}

fn cli_grow(args: &[String], config: &Config) -> Result<()> {
    let [principal, rate, years] = args else {
        anyhow::bail!("Usage: walletui grow <principal> <rate%> <years>");
    };
    let principal = parse_amount(principal)?;
    let rate: f64 = rate
        .trim_end_matches('%')
        .parse()
        .with_context(|| format!("Invalid rate: '{rate}'"))?;
    let years: u32 = years
        .parse()
        .with_context(|| format!("Invalid years: '{years}'"))?;
    let investment = Investment::new("cli".into(), principal, rate, years)?;

    let curve = growth_curve(
        investment.principal.to_f64().unwrap_or(0.0),
        investment.annual_rate_pct / 100.0,
        investment.years,
    );
    // One line per year keeps the output readable for long horizons.
    for (month, value) in curve.iter().enumerate().filter(|(m, _)| (m + 1) % 12 == 0) {
        println!(
            "  year {:<3} {}",
            (month + 1) / 12,
            format_whole(*value, &config.currency)
        );
    }
    Ok(())
}

fn cli_transcribe(args: &[String], config: &Config) -> Result<()> {
    let [path] = args else {
        anyhow::bail!("Usage: walletui transcribe <audio-file>");
    };
    let endpoint = config.transcription.endpoint.as_deref().context(
        "No transcription endpoint configured. Set [transcription] endpoint in the config file",
    )?;
    let transcriber = HttpTranscriber::new(
        endpoint,
        &config.transcription.language,
        config.transcription.timeout(),
    )?;

    let path = shellexpand(path);
    let audio =
        std::fs::read(&path).with_context(|| format!("Failed to read audio file: {path}"))?;
    let entry = process_audio(&transcriber, &audio)?;

    println!("Text:     {}", entry.text);
    println!("Category: {}", entry.category);
    if entry.has_amount() {
        println!("Amount:   {}", format_amount(entry.amount, &config.currency));
    } else {
        println!("Amount:   none detected");
    }
    Ok(())
}

fn cli_summary(args: &[String], config: &Config) -> Result<()> {
    let entries = positional(args, &["--income"]);
    let session = session_from_args(args, &entries, config)?;
    let summary = session.summary();
    let currency = &config.currency;

    println!("WalleTUI Summary");
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(summary.income, currency));
    println!("  Expenses:   {}", format_amount(summary.total_expenses, currency));
    println!("  Savings:    {}", format_amount(summary.savings, currency));

    let ledger = session.ledger();
    if !ledger.total().is_zero() {
        println!();
        println!("Spending by Category:");
        for (category, amount) in ledger.iter().filter(|(_, a)| !a.is_zero()) {
            println!("  {:<16} {}", category.as_str(), format_amount(amount, currency));
        }
    }

    println!();
    println!("{}", income_alert(&summary).message());
    for tip in spending_tips(ledger) {
        println!("{}", tip.message());
    }
    Ok(())
}

fn cli_export(args: &[String], config: &Config) -> Result<()> {
    let rest = positional(args, &["--income"]);
    let Some((path, entries)) = rest.split_first() else {
        anyhow::bail!("Usage: walletui export <path.csv|.xlsx|.pdf> [Category=amount...] [--income N]");
    };
    let session = session_from_args(args, entries, config)?;

    let path = shellexpand(path);
    let path = Path::new(&path);
    println!("{}", export_session(path, &session, &config.currency)?);
    Ok(())
}

// ── Argument helpers ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither one of `flags` nor the value following it.
fn positional<'a>(args: &'a [String], flags: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
        } else if flags.contains(&arg.as_str()) {
            skip = true;
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

/// Parse one `Category=amount` pair.
fn parse_entry(arg: &str) -> Result<(Category, Decimal)> {
    let (name, amount) = arg
        .split_once('=')
        .with_context(|| format!("Expected Category=amount, got '{arg}'"))?;
    let category = Category::parse(name).with_context(|| format!("Unknown category: '{name}'"))?;
    Ok((category, parse_amount(amount)?))
}

fn parse_ledger(args: &[&str]) -> Result<ExpenseLedger> {
    let entries = args
        .iter()
        .map(|a| parse_entry(a))
        .collect::<Result<Vec<_>>>()?;
    ExpenseLedger::from_entries(&entries)
}

/// Session built from `--income` (or the configured income) and
/// `Category=amount` entries.
fn session_from_args(args: &[String], entries: &[&str], config: &Config) -> Result<Session> {
    let income = match flag_value(args, "--income") {
        Some(v) => parse_amount(v)?,
        None => config.income,
    };
    let mut session = Session::new(Decimal::ZERO);
    session.set_income(income)?;
    let ledger = parse_ledger(entries)?;
    for (category, amount) in ledger.iter() {
        session.set_expense(category, amount)?;
    }
    Ok(session)
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
