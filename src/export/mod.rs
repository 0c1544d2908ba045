use anyhow::{Context, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::Path;

use crate::analytics::MonthlySummary;
use crate::models::ExpenseLedger;
use crate::session::Session;

/// Write `Category,Amount` rows in category order.
pub(crate) fn write_ledger_csv<W: Write>(writer: W, ledger: &ExpenseLedger) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Category", "Amount"])
        .context("Failed to write CSV header")?;
    for (category, amount) in ledger.iter() {
        wtr.write_record([category.as_str(), amount.to_string().as_str()])
            .with_context(|| format!("Failed to write CSV row for {category}"))?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write the single-row income/expenses/savings table.
pub(crate) fn write_totals_csv<W: Write>(writer: W, summary: &MonthlySummary) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Income", "Total Expenses", "Savings"])
        .context("Failed to write CSV header")?;
    wtr.write_record([
        summary.income.to_string(),
        summary.total_expenses.to_string(),
        summary.savings.to_string(),
    ])
    .context("Failed to write CSV totals")?;
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Plain-text monthly summary followed by the session notes.
pub(crate) fn render_report(session: &Session, currency: &str) -> String {
    let summary = session.summary();
    let mut out = String::from("Monthly Summary\n");
    out.push_str(&format!("Income: {} {currency}\n", whole(summary.income)));
    out.push_str(&format!(
        "Total expenses: {} {currency}\n",
        whole(summary.total_expenses)
    ));
    out.push_str(&format!("Savings: {} {currency}\n", whole(summary.savings)));
    out.push_str("\nNotes:\n");
    out.push_str(&session.notes().join("\n"));
    out
}

fn whole(amount: Decimal) -> Decimal {
    amount.round()
}

/// Export the ledger to `path` as CSV. Returns the number of category rows.
pub(crate) fn export_csv(path: &Path, session: &Session) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_ledger_csv(file, session.ledger())?;
    let rows = session.ledger().iter().count();
    tracing::info!(path = %path.display(), rows, "exported expenses CSV");
    Ok(rows)
}

/// Export the totals row next to the ledger export.
pub(crate) fn export_totals_csv(path: &Path, session: &Session) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_totals_csv(file, &session.summary())?;
    tracing::info!(path = %path.display(), "exported totals CSV");
    Ok(())
}

pub(crate) fn export_report(path: &Path, session: &Session, currency: &str) -> Result<()> {
    std::fs::write(path, render_report(session, currency))
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported report");
    Ok(())
}

/// Write the ledger to `path` as an Excel workbook with a single `report`
/// sheet of `Category,Amount` rows. Returns the number of category rows.
pub(crate) fn export_xlsx(path: &Path, session: &Session) -> Result<usize> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name("report")
        .context("Failed to name worksheet")?;
    sheet
        .write_string(0, 0, "Category")
        .context("Failed to write XLSX header")?;
    sheet
        .write_string(0, 1, "Amount")
        .context("Failed to write XLSX header")?;

    let mut rows = 0;
    for (row, (category, amount)) in (1u32..).zip(session.ledger().iter()) {
        sheet
            .write_string(row, 0, category.as_str())
            .with_context(|| format!("Failed to write XLSX row for {category}"))?;
        sheet
            .write_number(row, 1, amount.to_f64().unwrap_or_default())
            .with_context(|| format!("Failed to write XLSX row for {category}"))?;
        rows += 1;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows, "exported expenses XLSX");
    Ok(rows)
}

const PDF_PAGE_WIDTH: f32 = 210.0;
const PDF_PAGE_HEIGHT: f32 = 297.0;
const PDF_MARGIN: f32 = 15.0;
const PDF_LINE_HEIGHT: f32 = 8.0;
const PDF_FONT_SIZE: f32 = 12.0;
/// Characters per line at 12pt Helvetica inside the margins.
const PDF_LINE_CHARS: usize = 85;

/// Lay `text` out on A4 pages, wrapping long lines and starting a new page
/// when the bottom margin is reached.
pub(crate) fn render_pdf(title: &str, text: &str) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(PDF_PAGE_WIDTH),
        Mm(PDF_PAGE_HEIGHT),
        "text",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow::anyhow!("Failed to load PDF font: {e}"))?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PDF_PAGE_HEIGHT - PDF_MARGIN;
    for line in text.lines().flat_map(|l| wrap(l, PDF_LINE_CHARS)) {
        if y < PDF_MARGIN {
            let (page, layer) = doc.add_page(Mm(PDF_PAGE_WIDTH), Mm(PDF_PAGE_HEIGHT), "text");
            current = doc.get_page(page).get_layer(layer);
            y = PDF_PAGE_HEIGHT - PDF_MARGIN;
        }
        current.use_text(line, PDF_FONT_SIZE, Mm(PDF_MARGIN), Mm(y), &font);
        y -= PDF_LINE_HEIGHT;
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow::anyhow!("Failed to render PDF: {e}"))
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            out.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Write the monthly report to `path` as a PDF.
pub(crate) fn export_pdf(path: &Path, session: &Session, currency: &str) -> Result<()> {
    let bytes = render_pdf("Monthly Summary", &render_report(session, currency))?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write PDF report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported PDF report");
    Ok(())
}

/// Output format named by a file extension. Anything unrecognised is CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub(crate) fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx") => Self::Xlsx,
            Some("pdf") => Self::Pdf,
            _ => Self::Csv,
        }
    }
}

/// Write `session` to `path` in the format its extension names. CSV also
/// writes the totals file next to it. Returns a line describing the result.
pub(crate) fn export_session(path: &Path, session: &Session, currency: &str) -> Result<String> {
    match ExportFormat::from_path(path) {
        ExportFormat::Csv => {
            let rows = export_csv(path, session)?;
            let totals = totals_path(path);
            export_totals_csv(&totals, session)?;
            Ok(format!(
                "Exported {rows} categories to {} and totals to {}",
                path.display(),
                totals.display()
            ))
        }
        ExportFormat::Xlsx => {
            let rows = export_xlsx(path, session)?;
            Ok(format!("Exported {rows} categories to {}", path.display()))
        }
        ExportFormat::Pdf => {
            export_pdf(path, session, currency)?;
            Ok(format!("Report written to {}", path.display()))
        }
    }
}

/// `expenses.csv` -> `expenses-totals.csv`.
pub(crate) fn totals_path(path: &Path) -> std::path::PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "export".into());
    path.with_file_name(format!("{stem}-totals.csv"))
}
