use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_ledger(f, chunks[0], app);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(chunks[1]);
    render_voice(f, side[0], app);
    render_notes(f, side[1], app);
}

fn render_ledger(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Category", "Amount", "Share"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let ledger = app.session.ledger();
    let rows: Vec<Row> = ledger
        .iter()
        .enumerate()
        .map(|(i, (category, amount))| {
            let share = (ledger.share(category) * Decimal::ONE_HUNDRED).round_dp(1);
            let style = if i == app.category_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(category.as_str()),
                Cell::from(format_amount(amount, &app.config.currency)),
                Cell::from(format!("{share}%")),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(20),
        Constraint::Length(8),
    ];

    let title = format!(
        "Expenses ({})",
        format_amount(ledger.total(), &app.config.currency)
    );
    let table = Table::new(rows, widths).header(header).block(panel(&title));
    f.render_widget(table, area);
}

fn render_voice(f: &mut Frame, area: Rect, app: &App) {
    let lines = match &app.last_voice {
        None => vec![Line::from(Span::styled(
            "Record a note and load it with :voice <file>",
            theme::dim_style(),
        ))],
        Some(entry) => {
            let amount = if entry.has_amount() {
                Span::styled(
                    format_amount(entry.amount, &app.config.currency),
                    theme::good_style(),
                )
            } else {
                Span::styled("no amount detected", theme::bad_style())
            };
            vec![
                Line::from(Span::styled(
                    format!("\"{}\"", truncate(&entry.text, 60)),
                    theme::normal_style(),
                )),
                Line::from(vec![
                    Span::styled(format!("{} · ", entry.category), theme::dim_style()),
                    amount,
                ]),
            ]
        }
    };

    let voice = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("Last Voice Note"));
    f.render_widget(voice, area);
}

fn render_notes(f: &mut Frame, area: Rect, app: &App) {
    let notes = app.session.notes();
    let lines: Vec<Line> = if notes.is_empty() {
        vec![Line::from(Span::styled(
            "No notes. Add one with :note <text>",
            theme::dim_style(),
        ))]
    } else {
        notes
            .iter()
            .map(|n| Line::from(Span::styled(format!("• {n}"), theme::normal_style())))
            .collect()
    };

    let title = format!("Notes ({})", notes.len());
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel(&title));
    f.render_widget(widget, area);
}
