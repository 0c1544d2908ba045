use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Sparkline, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use super::panel;
use crate::analytics::growth_curve;
use crate::models::Investment;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_whole, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let portfolio = app.session.portfolio();
    if portfolio.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No investments yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :invest <principal> <rate%> <years> <name>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg).centered().block(panel("Investments (0)")),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(8)])
        .split(area);

    render_portfolio(f, chunks[0], app, portfolio);
    render_curve(f, chunks[1], app);
}

fn projected_value(inv: &Investment) -> f64 {
    let principal = inv.principal.to_f64().unwrap_or(0.0);
    growth_curve(principal, inv.annual_rate_pct / 100.0, inv.years)
        .last()
        .copied()
        .unwrap_or(principal)
}

fn render_portfolio(f: &mut Frame, area: Rect, app: &App, portfolio: &[Investment]) {
    let currency = &app.config.currency;
    let header_cells = ["Instrument", "Principal", "Return", "Years", "Projected"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = portfolio
        .iter()
        .map(|inv| {
            Row::new(vec![
                Cell::from(truncate(&inv.name, 30)),
                Cell::from(format_amount(inv.principal, currency)),
                Cell::from(format!("{}%", inv.annual_rate_pct)),
                Cell::from(inv.years.to_string()),
                Cell::from(Span::styled(
                    format_whole(projected_value(inv), currency),
                    theme::good_style(),
                )),
            ])
            .style(theme::normal_style())
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(18),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(18),
    ];

    let title = format!("Investments ({})", portfolio.len());
    let table = Table::new(rows, widths).header(header).block(panel(&title));
    f.render_widget(table, area);
}

fn render_curve(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .portfolio_curve
        .iter()
        .map(|v| v.max(0.0).round() as u64)
        .collect();

    let title = match app.portfolio_curve.last() {
        Some(end) => format!(
            "Portfolio Value over {} months: {}",
            app.portfolio_curve.len(),
            format_whole(*end, &app.config.currency)
        ),
        None => "Portfolio Value".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(panel(&title))
        .data(&data)
        .style(Style::default().fg(theme::palette().green));

    f.render_widget(sparkline, area);
}
