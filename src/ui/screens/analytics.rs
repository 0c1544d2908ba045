use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::analytics::{percent_deviation, Band};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_whole};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(area);

    render_forecast(f, chunks[0], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_benchmark(f, bottom[0], app);
    render_insights(f, bottom[1], app);
}

fn bar(label: String, value: f64, color: ratatui::style::Color) -> Bar<'static> {
    Bar::default()
        .value(value.max(0.0).round() as u64)
        .label(Line::from(label))
        .style(Style::default().fg(color))
        .value_style(
            Style::default()
                .fg(theme::palette().header_bg)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
}

fn render_forecast(f: &mut Frame, area: Rect, app: &App) {
    let n = app.history.len();
    let bars: Vec<Bar> = app
        .history
        .iter()
        .enumerate()
        .map(|(i, v)| bar(format!("M-{}", n - i), *v, theme::palette().blue))
        .chain(
            app.forecast
                .iter()
                .enumerate()
                .map(|(i, v)| bar(format!("F+{}", i + 1), *v, theme::palette().yellow)),
        )
        .collect();

    let mut title = match app.forecast.last() {
        Some(end) => format!(
            "Spending History and {}-Month Forecast (ends at {})",
            app.forecast.len(),
            format_whole(*end, &app.config.currency)
        ),
        None => "Spending History and Forecast".to_string(),
    };
    if let Some(trend) = &app.trend {
        let sign = if trend.slope >= 0.0 { "+" } else { "-" };
        title.push_str(&format!(
            ", trend {sign}{}/month",
            format_whole(trend.slope.abs(), &app.config.currency)
        ));
    }

    let chart = BarChart::default()
        .block(panel(&title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_benchmark(f: &mut Frame, area: Rect, app: &App) {
    let currency = &app.config.currency;
    let header_cells = ["Category", "Spent", "Benchmark", "Diff"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let ledger = app.session.ledger();
    let rows: Vec<Row> = app
        .config
        .benchmark
        .iter()
        .map(|(category, bench)| {
            let spend = ledger.get(category);
            let diff = match percent_deviation(spend, bench) {
                Some(pct) => {
                    let sign = if pct > Decimal::ZERO { "+" } else { "" };
                    format!("{sign}{}%", pct.round())
                }
                None => "-".to_string(),
            };
            Row::new(vec![
                Cell::from(category.as_str()),
                Cell::from(format_amount(spend, currency)),
                Cell::from(format_amount(bench, currency)),
                Cell::from(diff),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .style(theme::normal_style())
        .block(panel("Benchmark"));
    f.render_widget(table, area);
}

fn render_insights(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.insights.is_empty() {
        vec![Line::from(Span::styled(
            "Spending is within 20% of the benchmark everywhere",
            theme::good_style(),
        ))]
    } else {
        app.insights
            .iter()
            .map(|insight| {
                let style = match insight.band {
                    Band::Above => theme::bad_style(),
                    Band::Below => theme::good_style(),
                };
                Line::from(Span::styled(insight.message(), style))
            })
            .collect()
    };

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("Insights"));
    f.render_widget(widget, area);
}
