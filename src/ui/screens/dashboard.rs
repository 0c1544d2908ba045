use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::panel;
use crate::analytics::{IncomeAlert, SpendingDelta};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Category chart
            Constraint::Length(5), // Alerts and tips
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_spending_chart(f, chunks[1], app);
    render_messages(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let currency = &app.config.currency;
    let summary = &app.summary;
    render_card(
        f,
        cards[0],
        "Income",
        format_amount(summary.income, currency),
        theme::palette().green,
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        format_amount(summary.total_expenses, currency),
        theme::palette().red,
    );
    render_card(
        f,
        cards[2],
        "Savings",
        format_amount(summary.savings, currency),
        if summary.savings >= Decimal::ZERO {
            theme::palette().green
        } else {
            theme::palette().red
        },
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, display: String, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    let ledger = app.session.ledger();
    if ledger.total().is_zero() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :add 800 groceries",
            theme::dim_style(),
        )))
        .centered()
        .block(panel("Spending by Category"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = ledger
        .iter()
        .map(|(category, amount)| {
            Bar::default()
                .value(amount.to_u64().unwrap_or(0))
                .label(Line::from(truncate(category.as_str(), 10)))
                .style(Style::default().fg(theme::palette().accent))
                .value_style(
                    Style::default()
                        .fg(theme::palette().text)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Spending by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::palette().accent))
        .value_style(Style::default().fg(theme::palette().text));

    f.render_widget(chart, area);
}

fn render_messages(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    if let Some(delta) = &app.delta {
        let style = match delta {
            SpendingDelta::Decreased(_) => theme::good_style(),
            SpendingDelta::Increased(_) => theme::warn_style(),
            SpendingDelta::Unchanged => theme::normal_style(),
        };
        lines.push(Line::from(Span::styled(delta.message(), style)));
    }

    let alert_style = match app.alert {
        IncomeAlert::OverIncome => theme::bad_style(),
        IncomeAlert::NearLimit => theme::warn_style(),
        IncomeAlert::WithinRange => theme::good_style(),
    };
    lines.push(Line::from(Span::styled(app.alert.message(), alert_style)));

    for tip in &app.tips {
        lines.push(Line::from(Span::styled(tip.message(), theme::warn_style())));
    }

    f.render_widget(Paragraph::new(lines).block(panel("Insights")), area);
}
