pub(crate) mod analytics;
pub(crate) mod dashboard;
pub(crate) mod expenses;
pub(crate) mod investments;

use ratatui::{
    style::Style,
    text::Span,
    widgets::{Block, Borders},
};

use super::theme;

/// Bordered block with a dim bold title, shared by every panel.
pub(crate) fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::palette().overlay))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}
