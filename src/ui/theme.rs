use ratatui::style::{Color, Modifier, Style};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Palette {
    pub(crate) header_bg: Color,
    pub(crate) header_fg: Color,
    pub(crate) accent: Color,
    pub(crate) green: Color,
    pub(crate) red: Color,
    pub(crate) yellow: Color,
    pub(crate) blue: Color,
    pub(crate) surface: Color,
    pub(crate) text: Color,
    pub(crate) text_dim: Color,
    pub(crate) overlay: Color,
    pub(crate) command_bg: Color,
}

pub(crate) const DEFAULT_PALETTE: Palette = Palette {
    header_bg: Color::Rgb(10, 25, 47),
    header_fg: Color::Rgb(230, 241, 245),
    accent: Color::Rgb(100, 255, 218),
    green: Color::Rgb(166, 227, 161),
    red: Color::Rgb(243, 139, 168),
    yellow: Color::Rgb(249, 226, 175),
    blue: Color::Rgb(137, 180, 250),
    surface: Color::Rgb(28, 37, 65),
    text: Color::Rgb(230, 241, 245),
    text_dim: Color::Rgb(127, 140, 160),
    overlay: Color::Rgb(20, 45, 76),
    command_bg: Color::Rgb(15, 46, 46),
};

/// Pure black and white with saturated signal colours.
pub(crate) const HIGH_CONTRAST_PALETTE: Palette = Palette {
    header_bg: Color::Black,
    header_fg: Color::White,
    accent: Color::Yellow,
    green: Color::LightGreen,
    red: Color::LightRed,
    yellow: Color::Yellow,
    blue: Color::LightCyan,
    surface: Color::Black,
    text: Color::White,
    text_dim: Color::White,
    overlay: Color::White,
    command_bg: Color::Black,
};

static HIGH_CONTRAST: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_high_contrast(on: bool) {
    HIGH_CONTRAST.store(on, Ordering::Relaxed);
}

pub(crate) fn high_contrast() -> bool {
    HIGH_CONTRAST.load(Ordering::Relaxed)
}

pub(crate) fn palette_for(high_contrast: bool) -> &'static Palette {
    if high_contrast {
        &HIGH_CONTRAST_PALETTE
    } else {
        &DEFAULT_PALETTE
    }
}

/// The palette currently in use.
pub(crate) fn palette() -> &'static Palette {
    palette_for(high_contrast())
}

pub(crate) fn header_style() -> Style {
    let p = palette();
    Style::default()
        .fg(p.header_fg)
        .bg(p.header_bg)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    let p = palette();
    Style::default().fg(p.header_bg).bg(p.accent)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(palette().text)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(palette().text_dim)
}

pub(crate) fn good_style() -> Style {
    Style::default().fg(palette().green)
}

pub(crate) fn bad_style() -> Style {
    Style::default().fg(palette().red)
}

pub(crate) fn warn_style() -> Style {
    Style::default().fg(palette().yellow)
}

pub(crate) fn title_style() -> Style {
    Style::default()
        .fg(palette().text_dim)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn command_bar_style() -> Style {
    let p = palette();
    Style::default().fg(p.text).bg(p.command_bg)
}

pub(crate) fn status_bar_style() -> Style {
    let p = palette();
    Style::default().fg(p.text_dim).bg(p.surface)
}

#[cfg(test)]
#[path = "theme_tests.rs"]
mod tests;
