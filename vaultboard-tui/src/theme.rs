//! Parrot/neon palette and the style helpers the panels draw with.
//!
//! - **Accent**: electric cyan (focus, headlines)
//! - **Positive**: neon green (rising trends, healthy status)
//! - **Negative**: hot pink (falling trends, errors)
//! - **Warning**: neon orange (outliers, middling status)
//! - **Neutral**: cool purple (secondary info)
//! - **Muted**: steel blue (hints, placeholders)

use ratatui::style::{Color, Modifier, Style};

use vaultboard_core::Trend;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

/// Series palette, indexed by the `chart-N` colour tokens.
const SERIES: [Color; 5] = [ACCENT, POSITIVE, NEUTRAL, WARNING, NEGATIVE];

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        text()
    }
}

/// Colour for a series token like `chart-3`. Unknown tokens fall back to text.
pub fn series_color(token: &str) -> Color {
    token
        .strip_prefix("chart-")
        .and_then(|n| n.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| SERIES.get(i).copied())
        .unwrap_or(TEXT)
}

/// Green when rising, pink when falling, muted when flat.
pub fn trend_color(trend: &Trend) -> Color {
    if trend.is_positive {
        POSITIVE
    } else if trend.delta < 0.0 {
        NEGATIVE
    } else {
        MUTED
    }
}

/// Colour for a bucket label from the gauge thresholds.
pub fn status_color(label: &str) -> Color {
    match label {
        "High" => POSITIVE,
        "Medium" => WARNING,
        "Low" => NEGATIVE,
        _ => NEUTRAL,
    }
}
