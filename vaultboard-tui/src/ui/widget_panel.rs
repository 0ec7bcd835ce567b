//! One dashboard widget: a summary header and a body drawn by widget kind.
//!
//! Line, area and scatter widgets become a braille chart with one series
//! per descriptor (outliers overlaid in pink). Bar widgets use a bar chart,
//! pie widgets a list of share bars, and gauges a single slider.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap,
};
use ratatui::Frame;

use vaultboard_core::{PeriodSelection, Trend, Widget, WidgetKind, WidgetSummary};

use crate::theme;

pub fn render(
    f: &mut Frame,
    area: Rect,
    widget: &Widget,
    selection: Option<&PeriodSelection>,
    focused: bool,
) {
    let summary = widget.summarize(selection);
    let title = match summary.as_ref().ok().and_then(|s| s.period.as_deref()) {
        Some(period) => format!(" {} ({period}) ", widget.title),
        None => format!(" {} ", widget.title),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(title)
        .title_style(theme::panel_title(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => {
            let text = Paragraph::new(Span::styled(format!("Unavailable: {e}"), theme::negative()))
                .wrap(Wrap { trim: true });
            f.render_widget(text, inner);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    f.render_widget(Paragraph::new(summary_lines(widget, &summary)), chunks[0]);

    match widget.kind {
        WidgetKind::Area | WidgetKind::Line | WidgetKind::Scatter => {
            render_chart(f, chunks[1], widget, selection, &summary)
        }
        WidgetKind::Bar => render_bars(f, chunks[1], widget, selection),
        WidgetKind::Pie => render_shares(f, chunks[1], widget, &summary),
        WidgetKind::Gauge => render_gauge(f, chunks[1], widget, &summary),
    }
}

/// Headline and trend on the first line; average, outliers and status on the second.
fn summary_lines(widget: &Widget, summary: &WidgetSummary) -> Vec<Line<'static>> {
    let mut first = vec![Span::styled(
        format_value(summary.headline, &widget.unit),
        theme::accent_bold(),
    )];
    if widget.trend_field.is_some() {
        first.push(Span::raw("  "));
        first.push(trend_span(summary.trend.as_ref(), &widget.unit));
    }

    let mut second: Vec<Span<'static>> = Vec::new();
    if let Some(avg) = summary.average {
        second.push(Span::styled(
            format!("avg {}  ", format_value(avg, &widget.unit)),
            theme::neutral(),
        ));
    }
    if widget.outliers.is_some() {
        let count = summary.outlier_count();
        let style = if count > 0 {
            theme::warning()
        } else {
            theme::muted()
        };
        second.push(Span::styled(format!("{count} outliers  "), style));
    }
    if let Some(status) = &summary.status {
        second.push(Span::styled(
            status.clone(),
            Style::default().fg(theme::status_color(status)),
        ));
    }

    vec![Line::from(first), Line::from(second)]
}

fn render_chart(
    f: &mut Frame,
    area: Rect,
    widget: &Widget,
    selection: Option<&PeriodSelection>,
    summary: &WidgetSummary,
) {
    let Ok(dataset) = widget.dataset(selection) else {
        return render_placeholder(f, area);
    };
    if dataset.is_empty() {
        return render_placeholder(f, area);
    }

    let series: Vec<(&str, Style, Vec<(f64, f64)>)> = widget
        .series
        .iter()
        .filter_map(|(key, desc)| {
            let column = dataset.column(key).ok()?;
            let style = Style::default().fg(theme::series_color(&desc.color_token));
            Some((desc.label.as_str(), style, indexed(&column)))
        })
        .collect();

    let outliers: Vec<(f64, f64)> = match &widget.outliers {
        Some((field, _)) => dataset
            .column(field)
            .map(|column| {
                indexed(&column)
                    .into_iter()
                    .zip(&summary.outlier_flags)
                    .filter(|(_, flagged)| **flagged)
                    .map(|(point, _)| point)
                    .collect()
            })
            .unwrap_or_default(),
        None => Vec::new(),
    };

    let (y_min, y_max) = padded_bounds(series.iter().flat_map(|(_, _, d)| d.iter().map(|p| p.1)));
    let graph_type = if widget.kind == WidgetKind::Scatter {
        GraphType::Scatter
    } else {
        GraphType::Line
    };

    let mut datasets: Vec<Dataset> = series
        .iter()
        .map(|(name, style, data)| {
            Dataset::default()
                .name(*name)
                .marker(Marker::Braille)
                .style(*style)
                .graph_type(graph_type)
                .data(data)
        })
        .collect();
    if !outliers.is_empty() {
        datasets.push(
            Dataset::default()
                .name("outliers")
                .marker(Marker::Dot)
                .style(theme::negative())
                .graph_type(GraphType::Scatter)
                .data(&outliers),
        );
    }

    let labels: Vec<&str> = dataset.labels().collect();
    let first = labels.first().copied().unwrap_or_default().to_string();
    let last = labels.last().copied().unwrap_or_default().to_string();
    let x_max = labels.len().saturating_sub(1) as f64;

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format_compact(y_min), theme::muted()),
                    Span::styled(format_compact(y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_bars(f: &mut Frame, area: Rect, widget: &Widget, selection: Option<&PeriodSelection>) {
    let Ok(dataset) = widget.dataset(selection) else {
        return render_placeholder(f, area);
    };
    let Some((key, desc)) = widget.series.iter().next() else {
        return render_placeholder(f, area);
    };
    let Ok(values) = dataset.column(key) else {
        return render_placeholder(f, area);
    };
    if values.is_empty() {
        return render_placeholder(f, area);
    }

    let style = Style::default().fg(theme::series_color(&desc.color_token));
    let bars: Vec<Bar> = dataset
        .labels()
        .zip(&values)
        .map(|(label, value)| {
            Bar::default()
                .value(value.max(0.0).round() as u64)
                .text_value(format_compact(*value))
                .label(Line::from(label.to_string()))
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area.width, values.len()))
        .bar_gap(1)
        .value_style(theme::text())
        .label_style(theme::muted());

    f.render_widget(chart, area);
}

fn render_shares(f: &mut Frame, area: Rect, widget: &Widget, summary: &WidgetSummary) {
    if summary.shares.is_empty() {
        return render_placeholder(f, area);
    }

    let color = widget
        .series
        .iter()
        .next()
        .map(|(_, desc)| theme::series_color(&desc.color_token))
        .unwrap_or(theme::ACCENT);
    let label_width = summary
        .shares
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);
    let bar_width = (area.width as usize).saturating_sub(label_width + 10).max(4);

    let lines: Vec<Line> = summary
        .shares
        .iter()
        .map(|share| {
            Line::from(vec![
                Span::styled(format!("{:>label_width$} ", share.label), theme::text()),
                Span::styled(text_bar(share.percent / 100.0, bar_width), Style::default().fg(color)),
                Span::styled(format!(" {:>5.1}%", share.percent), theme::muted()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn render_gauge(f: &mut Frame, area: Rect, widget: &Widget, summary: &WidgetSummary) {
    let color = summary
        .status
        .as_deref()
        .map(theme::status_color)
        .unwrap_or(theme::ACCENT);
    let bar_width = (area.width as usize).saturating_sub(4).max(4);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            text_bar(summary.headline / 100.0, bar_width),
            Style::default().fg(color),
        )),
    ];
    if let Some(ranges) = &widget.status {
        let floors: Vec<String> = ranges
            .iter()
            .map(|r| format!("{} ≥ {}", r.label, format_value(r.min, &widget.unit)))
            .collect();
        lines.push(Line::from(Span::styled(floors.join("  "), theme::muted())));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(Span::styled("No data for this period", theme::muted())),
        area,
    );
}

// ─── Helpers ────────────────────────────────────────────────────────

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
}

/// Width of one bar when `count` bars share `area_width` columns, gap included.
fn bar_width(area_width: u16, count: usize) -> u16 {
    let slot = area_width / u16::try_from(count).unwrap_or(u16::MAX).max(1);
    slot.saturating_sub(1).clamp(1, 9)
}

/// Min/max with 5% padding; a flat series gets a unit band around it.
fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let padding = (max - min).abs() * 0.05;
    if padding == 0.0 {
        (min - 1.0, max + 1.0)
    } else {
        (min - padding, max + padding)
    }
}

/// `$` is a prefix; any other unit is a suffix.
pub fn format_value(value: f64, unit: &str) -> String {
    match unit {
        "$" => {
            if value < 0.0 {
                format!("-${}", format_compact(-value))
            } else {
                format!("${}", format_compact(value))
            }
        }
        "" => format_compact(value),
        suffix => format!("{value:.1}{suffix}"),
    }
}

/// Short human form: 1.2M, 15.0k, 42.5.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{value:.1}")
    }
}

/// Arrow, signed delta and percent change. A suppressed trend shows a dash.
pub fn trend_span(trend: Option<&Trend>, unit: &str) -> Span<'static> {
    let Some(trend) = trend else {
        return Span::styled("—", theme::muted());
    };
    let arrow = if trend.is_positive {
        "▲"
    } else if trend.delta < 0.0 {
        "▼"
    } else {
        "■"
    };
    let sign = if trend.delta > 0.0 { "+" } else { "" };
    let mut text = format!("{arrow} {sign}{}", format_value(trend.delta, unit));
    if let Some(pct) = trend.percent_change {
        text.push_str(&format!(" ({sign}{pct:.1}%)"));
    }
    Span::styled(text, Style::default().fg(theme::trend_color(trend)))
}

/// Fixed-width filled bar for a fraction clamped to [0, 1].
pub fn text_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
