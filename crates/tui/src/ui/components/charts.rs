use engine::Category;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
};

use crate::ui::{components::card::Card, theme::Theme};

/// One line of the chart: a category and its values in display order.
pub struct Series {
    pub category: Category,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(category: Category, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        Self { category, points }
    }
}

/// Renders a line chart with one dataset per category inside a card.
///
/// `peak` is the largest value across all series; the y axis starts at zero.
pub fn render_line_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    series: &[Series],
    peak: f64,
    theme: &Theme,
) {
    let card = Card::new(title, theme);
    let len = series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    if len == 0 {
        let empty = Paragraph::new(Span::styled(
            "No entries yet. Press n to log your first day.",
            Style::default().fg(theme.dim),
        ));
        card.render_with(frame, area, empty);
        return;
    }

    let datasets = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.category.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.category(s.category)))
                .data(&s.points)
        })
        .collect::<Vec<_>>();

    let x_max = (len.saturating_sub(1)).max(1) as f64;
    let y_max = if peak > 0.0 { peak } else { 1.0 };
    let axis_style = Style::default().fg(theme.dim);

    let chart = Chart::new(datasets)
        .x_axis(Axis::default().style(axis_style).bounds([0.0, x_max]))
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::styled(
                        format_value(y_max),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
        );

    card.render_with(frame, area, chart);
}

/// Creates a simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    let ratio = (value / max).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Compact number for labels: integers without decimals, others with two.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
