use engine::{Category, Record, Store, Summary, stats};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use crate::{
    app::{App, Mode},
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{Series, ascii_bar, format_value, render_line_chart},
        },
        theme::Theme,
    },
};

pub fn render<S: Store>(frame: &mut Frame<'_>, area: Rect, app: &App<S>) {
    let theme = Theme::default();
    let records = app.visible_records();
    let summary = Summary::from_records(records.iter().copied());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Chart
            Constraint::Length(4),      // Totals
            Constraint::Min(5),         // Entries
        ])
        .split(area);

    render_chart(frame, layout[0], &records, &summary, &theme);
    render_totals(frame, layout[1], &summary, &theme);
    render_list(frame, layout[2], app, &records, &summary, &theme);
}

fn render_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    records: &[&Record],
    summary: &Summary,
    theme: &Theme,
) {
    let series = Category::ALL
        .iter()
        .map(|category| Series::new(*category, &stats::series(records, *category)))
        .collect::<Vec<_>>();
    render_line_chart(frame, area, "History", &series, summary.peak(), theme);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, summary: &Summary, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (category, col) in Category::ALL.iter().zip(cols.iter()) {
        let stats = summary.category(*category);
        StatCard::new(
            category.label(),
            format_value(stats.total),
            theme.category(*category),
            theme,
        )
        .subtitle(format!(
            "avg {}  max {}",
            format_value(stats.average),
            format_value(stats.max)
        ))
        .render(frame, *col);
    }
}

fn render_list<S: Store>(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &App<S>,
    records: &[&Record],
    summary: &Summary,
    theme: &Theme,
) {
    let peak = summary.peak();
    let items = records
        .iter()
        .map(|record| {
            let mut spans = vec![Span::styled(
                format!("{:<12}", record.date()),
                Style::default().fg(theme.dim),
            )];
            for category in Category::ALL {
                let value = record.quantities().get(category).value();
                spans.push(Span::styled(
                    format!(" {}:{:>7} ", category.label(), format_value(value)),
                    Style::default().fg(theme.text),
                ));
                spans.push(Span::styled(
                    ascii_bar(value, peak, 6),
                    Style::default().fg(theme.category(category)),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(app.state.selected.min(items.len() - 1)));
    }

    let title = format!("Entries ({}) · {}", records.len(), app.tracker().order().label());
    let card = Card::new(&title, theme).focused(app.state.mode == Mode::Browse);
    let list = List::new(items)
        .block(card.block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
