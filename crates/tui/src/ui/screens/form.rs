use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{FormField, FormState},
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

/// Entry form drawn as a popup over the home screen.
pub fn render(frame: &mut Frame<'_>, area: Rect, form: &FormState) {
    let theme = Theme::default();
    let popup = centered_rect(50, 40, area);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = form.focus == field;
        let marker = if focused { "» " } else { "  " };
        let label_style = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        let value = form.value(field);
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<8}", field.label()), label_style),
            Span::styled(format!("{value}{cursor}"), Style::default().fg(theme.text)),
        ]));
    }

    lines.push(Line::from(""));
    match &form.error {
        Some(error) => lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(theme.error),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Use . or , for decimals.",
            Style::default().fg(theme.dim),
        ))),
    }

    let title = form.title();
    frame.render_widget(Clear, popup);
    Card::new(&title, &theme)
        .focused(true)
        .render_with(frame, popup, Paragraph::new(lines));
}
