pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::Store;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Mode};

pub use terminal::{AppTerminal as Terminal, install_panic_hook, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render<S: Store>(frame: &mut Frame<'_>, app: &App<S>) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], app, &theme);
    screens::home::render(frame, layout[1], app);
    render_bottom_bar(frame, layout[2], app, &theme);

    if app.state.mode == Mode::Form {
        screens::form::render(frame, area, &app.state.form);
    }
    components::toast::render(frame, area, app.state.toast.as_ref());
}

fn render_info_bar<S: Store>(frame: &mut Frame<'_>, area: Rect, app: &App<S>, theme: &Theme) {
    let tracker = app.tracker();
    let data = tracker
        .store_location()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "memory".to_string());

    let line = Line::from(vec![
        Span::styled("Data", Style::default().fg(theme.dim)),
        Span::raw(format!(": {data}  ")),
        Span::styled("Entries", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", tracker.len())),
        Span::styled("Order", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", tracker.order().label())),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar<S: Store>(frame: &mut Frame<'_>, area: Rect, app: &App<S>, theme: &Theme) {
    let hints = match app.state.mode {
        Mode::Browse => components::hints::common::browse(),
        Mode::Form => components::hints::common::form(),
    };
    let mut parts = components::hints::hints_to_spans(&hints, theme);

    if app.state.mode == Mode::Browse {
        parts.push(components::hints::hint_separator(theme));
        parts.push(Span::styled("q", Style::default().fg(theme.accent)));
        parts.push(Span::raw(" quit"));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
