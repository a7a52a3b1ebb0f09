use ratatui::style::{Color, Modifier, Style};

use super::Theme;

pub const SLATE: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .bg(Color::Rgb(15, 23, 42)),
    filter_row: Style::new()
        .fg(Color::Rgb(148, 163, 184))
        .bg(Color::Rgb(15, 23, 42)),
    row_highlight: Style::new()
        .bg(Color::Rgb(30, 41, 59))
        .fg(Color::Rgb(250, 204, 21)),
    prompt: Style::new().fg(Color::LightCyan),
    empty: Style::new().fg(Color::DarkGray),
    accent: Style::new()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
    error: Style::new()
        .fg(Color::Rgb(254, 226, 226))
        .bg(Color::Rgb(153, 27, 27)),
    notice: Style::new().fg(Color::Rgb(134, 239, 172)),
};
