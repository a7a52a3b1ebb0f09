//! Status line: request progress while a calculation is in flight, row and
//! page counts once results are on screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::theme::Theme;

/// Snapshot of what the status line should say.
pub struct StatusLine {
    pub in_flight: bool,
    pub loaded: usize,
    pub filtered: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    status: &StatusLine,
    throbber_state: &mut ThrobberState,
    theme: &Theme,
) {
    if status.in_flight {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(area);
        let throbber = Throbber::default().throbber_style(theme.accent);
        frame.render_stateful_widget(throbber, layout[0], throbber_state);
        let label = Paragraph::new("Calculating descriptors…").style(theme.prompt);
        frame.render_widget(label, layout[1]);
        return;
    }

    let text = if status.loaded == 0 {
        String::new()
    } else if status.filtered == status.loaded {
        format!(
            " {} molecules · page {}/{}",
            status.loaded, status.current_page, status.total_pages
        )
    } else {
        format!(
            " {} of {} molecules · page {}/{}",
            status.filtered, status.loaded, status.current_page, status.total_pages
        )
    };
    frame.render_widget(Paragraph::new(text).style(theme.prompt), area);
}
