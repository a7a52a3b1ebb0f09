//! Overlays: the structure-image modal, the export filename prompt, and the
//! error/notice banners.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui_image::StatefulImage;

use super::input::PromptInput;
use super::preview::ExpandedImage;
use crate::theme::Theme;

/// Centre a box of the given percentage size inside `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [horizontal] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(vertical);
    horizontal
}

/// Full-size structure view. Falls back to a text placeholder when the
/// image could not be decoded or the terminal has no graphics support.
pub fn render_image_modal(
    frame: &mut Frame,
    area: Rect,
    expanded: &mut ExpandedImage,
    theme: &Theme,
) {
    let modal = centered(area, 80, 80);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Structure View ")
        .title_bottom(" Esc to close ")
        .style(theme.header);
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    match expanded.protocol.as_mut() {
        Some(protocol) => {
            frame.render_stateful_widget(StatefulImage::default(), inner, protocol);
        }
        None => {
            let placeholder = Paragraph::new("No image available")
                .alignment(Alignment::Center)
                .style(theme.empty);
            frame.render_widget(placeholder, inner);
        }
    }
}

/// Filename prompt for CSV export.
pub fn render_export_prompt(frame: &mut Frame, area: Rect, input: &PromptInput<'_>, theme: &Theme) {
    let modal = centered(area, 50, 20);
    let modal = Rect {
        height: modal.height.min(3),
        ..modal
    };
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Export as CSV: filename ")
        .title_bottom(" Enter to save · Esc to cancel ")
        .style(theme.prompt);
    let inner = block.inner(modal);
    frame.render_widget(block, modal);
    input.render(frame, inner);
}

/// One-line banner across the top of the given area.
pub fn render_banner(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let banner = Paragraph::new(format!(" {message}")).style(style);
    frame.render_widget(banner, area);
}
