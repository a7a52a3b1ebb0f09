//! Rendering of the results grid: headers with sort indicators and filter
//! strings, the visible page of rows, and the pagination footer.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState};
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::grid::dataset::{Dataset, STRUCTURE_COLUMN, cell_text, is_image_uri};
use crate::grid::page;
use crate::grid::sort::{Direction, SortState};
use crate::grid::FilterState;
use crate::theme::Theme;

const HIGHLIGHT_SYMBOL: &str = "▶ ";
const TABLE_COLUMN_SPACING: u16 = 1;

/// Scalar cells longer than this render truncated; export keeps full values.
pub const CELL_TEXT_LIMIT: usize = 50;

/// Everything the grid renderer needs for one frame.
pub struct GridView<'a> {
    pub dataset: &'a Dataset,
    pub columns: &'a [String],
    pub page_rows: &'a [usize],
    pub sort: &'a SortState,
    pub filters: &'a FilterState,
    pub selected_column: usize,
    /// Live text of the filter being edited, shown in place of the
    /// committed value for that column.
    pub editing: Option<(usize, &'a str)>,
    pub empty_message: &'a str,
}

pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    table_state: &mut TableState,
    view: &GridView<'_>,
    theme: &Theme,
) {
    let header_cells: Vec<Cell> = view
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let mut title = Line::styled(header_title(view, index, column), theme.header);
            if index == view.selected_column {
                title = title.style(theme.accent);
            }
            let filter = Line::styled(filter_text(view, index, column), theme.filter_row);
            Cell::from(Text::from(vec![title, filter]))
        })
        .collect();
    let header = Row::new(header_cells)
        .style(theme.header)
        .height(2)
        .bottom_margin(1);

    let rows: Vec<Row> = view
        .page_rows
        .iter()
        .map(|&index| {
            let cells: Vec<Cell> = view
                .columns
                .iter()
                .map(|column| {
                    let value = view.dataset.cell(index, column).unwrap_or(&Value::Null);
                    if column == STRUCTURE_COLUMN {
                        if is_image_uri(value) {
                            Cell::from(Line::styled("[image]", theme.accent))
                        } else {
                            Cell::from(Line::styled("No image available", theme.empty))
                        }
                    } else {
                        Cell::from(cell_display(value))
                    }
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let widths = column_widths(view.columns);
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(TABLE_COLUMN_SPACING)
        .highlight_spacing(HighlightSpacing::WhenSelected)
        .row_highlight_style(theme.row_highlight)
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(table, area, table_state);

    if view.page_rows.is_empty() {
        let empty = Paragraph::new(view.empty_message)
            .alignment(Alignment::Center)
            .style(theme.empty);
        let message_area = Rect {
            y: area.y + area.height.min(4) / 2 + 2,
            height: 1,
            ..area
        };
        if message_area.y < area.y + area.height {
            frame.render_widget(empty, message_area);
        }
    }
}

fn header_title(view: &GridView<'_>, index: usize, column: &str) -> String {
    let indicator = match view.sort.indicator(column) {
        Some(Direction::Ascending) => " ▲",
        Some(Direction::Descending) => " ▼",
        None => "",
    };
    let marker = if index == view.selected_column { "› " } else { "" };
    format!("{marker}{column}{indicator}")
}

fn filter_text(view: &GridView<'_>, index: usize, column: &str) -> String {
    if column == STRUCTURE_COLUMN {
        return String::new();
    }
    if let Some((editing, live)) = view.editing
        && editing == index
    {
        return format!("/{live}▏");
    }
    match view.filters.get(column) {
        Some(text) => format!("/{text}"),
        None => "·".to_string(),
    }
}

fn column_widths(columns: &[String]) -> Vec<Constraint> {
    columns
        .iter()
        .map(|column| {
            // SMILES and Structure get more room, as in the original layout.
            if column == "SMILES" || column == STRUCTURE_COLUMN {
                Constraint::Min(20)
            } else {
                Constraint::Min(12)
            }
        })
        .collect()
}

/// Render-only form of a scalar cell: the string form truncated with an
/// ellipsis past [`CELL_TEXT_LIMIT`] columns of display width.
#[must_use]
pub fn cell_display(value: &Value) -> String {
    let text = cell_text(value);
    if text.width() <= CELL_TEXT_LIMIT {
        return text;
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > CELL_TEXT_LIMIT {
            break;
        }
        truncated.push(ch);
        used += w;
    }
    truncated.push('…');
    truncated
}

/// The pagination footer: previous/next markers around the sliding window
/// of page numbers, the current one bracketed.
#[must_use]
pub fn page_line(current: usize, total: usize) -> String {
    let mut parts = Vec::new();
    parts.push("‹ prev".to_string());
    for number in page::window(current, total) {
        if number == current {
            parts.push(format!("[{number}]"));
        } else {
            parts.push(number.to_string());
        }
    }
    parts.push("next ›".to_string());
    parts.join("  ")
}

pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    current: usize,
    total: usize,
    theme: &Theme,
) {
    let footer = Paragraph::new(page_line(current, total))
        .alignment(Alignment::Center)
        .style(theme.prompt);
    frame.render_widget(footer, area);
}
