//! The interactive results explorer.
//!
//! `App` owns the dataset and all grid state. Derived views are recomputed
//! as the explicit pipeline `page(sort(filter(dataset)))` whenever upstream
//! state changes; everything happens on the UI thread in response to
//! discrete events (keystrokes, service batches, the debounce deadline).

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::time::{Duration, Instant};

use anyhow::Result;
use log::info;
use ratatui::Frame;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::{Paragraph, TableState};
use throbber_widgets_tui::ThrobberState;

use super::input::PromptInput;
use super::modal;
use super::preview::ExpandedImage;
use super::progress::{self, StatusLine};
use super::table::{self, GridView};
use crate::grid::dataset::{Dataset, STRUCTURE_COLUMN, cell_text, is_image_uri};
use crate::grid::export;
use crate::grid::filter::{self, FilterDebounce, FilterState};
use crate::grid::page::{self, PageState};
use crate::grid::sort::{self, SortState};
use crate::service::{CalculationRequest, ServiceConfig, ServiceEvent, submit};
use crate::theme::Theme;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const EMPTY_MESSAGE: &str = "No molecules pass the filter.";
const KEY_HINTS: &str =
    " ←/→ column · ↑/↓ row · s sort · / filter · n/p page · 1-9 jump · e export · Enter image · r resubmit · q quit";

/// What happened during the session, reported after the terminal restores.
#[derive(Debug, Default)]
pub struct ExploreOutcome {
    pub exported: Vec<PathBuf>,
    pub rows_loaded: usize,
}

/// Which part of the interface owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Grid,
    FilterEdit,
    ExportPrompt,
    Modal,
}

pub struct App<'a> {
    service: ServiceConfig,
    request: CalculationRequest,
    theme: Theme,

    dataset: Dataset,
    display_columns: Vec<String>,
    filters: FilterState,
    debounce: FilterDebounce,
    sort: SortState,
    page: PageState,
    filtered: Vec<usize>,
    sorted: Vec<usize>,

    focus: Focus,
    selected_column: usize,
    table_state: TableState,
    filter_input: PromptInput<'a>,
    export_input: PromptInput<'a>,
    expanded: Option<ExpandedImage>,

    error: Option<String>,
    notice: Option<String>,
    in_flight: bool,
    next_request_id: u64,
    current_request_id: Option<u64>,
    events_tx: Sender<ServiceEvent>,
    events_rx: Receiver<ServiceEvent>,
    throbber_state: ThrobberState,
    exported: Vec<PathBuf>,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(service: ServiceConfig, request: CalculationRequest, theme: Theme) -> Self {
        let (events_tx, events_rx) = channel();
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        let mut export_input = PromptInput::new("");
        export_input.set_placeholder(export::DEFAULT_FILENAME);
        Self {
            service,
            request,
            theme,
            dataset: Dataset::default(),
            display_columns: Vec::new(),
            filters: FilterState::default(),
            debounce: FilterDebounce::default(),
            sort: SortState::default(),
            page: PageState::default(),
            filtered: Vec::new(),
            sorted: Vec::new(),
            focus: Focus::Grid,
            selected_column: 0,
            table_state,
            filter_input: PromptInput::new(""),
            export_input,
            expanded: None,
            error: None,
            notice: None,
            in_flight: false,
            next_request_id: 0,
            current_request_id: None,
            events_tx,
            events_rx,
            throbber_state: ThrobberState::default(),
            exported: Vec::new(),
        }
    }

    /// Run the interactive session. Submits the calculation request first so
    /// the grid fills in while the loop is already drawing.
    pub fn run(&mut self) -> Result<ExploreOutcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;
        self.submit_request();

        loop {
            self.pump_service_events();
            self.commit_ready_filter(Instant::now());
            if self.in_flight {
                self.throbber_state.calc_next();
            }
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        ratatui::restore();
        Ok(ExploreOutcome {
            exported: std::mem::take(&mut self.exported),
            rows_loaded: self.dataset.len(),
        })
    }

    /// Start a new calculation request on a worker thread. Ignored while a
    /// request is already outstanding.
    pub fn submit_request(&mut self) {
        if self.in_flight {
            return;
        }
        let id = self.begin_request();
        submit(
            self.service.clone(),
            self.request.clone(),
            id,
            self.events_tx.clone(),
        );
    }

    /// Allocate the next request id and mark the request outstanding.
    fn begin_request(&mut self) -> u64 {
        self.next_request_id += 1;
        self.current_request_id = Some(self.next_request_id);
        self.in_flight = true;
        self.error = None;
        self.notice = None;
        self.next_request_id
    }

    /// Drain worker messages. Batches from a superseded request are
    /// discarded; the first batch of the current request replaces the
    /// dataset wholesale and resets all grid state.
    fn pump_service_events(&mut self) {
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => self.handle_service_event(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    fn handle_service_event(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::Batch {
                id,
                columns,
                rows,
                complete,
            } => {
                if Some(id) != self.current_request_id {
                    return;
                }
                if let Some(columns) = columns {
                    self.replace_dataset(Dataset::new(columns));
                }
                self.dataset.push_rows(rows);
                if complete {
                    self.in_flight = false;
                    info!("dataset complete: {} rows", self.dataset.len());
                }
                self.refresh_view();
            }
            ServiceEvent::Failed { id, error } => {
                if Some(id) != self.current_request_id {
                    return;
                }
                self.in_flight = false;
                if error.is_empty_result() {
                    // Ran but nothing matched: the empty grid carries the
                    // message, not the error banner.
                    self.replace_dataset(Dataset::default());
                    self.refresh_view();
                } else {
                    self.error = Some(error.to_string());
                }
            }
        }
    }

    /// Swap in a new dataset and reset every piece of per-dataset UI state.
    fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.display_columns = self.dataset.display_columns();
        self.filters.clear();
        self.debounce = FilterDebounce::default();
        self.sort.clear();
        self.page.reset();
        self.expanded = None;
        self.selected_column = 0;
        self.focus = Focus::Grid;
        self.table_state.select(Some(0));
    }

    /// Recompute the derived views in pipeline order.
    fn refresh_view(&mut self) {
        self.filtered = filter::apply(&self.dataset, &self.display_columns, &self.filters);
        self.sorted = sort::apply(&self.dataset, &self.filtered, &self.sort);
        self.page.clamp(page::total_pages(self.sorted.len()));
        self.ensure_selection();
    }

    /// Commit a debounced filter edit once its quiet period elapsed.
    fn commit_ready_filter(&mut self, now: Instant) {
        if let Some((column, text)) = self.debounce.take_ready(now) {
            self.filters.set(column, text);
            self.page.reset();
            self.refresh_view();
        }
    }

    fn visible_rows(&self) -> &[usize] {
        page::slice(&self.sorted, self.page.current())
    }

    fn ensure_selection(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                None => self.table_state.select(Some(0)),
                Some(selected) if selected >= len => self.table_state.select(Some(len - 1)),
                Some(_) => {}
            }
        }
    }

    /// Returns true when the session should end.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.focus {
            Focus::Grid => self.handle_grid_key(key),
            Focus::FilterEdit => {
                self.handle_filter_key(key);
                false
            }
            Focus::ExportPrompt => {
                self.handle_export_key(key);
                false
            }
            Focus::Modal => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.expanded = None;
                    self.focus = Focus::Grid;
                }
                false
            }
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.error.is_some() || self.notice.is_some() {
                    self.error = None;
                    self.notice = None;
                } else {
                    return true;
                }
            }
            KeyCode::Char('x') => {
                self.error = None;
                self.notice = None;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.display_columns.len() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('s') => self.cycle_sort(),
            KeyCode::Char('/') => self.enter_filter_edit(),
            KeyCode::Char('n') => {
                self.page.next(page::total_pages(self.sorted.len()));
                self.ensure_selection();
            }
            KeyCode::Char('p') => {
                self.page.previous();
                self.ensure_selection();
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let target = digit as usize - '0' as usize;
                self.page.jump(target, page::total_pages(self.sorted.len()));
                self.ensure_selection();
            }
            KeyCode::Char('e') => {
                self.export_input.set_text("");
                self.focus = Focus::ExportPrompt;
            }
            KeyCode::Char('r') => self.submit_request(),
            KeyCode::Enter => self.open_structure_modal(),
            _ => {}
        }
        false
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                // Commit immediately instead of waiting out the debounce.
                if let Some((column, text)) = self.debounce.flush() {
                    self.filters.set(column, text);
                    self.page.reset();
                    self.refresh_view();
                }
                self.focus = Focus::Grid;
            }
            KeyCode::Esc => {
                // Leave the pending edit to commit on its own deadline.
                self.focus = Focus::Grid;
            }
            _ => {
                if self.filter_input.input(key)
                    && let Some(column) = self.display_columns.get(self.selected_column)
                {
                    self.debounce
                        .note(column.clone(), self.filter_input.text(), Instant::now());
                }
            }
        }
    }

    fn handle_export_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let filename = export::resolve_filename(self.export_input.text());
                self.focus = Focus::Grid;
                self.export_csv(&filename);
            }
            KeyCode::Esc => {
                self.focus = Focus::Grid;
            }
            _ => {
                self.export_input.input(key);
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    fn cycle_sort(&mut self) {
        let Some(column) = self.display_columns.get(self.selected_column) else {
            return;
        };
        self.sort.cycle(column);
        self.page.reset();
        self.refresh_view();
    }

    fn enter_filter_edit(&mut self) {
        let Some(column) = self.display_columns.get(self.selected_column) else {
            return;
        };
        if column == STRUCTURE_COLUMN {
            // The structure column has no filter input.
            return;
        }
        let current = self.filters.get(column).unwrap_or("").to_string();
        self.filter_input.set_text(current);
        self.focus = Focus::FilterEdit;
    }

    /// Expand the selected row's structure image into the modal. Non-image
    /// cells leave a notice instead.
    fn open_structure_modal(&mut self) {
        let Some(selected) = self.table_state.selected() else {
            return;
        };
        let Some(&row) = self.visible_rows().get(selected) else {
            return;
        };
        if !self.display_columns.iter().any(|c| c == STRUCTURE_COLUMN) {
            return;
        }
        match self.dataset.cell(row, STRUCTURE_COLUMN) {
            Some(value) if is_image_uri(value) => {
                let src = cell_text(value);
                self.expanded = Some(ExpandedImage::open(row, STRUCTURE_COLUMN, src));
                self.focus = Focus::Modal;
            }
            _ => {
                self.notice = Some("No image available".to_string());
            }
        }
    }

    /// Serialise the filtered (not paginated) view and save it locally.
    fn export_csv(&mut self, filename: &str) {
        let text = export::csv_text(&self.dataset, &self.filtered, &self.display_columns);
        let path = PathBuf::from(filename);
        match export::write_csv(&path, &text) {
            Ok(()) => {
                info!("exported {} rows to {}", self.filtered.len(), path.display());
                self.notice = Some(format!(
                    "Exported {} rows to {}",
                    self.filtered.len(),
                    path.display()
                ));
                self.exported.push(path);
            }
            Err(err) => {
                self.error = Some(format!("Export failed: {err}"));
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let status = StatusLine {
            in_flight: self.in_flight,
            loaded: self.dataset.len(),
            filtered: self.filtered.len(),
            current_page: self.page.current(),
            total_pages: page::total_pages(self.sorted.len()),
        };
        progress::render_status(frame, layout[0], &status, &mut self.throbber_state, &self.theme);

        if let Some(message) = &self.error {
            modal::render_banner(frame, layout[1], message, self.theme.error);
        } else if let Some(message) = &self.notice {
            modal::render_banner(frame, layout[1], message, self.theme.notice);
        }

        let editing = if self.focus == Focus::FilterEdit {
            Some((self.selected_column, self.filter_input.text()))
        } else {
            None
        };
        let page_rows: Vec<usize> = self.visible_rows().to_vec();
        let view = GridView {
            dataset: &self.dataset,
            columns: &self.display_columns,
            page_rows: &page_rows,
            sort: &self.sort,
            filters: &self.filters,
            selected_column: self.selected_column,
            editing,
            empty_message: EMPTY_MESSAGE,
        };
        table::render_grid(frame, layout[2], &mut self.table_state, &view, &self.theme);

        table::render_footer(
            frame,
            layout[3],
            self.page.current(),
            page::total_pages(self.sorted.len()),
            &self.theme,
        );
        frame.render_widget(
            Paragraph::new(KEY_HINTS).style(self.theme.empty),
            layout[4],
        );

        match self.focus {
            Focus::ExportPrompt => {
                modal::render_export_prompt(frame, area, &self.export_input, &self.theme);
            }
            Focus::Modal => {
                if let Some(expanded) = self.expanded.as_mut() {
                    modal::render_image_modal(frame, area, expanded, &self.theme);
                }
            }
            _ => {}
        }
    }
}
