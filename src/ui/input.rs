//! Single-line text input used for filter edits and the export prompt.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, Input, TextArea};

/// Thin wrapper around `tui_textarea` that stays on one line.
pub struct PromptInput<'a> {
    textarea: TextArea<'a>,
}

impl<'a> PromptInput<'a> {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        let mut textarea = TextArea::new(vec![initial.into()]);
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(CursorMove::End);
        Self { textarea }
    }

    /// Current contents of the single line.
    #[must_use]
    pub fn text(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Replace the contents, placing the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut textarea = TextArea::new(vec![text.into()]);
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(CursorMove::End);
        self.textarea = textarea;
    }

    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.textarea.set_placeholder_text(text);
    }

    pub fn set_style(&mut self, style: Style) {
        self.textarea.set_style(style);
    }

    /// Feed a key event into the input. Returns true when the text changed.
    /// Enter is swallowed so the input can never grow a second line.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Enter {
            return false;
        }
        self.textarea.input(Input::from(key))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}
