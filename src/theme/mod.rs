//! Colour themes for the results grid.
//!
//! Each theme is a small set of ratatui styles; builtins are looked up by
//! name so `--theme` and `--list-themes` stay in sync.

mod light;
mod slate;

use ratatui::style::Style;

/// Styles applied across the interface.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub header: Style,
    pub filter_row: Style,
    pub row_highlight: Style,
    pub prompt: Style,
    pub empty: Style,
    pub accent: Style,
    pub error: Style,
    pub notice: Style,
}

impl Default for Theme {
    fn default() -> Self {
        slate::SLATE
    }
}

/// Names of the built-in themes, in presentation order.
#[must_use]
pub fn names() -> &'static [&'static str] {
    &["slate", "light"]
}

/// Look up a built-in theme by name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    match name {
        "slate" => Some(slate::SLATE),
        "light" => Some(light::LIGHT),
        _ => None,
    }
}
