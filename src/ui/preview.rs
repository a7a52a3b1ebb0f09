//! Structure-image decoding for the preview modal.
//!
//! Cells in the Structure column carry inline `data:image/...;base64,` URIs.
//! Expanding one decodes the payload off the URI and hands the bitmap to
//! `ratatui-image`, which renders through whatever graphics protocol the
//! terminal supports (Kitty, Sixel, iTerm2, or halfblocks). Decode failures
//! degrade to a placeholder; they never abort the table render.

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::grid::export::data_uri_payload;

static PICKER: OnceLock<Option<Picker>> = OnceLock::new();

/// The terminal graphics picker, probed once per process.
pub fn picker() -> Option<&'static Picker> {
    PICKER
        .get_or_init(|| Picker::from_query_stdio().ok())
        .as_ref()
}

/// Decode an image data URI into a bitmap.
#[must_use]
pub fn decode_data_uri(src: &str) -> Option<DynamicImage> {
    let payload = data_uri_payload(src)?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    image::load_from_memory(&bytes).ok()
}

/// The one cell currently expanded into the modal overlay. Exists only
/// while the modal is open.
pub struct ExpandedImage {
    pub row: usize,
    pub column: String,
    pub src: String,
    /// Pre-encoded protocol state; None when decoding failed or the
    /// terminal offers no graphics support.
    pub protocol: Option<StatefulProtocol>,
}

impl ExpandedImage {
    /// Record the clicked cell and prepare its image for display.
    #[must_use]
    pub fn open(row: usize, column: impl Into<String>, src: impl Into<String>) -> Self {
        let src = src.into();
        let protocol = decode_data_uri(&src)
            .and_then(|image| picker().map(|picker| picker.new_resize_protocol(image)));
        Self {
            row,
            column: column.into(),
            src,
            protocol,
        }
    }
}
