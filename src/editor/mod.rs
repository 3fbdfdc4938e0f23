//! The text widget that holds the document.
//!
//! A rope-backed text area with cursor movement and basic insertion and
//! deletion. The controller only ever replaces or reads its full content
//! through [`TextWidget`](crate::controller::TextWidget).

mod text_area;

pub use text_area::{DEFAULT_TAB_WIDTH, Direction, TextArea, display_width, expand_tabs};
