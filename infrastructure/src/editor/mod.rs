//! Image editing adapter
//!
//! Implements the [`ImageEditor`](realism_application::ImageEditor) port
//! against an HTTP task service.

mod http_editor;
pub mod protocol;

pub use http_editor::HttpImageEditor;
