//! Scene export.
//!
//! - [`html`]: standalone page rendered by plotly.js
//! - [`json`]: the scene IR as pretty-printed JSON

pub mod html;
pub mod json;

pub use html::{export_html, to_html_string, HtmlOptions, PLOTLY_CDN};
pub use json::{export_json, to_json_string};
