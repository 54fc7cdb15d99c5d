//! # Invite Renderer
//!
//! SVG painting and PNG export for invitation designs.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               invite-renderer               │
//! ├──────────────────────┬──────────────────────┤
//! │  Live view           │  Export              │
//! │  - z-ordered scene   │  - canonical 1x scene│
//! │  - zoom/pan group    │  - fixed 2x scale    │
//! │  - selection outline │  - resvg → tiny-skia │
//! │                      │  - PNG download      │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Both paths share one scene painter, so exported pixels always match the
//! untransformed canvas regardless of how the live view is zoomed or
//! panned.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use export::{export_file_name, export_png, DesignExporter, Download, ExportConfig};
pub use svg::{paint_design, paint_view};
