//! # Invite Core
//!
//! Canvas design model for event invitation layouts: positioned, z-ordered
//! text and shape elements, copy-on-write editing operations, and the
//! editor session state (selection, zoom/pan, drag).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                invite-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Design          │  EditorSession           │
//! │  - Elements      │  - Selection machine     │
//! │  - Paint order   │  - View transform        │
//! │  - Operations    │  - Pointer drag          │
//! ├─────────────────────────────────────────────┤
//! │  Seeding         │  Host boundary           │
//! │  - Event fields  │  - JSON snapshot         │
//! │  - Placeholders  │  - Revision counter      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The host wizard seeds a design from event details, feeds pointer events
//! and property edits into the session, and reads back a fresh [`Design`]
//! snapshot after every change.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod design;
pub mod element;
pub mod error;
pub mod event;
pub mod seed;
pub mod session;

pub use design::{Design, ElementPatch};
pub use element::{Element, ElementId, ElementKind, Frame, ShapeKind};
pub use error::{DesignError, DesignResult};
pub use event::{PointerEvent, PointerPhase};
pub use seed::EventDetails;
pub use session::{EditorSession, Selection, ViewTransform};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
