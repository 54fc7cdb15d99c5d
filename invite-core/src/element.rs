//! Canvas elements - the visual objects placed on an invitation design.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-left anchored bounds of an element in canvas-pixel space.
///
/// Positions may be negative (elements can sit partly off-canvas) and sizes
/// are not validated; a zero or negative size renders as a degenerate shape
/// that can never be hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Frame {
    /// Create a new frame.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the frame.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// The content a design element carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ElementKind {
    /// A text label.
    Text {
        /// Text content.
        content: String,
        /// Font size in pixels.
        font_size: f32,
        /// Font family name.
        font_family: String,
    },

    /// A filled shape. Circle vs rectangle is derived from the frame:
    /// equal width and height means circle (see [`Element::is_circle`]).
    Shape,
}

/// The kind of shape requested when adding a shape element.
///
/// Only meaningful at creation time; afterwards the frame's aspect is the
/// sole discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rectangle,
    /// Circle (stored as a square frame).
    Circle,
}

/// A single positioned visual object on a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, immutable once created.
    pub id: ElementId,
    /// Element content.
    pub kind: ElementKind,
    /// Position and size.
    pub frame: Frame,
    /// Paint order; higher paints later (on top). Ties resolve by
    /// insertion order.
    pub z_index: i32,
    /// Fill color string. Shape color, or text color for text elements.
    pub fill: String,
}

impl Element {
    /// Create a new element with the given kind and fill.
    #[must_use]
    pub fn new(kind: ElementKind, frame: Frame, fill: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            frame,
            z_index: 0,
            fill: fill.into(),
        }
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Whether this element is a text element.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Whether this element renders and hit-tests as a circle.
    ///
    /// A shape with equal width and height IS a circle; there is no
    /// separate stored discriminator. This predicate is the single place
    /// that rule lives.
    #[must_use]
    pub fn is_circle(&self) -> bool {
        matches!(self.kind, ElementKind::Shape) && self.frame.width == self.frame.height
    }

    /// Check if a point (in canvas coordinates) is within this element.
    ///
    /// Circles use a radial distance test from the frame center; text and
    /// rectangles use the axis-aligned frame bounds.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let f = &self.frame;
        if self.is_circle() {
            let (cx, cy) = f.center();
            let radius = f.width / 2.0;
            let (dx, dy) = (x - cx, y - cy);
            radius > 0.0 && dx * dx + dy * dy <= radius * radius
        } else {
            x >= f.x && x <= f.x + f.width && y >= f.y && y <= f.y + f.height
        }
    }
}
