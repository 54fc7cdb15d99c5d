//! The design aggregate and its copy-on-write element operations.
//!
//! A [`Design`] is the complete canvas state for one invitation layout:
//! background plus an insertion-ordered element collection. Every editing
//! operation takes `&self` and returns a fresh snapshot, so a render pass
//! can never observe a half-applied edit.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId, ElementKind, Frame, ShapeKind};
use crate::error::DesignResult;

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Default fill for new shape elements.
pub const SHAPE_FILL: &str = "#3B82F6";

/// Default font family for new text elements.
pub const DEFAULT_FONT: &str = "Inter";

/// A partial element update. Fields left as `None` are untouched.
///
/// Text-only fields (`content`, `font_size`, `font_family`) are ignored
/// when the patch targets a shape element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    /// New X position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// New Y position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// New width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// New height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// New z-index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// New fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// New text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// New font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl ElementPatch {
    /// A patch that only moves an element.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch that only resizes an element.
    #[must_use]
    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// A patch that only recolors an element.
    #[must_use]
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }
}

/// The complete canvas state for one invitation layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Opaque identifier, carried through to the host record.
    pub id: String,
    /// Canvas width in pixels, fixed for the editing session.
    pub width: u32,
    /// Canvas height in pixels, fixed for the editing session.
    pub height: u32,
    /// Background fill: a CSS color or gradient string, or an image
    /// reference. Never parsed here, painted verbatim.
    pub background: String,
    /// Elements in insertion order. Paint order is a stable sort on
    /// `z_index`, not this order.
    pub elements: Vec<Element>,
}

impl Design {
    /// Create an empty design with the given id and dimensions.
    #[must_use]
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            background: "#FFFFFF".to_string(),
            elements: Vec::new(),
        }
    }

    /// Set the background fill.
    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Number of elements on the canvas.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Elements in paint order: stable ascending sort on `z_index`, so
    /// equal z-indices keep their insertion order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Find the topmost element containing the given canvas-space point.
    ///
    /// Topmost means last in paint order: the highest `z_index`, with ties
    /// going to the later-inserted element.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.paint_order()
            .iter()
            .rev()
            .find(|e| e.contains_point(x, y))
            .map(|e| e.id)
    }

    /// Append a new text element with editor defaults.
    ///
    /// Position (100,100), 200x50, "Click to edit" at 24px Inter, black
    /// fill, z-index equal to the current element count (on top of
    /// everything present so far).
    #[must_use]
    pub fn add_text(&self) -> Self {
        let element = Element::new(
            ElementKind::Text {
                content: "Click to edit".to_string(),
                font_size: 24.0,
                font_family: DEFAULT_FONT.to_string(),
            },
            Frame::new(100.0, 100.0, 200.0, 50.0),
            "#000000",
        )
        .with_z_index(self.next_z_index());

        tracing::debug!(element = %element.id, "add text element");
        self.with_appended(element)
    }

    /// Append a new shape element with editor defaults.
    ///
    /// Circles start as 100x100 squares, rectangles as 150x100, both at
    /// (150,150) with the default blue fill and a z-index equal to the
    /// current element count.
    #[must_use]
    pub fn add_shape(&self, shape: ShapeKind) -> Self {
        let frame = match shape {
            ShapeKind::Circle => Frame::new(150.0, 150.0, 100.0, 100.0),
            ShapeKind::Rectangle => Frame::new(150.0, 150.0, 150.0, 100.0),
        };
        let element = Element::new(ElementKind::Shape, frame, SHAPE_FILL)
            .with_z_index(self.next_z_index());

        tracing::debug!(element = %element.id, ?shape, "add shape element");
        self.with_appended(element)
    }

    /// Apply a partial update to the element with the given id.
    ///
    /// An unknown id degrades to a no-op: the returned design is equal to
    /// the input. Callers must not assume an error is raised.
    #[must_use]
    pub fn update_element(&self, id: ElementId, patch: &ElementPatch) -> Self {
        let mut next = self.clone();
        if let Some(element) = next.elements.iter_mut().find(|e| e.id == id) {
            apply_patch(element, patch);
        } else {
            tracing::trace!(element = %id, "update on unknown element ignored");
        }
        next
    }

    /// Remove the element with the given id. Unknown ids are a no-op.
    ///
    /// Other elements keep their z-indices; nothing is renumbered.
    #[must_use]
    pub fn delete_element(&self, id: ElementId) -> Self {
        let mut next = self.clone();
        next.elements.retain(|e| e.id != id);
        next
    }

    /// Clone the element with the given id, offset by (+20,+20), with a
    /// fresh id and a z-index equal to the pre-duplication element count.
    ///
    /// Unknown ids are a no-op. Returns the new design and the clone's id
    /// when one was created.
    #[must_use]
    pub fn duplicate_element(&self, id: ElementId) -> (Self, Option<ElementId>) {
        let Some(source) = self.element(id) else {
            tracing::trace!(element = %id, "duplicate of unknown element ignored");
            return (self.clone(), None);
        };

        let mut clone = source.clone();
        clone.id = ElementId::new();
        clone.frame.x += 20.0;
        clone.frame.y += 20.0;
        clone.z_index = self.next_z_index();

        let clone_id = clone.id;
        tracing::debug!(source = %id, clone = %clone_id, "duplicate element");
        (self.with_appended(clone), Some(clone_id))
    }

    /// Serialize the design to JSON for the host to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DesignResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a design from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> DesignResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// z-index for a newly appended element: the current element count.
    ///
    /// Deleting or duplicating never renumbers existing elements, so this
    /// only guarantees "on top of everything present so far" and
    /// collisions over a session's lifetime are expected; the stable paint
    /// sort resolves them.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn next_z_index(&self) -> i32 {
        self.elements.len() as i32
    }

    fn with_appended(&self, element: Element) -> Self {
        let mut next = self.clone();
        next.elements.push(element);
        next
    }
}

impl Default for Design {
    fn default() -> Self {
        Self::new("main_design", DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

fn apply_patch(element: &mut Element, patch: &ElementPatch) {
    if let Some(x) = patch.x {
        element.frame.x = x;
    }
    if let Some(y) = patch.y {
        element.frame.y = y;
    }
    if let Some(width) = patch.width {
        element.frame.width = width;
    }
    if let Some(height) = patch.height {
        element.frame.height = height;
    }
    if let Some(z_index) = patch.z_index {
        element.z_index = z_index;
    }
    if let Some(fill) = &patch.fill {
        element.fill.clone_from(fill);
    }

    if let ElementKind::Text {
        content,
        font_size,
        font_family,
    } = &mut element.kind
    {
        if let Some(new_content) = &patch.content {
            content.clone_from(new_content);
        }
        if let Some(new_size) = patch.font_size {
            *font_size = new_size;
        }
        if let Some(new_family) = &patch.font_family {
            font_family.clone_from(new_family);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_add_text_defaults() {
        let design = Design::default().add_text();
        assert_eq!(design.element_count(), 1);

        let element = &design.elements[0];
        assert_eq!(element.frame, Frame::new(100.0, 100.0, 200.0, 50.0));
        assert_eq!(element.z_index, 0);
        assert_eq!(element.fill, "#000000");
        match &element.kind {
            ElementKind::Text {
                content,
                font_size,
                font_family,
            } => {
                assert_eq!(content, "Click to edit");
                assert_eq!(*font_size, 24.0);
                assert_eq!(font_family, "Inter");
            }
            ElementKind::Shape => panic!("expected text element"),
        }
    }

    #[test]
    fn test_add_shape_defaults() {
        let design = Design::default()
            .add_shape(ShapeKind::Circle)
            .add_shape(ShapeKind::Rectangle);

        let circle = &design.elements[0];
        assert_eq!(circle.frame, Frame::new(150.0, 150.0, 100.0, 100.0));
        assert!(circle.is_circle());
        assert_eq!(circle.fill, SHAPE_FILL);
        assert_eq!(circle.z_index, 0);

        let rect = &design.elements[1];
        assert_eq!(rect.frame, Frame::new(150.0, 150.0, 150.0, 100.0));
        assert!(!rect.is_circle());
        assert_eq!(rect.z_index, 1);
    }

    #[test]
    fn test_operations_do_not_mutate_receiver() {
        let design = Design::default().add_text();
        let before = design.clone();

        let _ = design.add_shape(ShapeKind::Circle);
        let _ = design.delete_element(design.elements[0].id);
        let _ = design.update_element(design.elements[0].id, &ElementPatch::position(5.0, 5.0));

        assert_eq!(design, before);
    }

    #[test]
    fn test_ids_unique_across_adds_and_duplicates() {
        let mut design = Design::default();
        for _ in 0..4 {
            design = design.add_text().add_shape(ShapeKind::Rectangle);
        }
        for id in design.elements.iter().map(|e| e.id).collect::<Vec<_>>() {
            let (next, _) = design.duplicate_element(id);
            design = next;
        }

        let ids: HashSet<_> = design.elements.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), design.element_count());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let design = Design::default().add_text();
        let updated = design.update_element(ElementId::new(), &ElementPatch::position(5.0, 5.0));
        assert_eq!(updated, design);
    }

    #[test]
    fn test_update_moves_only_target() {
        let design = Design::default().add_text().add_text();
        let target = design.elements[0].id;
        let other = design.elements[1].id;

        let updated = design.update_element(target, &ElementPatch::position(10.0, -30.0));
        assert_eq!(updated.element(target).unwrap().frame.x, 10.0);
        assert_eq!(updated.element(target).unwrap().frame.y, -30.0);
        assert_eq!(
            updated.element(other).unwrap().frame,
            design.element(other).unwrap().frame
        );
    }

    #[test]
    fn test_patch_text_fields_ignored_on_shapes() {
        let design = Design::default().add_shape(ShapeKind::Circle);
        let id = design.elements[0].id;
        let patch = ElementPatch {
            content: Some("not text".to_string()),
            font_size: Some(64.0),
            fill: Some("#FF0000".to_string()),
            ..ElementPatch::default()
        };

        let updated = design.update_element(id, &patch);
        let element = updated.element(id).unwrap();
        assert_eq!(element.kind, ElementKind::Shape);
        assert_eq!(element.fill, "#FF0000");
    }

    #[test]
    fn test_delete_keeps_other_z_indices() {
        let design = Design::default().add_text().add_text().add_text();
        let first = design.elements[0].id;
        let deleted = design.delete_element(first);

        assert_eq!(deleted.element_count(), 2);
        let zs: Vec<i32> = deleted.elements.iter().map(|e| e.z_index).collect();
        // No renumbering after delete.
        assert_eq!(zs, vec![1, 2]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let design = Design::default().add_text();
        assert_eq!(design.delete_element(ElementId::new()), design);
    }

    #[test]
    fn test_duplicate_offsets_and_tops_stack() {
        let design = Design::default().add_text().add_shape(ShapeKind::Circle);
        let source = design.elements[0].id;
        let count_before = design.element_count();

        let (next, clone_id) = design.duplicate_element(source);
        let clone_id = clone_id.expect("clone created");
        let clone = next.element(clone_id).unwrap();
        let original = next.element(source).unwrap();

        assert_ne!(clone.id, original.id);
        assert_eq!(clone.frame.x, original.frame.x + 20.0);
        assert_eq!(clone.frame.y, original.frame.y + 20.0);
        assert_eq!(clone.z_index, i32::try_from(count_before).unwrap());
        assert_eq!(clone.kind, original.kind);
    }

    #[test]
    fn test_duplicate_unknown_id_is_noop() {
        let design = Design::default().add_text();
        let (next, clone_id) = design.duplicate_element(ElementId::new());
        assert_eq!(next, design);
        assert!(clone_id.is_none());
    }

    #[test]
    fn test_paint_order_stable_on_ties() {
        // Duplicate-then-delete can leave colliding z-indices; order must
        // fall back to insertion order, consistently across calls.
        let mut design = Design::default().add_text().add_text();
        design.elements[0].z_index = 3;
        design.elements[1].z_index = 3;

        let first: Vec<ElementId> = design.paint_order().iter().map(|e| e.id).collect();
        let second: Vec<ElementId> = design.paint_order().iter().map(|e| e.id).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![design.elements[0].id, design.elements[1].id]);
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let design = Design::default()
            .add_shape(ShapeKind::Rectangle)
            .add_shape(ShapeKind::Rectangle);
        let top = design.elements[1].id;

        // Both rectangles cover (200, 200); the later, higher-z one wins.
        assert_eq!(design.element_at(200.0, 200.0), Some(top));
        assert_eq!(design.element_at(5.0, 5.0), None);
    }

    #[test]
    fn test_element_at_tie_goes_to_later_insertion() {
        let mut design = Design::default()
            .add_shape(ShapeKind::Rectangle)
            .add_shape(ShapeKind::Rectangle);
        design.elements[0].z_index = 7;
        design.elements[1].z_index = 7;

        assert_eq!(design.element_at(200.0, 200.0), Some(design.elements[1].id));
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let design = Design::default()
            .add_text()
            .add_shape(ShapeKind::Circle)
            .add_shape(ShapeKind::Rectangle);

        let json = design.to_json().expect("serialize");
        let restored = Design::from_json(&json).expect("deserialize");
        assert_eq!(restored, design);
    }
}
