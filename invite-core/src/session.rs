//! The editor session: selection, view transform, and drag interaction.
//!
//! Selection, zoom, and pan live here as an explicit session object rather
//! than ambient UI state, so every interaction is testable without a live
//! render surface. The session owns the single authoritative [`Design`]
//! snapshot and replaces it wholesale on each operation.

use serde::{Deserialize, Serialize};

use crate::design::{Design, ElementPatch};
use crate::element::{Element, ElementId, ShapeKind};
use crate::event::{PointerEvent, PointerPhase};

/// Factor applied per zoom-in step.
pub const ZOOM_IN_FACTOR: f32 = 1.2;

/// Factor applied per zoom-out step.
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f32 = 0.125;

/// Largest allowed zoom level.
pub const MAX_ZOOM: f32 = 8.0;

/// Which element, if any, is the active target of property edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Idle,
    /// A single element is selected.
    Selected(ElementId),
}

impl Selection {
    /// The selected element id, if any.
    #[must_use]
    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Selected(id) => Some(*id),
        }
    }
}

/// Uniform scale and offset applied to the on-screen view.
///
/// View-only: the design's coordinates are never transformed, and export
/// ignores this entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Current zoom level (1.0 = 100%).
    pub zoom: f32,
    /// Pan offset X in screen pixels.
    pub pan_x: f32,
    /// Pan offset Y in screen pixels.
    pub pan_y: f32,
}

impl ViewTransform {
    /// Map a screen-space point to canvas space through the inverse
    /// transform.
    #[must_use]
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pan_x) / self.zoom, (y - self.pan_y) / self.zoom)
    }

    /// Zoom in one step, clamped to [`MAX_ZOOM`].
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_IN_FACTOR).min(MAX_ZOOM);
    }

    /// Zoom out one step, clamped to [`MIN_ZOOM`].
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * ZOOM_OUT_FACTOR).max(MIN_ZOOM);
    }

    /// Offset the pan by the given screen-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// An in-progress element drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct DragState {
    element: ElementId,
    /// Offset from the pointer's canvas position to the element origin at
    /// grab time, so the element doesn't jump to the cursor.
    grab_dx: f32,
    grab_dy: f32,
}

/// One editing session over a single design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSession {
    design: Design,
    selection: Selection,
    view: ViewTransform,
    drag: Option<DragState>,
    revision: u64,
}

impl EditorSession {
    /// Start a session over an existing design snapshot.
    #[must_use]
    pub fn new(design: Design) -> Self {
        Self {
            design,
            selection: Selection::Idle,
            view: ViewTransform::default(),
            drag: None,
            revision: 0,
        }
    }

    /// The current design snapshot. The host reads this after every
    /// change to publish it upward.
    #[must_use]
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// The current selection state.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The selected element, when one is selected and still present.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection
            .element_id()
            .and_then(|id| self.design.element(id))
    }

    /// The current view transform.
    #[must_use]
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Monotonic counter bumped on every design change, so the host can
    /// tell whether there is a new snapshot to persist.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether a drag is currently active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Feed one pointer event through the interaction state machine.
    ///
    /// Down on an element selects it and begins a drag (no prior selection
    /// required); down on empty canvas deselects. Every move during a drag
    /// applies a position update immediately, one snapshot per event. Up
    /// ends the drag.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event.x, event.y),
            PointerPhase::Move => self.pointer_move(event.x, event.y),
            PointerPhase::Up => self.drag = None,
        }
    }

    fn pointer_down(&mut self, x: f32, y: f32) {
        let (cx, cy) = self.view.to_canvas(x, y);
        if let Some(id) = self.design.element_at(cx, cy) {
            tracing::debug!(element = %id, "pointer down on element");
            self.selection = Selection::Selected(id);
            if let Some(element) = self.design.element(id) {
                self.drag = Some(DragState {
                    element: id,
                    grab_dx: element.frame.x - cx,
                    grab_dy: element.frame.y - cy,
                });
            }
        } else {
            tracing::trace!("pointer down on empty canvas");
            self.selection = Selection::Idle;
            self.drag = None;
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(drag) = self.drag else {
            return;
        };
        let (cx, cy) = self.view.to_canvas(x, y);
        let patch = ElementPatch::position(cx + drag.grab_dx, cy + drag.grab_dy);
        self.apply(|design| design.update_element(drag.element, &patch));
    }

    /// Select an element directly (e.g. from a layer list). Unknown ids
    /// leave the selection untouched.
    pub fn select(&mut self, id: ElementId) {
        if self.design.element(id).is_some() {
            self.selection = Selection::Selected(id);
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selection = Selection::Idle;
    }

    /// Add a text element and select it.
    pub fn add_text(&mut self) {
        self.apply(Design::add_text);
        self.select_last_added();
    }

    /// Add a shape element and select it.
    pub fn add_shape(&mut self, shape: ShapeKind) {
        self.apply(|design| design.add_shape(shape));
        self.select_last_added();
    }

    /// Route a property edit to the selected element. Idle sessions
    /// ignore the patch.
    pub fn update_selected(&mut self, patch: &ElementPatch) {
        if let Some(id) = self.selection.element_id() {
            self.apply(|design| design.update_element(id, patch));
        }
    }

    /// Route a property edit to a specific element.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) {
        self.apply(|design| design.update_element(id, patch));
    }

    /// Delete an element. If it was selected, the session returns to
    /// idle; an active drag on it is abandoned.
    pub fn delete_element(&mut self, id: ElementId) {
        self.apply(|design| design.delete_element(id));
        if self.selection == Selection::Selected(id) {
            self.selection = Selection::Idle;
        }
        if self.drag.is_some_and(|d| d.element == id) {
            self.drag = None;
        }
    }

    /// Delete the selected element, if any.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selection.element_id() {
            self.delete_element(id);
        }
    }

    /// Duplicate the selected element and move the selection to the
    /// clone.
    pub fn duplicate_selected(&mut self) {
        let Some(id) = self.selection.element_id() else {
            return;
        };
        let (next, clone_id) = self.design.duplicate_element(id);
        self.design = next;
        self.revision += 1;
        if let Some(clone_id) = clone_id {
            self.selection = Selection::Selected(clone_id);
        }
    }

    /// Replace the canvas background.
    pub fn set_background(&mut self, background: impl Into<String>) {
        let background = background.into();
        self.apply(|design| {
            let mut next = design.clone();
            next.background = background.clone();
            next
        });
    }

    /// Zoom the view in one step.
    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    /// Zoom the view out one step.
    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    /// Pan the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.view.pan_by(dx, dy);
    }

    fn apply(&mut self, op: impl FnOnce(&Design) -> Design) {
        self.design = op(&self.design);
        self.revision += 1;
    }

    fn select_last_added(&mut self) {
        if let Some(element) = self.design.elements.last() {
            self.selection = Selection::Selected(element.id);
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Design::default())
    }
}
