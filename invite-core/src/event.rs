//! Pointer input events for canvas interaction.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Pointer pressed (mouse down / touch start).
    Down,
    /// Pointer moved while tracked.
    Move,
    /// Pointer released.
    Up,
}

/// A pointer event in screen coordinates, before the view transform is
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in screen pixels.
    pub x: f32,
    /// Y position in screen pixels.
    pub y: f32,
}

impl PointerEvent {
    /// A pointer-down event.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Down,
            x,
            y,
        }
    }

    /// A pointer-move event.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Move,
            x,
            y,
        }
    }

    /// A pointer-up event.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Up,
            x,
            y,
        }
    }
}
