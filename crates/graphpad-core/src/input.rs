//! Input events consumed from the embedding application.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A pointer click, already translated to world coordinates by the
/// embedding application's camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub position: Point,
    pub button: MouseButton,
}

impl ClickEvent {
    /// Create a left-button click at a world position.
    pub fn left(position: Point) -> Self {
        Self {
            position,
            button: MouseButton::Left,
        }
    }
}
