use serde::{Deserialize, Serialize};

/// Normalized input state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub shoot: bool,
    pub mouse_delta_x: f32,
    pub mouse_delta_y: f32,
}

impl InputSnapshot {
    /// True if any of the four directional flags is held.
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}
