use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bindable gameplay action.
///
/// Raw key codes map onto actions; the collector folds held actions into an
/// [`InputSnapshot`](crate::InputSnapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    Jump,
    Shoot,
}

impl Action {
    /// Parse the short names used by input scripts.
    pub fn from_script_name(name: &str) -> Option<Action> {
        match name {
            "forward" => Some(Action::MoveForward),
            "backward" => Some(Action::MoveBackward),
            "left" => Some(Action::StrafeLeft),
            "right" => Some(Action::StrafeRight),
            "jump" => Some(Action::Jump),
            "shoot" => Some(Action::Shoot),
            _ => None,
        }
    }
}

/// Key-code to action table. Key codes follow the DOM `KeyboardEvent.code` names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    keys: HashMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = HashMap::new();
        keys.insert("KeyW".into(), Action::MoveForward);
        keys.insert("KeyS".into(), Action::MoveBackward);
        keys.insert("KeyA".into(), Action::StrafeLeft);
        keys.insert("KeyD".into(), Action::StrafeRight);
        keys.insert("Space".into(), Action::Jump);
        Self { keys }
    }
}

impl KeyBindings {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Bind a key code, replacing any previous binding for it.
    pub fn bind(&mut self, code: impl Into<String>, action: Action) {
        self.keys.insert(code.into(), action);
    }

    pub fn unbind(&mut self, code: &str) -> Option<Action> {
        self.keys.remove(code)
    }

    pub fn lookup(&self, code: &str) -> Option<Action> {
        self.keys.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_wasd_and_space() {
        let b = KeyBindings::default();
        assert_eq!(b.lookup("KeyW"), Some(Action::MoveForward));
        assert_eq!(b.lookup("KeyS"), Some(Action::MoveBackward));
        assert_eq!(b.lookup("KeyA"), Some(Action::StrafeLeft));
        assert_eq!(b.lookup("KeyD"), Some(Action::StrafeRight));
        assert_eq!(b.lookup("Space"), Some(Action::Jump));
        assert_eq!(b.lookup("KeyQ"), None);
    }

    #[test]
    fn rebinding_replaces() {
        let mut b = KeyBindings::default();
        b.bind("ArrowUp", Action::MoveForward);
        b.bind("KeyW", Action::Jump);
        assert_eq!(b.lookup("ArrowUp"), Some(Action::MoveForward));
        assert_eq!(b.lookup("KeyW"), Some(Action::Jump));
        assert_eq!(b.unbind("KeyW"), Some(Action::Jump));
        assert_eq!(b.lookup("KeyW"), None);
    }

    #[test]
    fn script_names() {
        assert_eq!(Action::from_script_name("jump"), Some(Action::Jump));
        assert_eq!(Action::from_script_name("idle"), None);
    }
}
