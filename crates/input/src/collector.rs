use glam::Vec2;
use std::collections::HashSet;

use crate::action::{Action, KeyBindings};
use crate::platform::Platform;
use crate::snapshot::InputSnapshot;
use crate::InputSource;

/// Collects raw host events between ticks and produces snapshots.
///
/// Mouse motion only accumulates while the pointer is locked; the
/// accumulator is drained by [`InputSource::snapshot`].
pub struct InputCollector<P: Platform> {
    bindings: KeyBindings,
    platform: P,
    held: HashSet<Action>,
    primary_pressed: bool,
    pointer_locked: bool,
    lock_requested: bool,
    mouse_position: Vec2,
    mouse_delta: Vec2,
}

impl<P: Platform> InputCollector<P> {
    pub fn new(bindings: KeyBindings, platform: P) -> Self {
        Self {
            bindings,
            platform,
            held: HashSet::new(),
            primary_pressed: false,
            pointer_locked: false,
            lock_requested: false,
            mouse_position: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
        }
    }

    pub fn key_down(&mut self, code: &str) {
        match self.bindings.lookup(code) {
            Some(action) => {
                self.held.insert(action);
            }
            None => tracing::trace!(code, "unbound key"),
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(action) = self.bindings.lookup(code) {
            self.held.remove(&action);
        }
    }

    /// Primary (left) mouse button. The first press asks the platform for pointer lock.
    pub fn primary_button(&mut self, pressed: bool) {
        self.primary_pressed = pressed;
        if pressed && !self.pointer_locked && !self.lock_requested {
            self.lock_requested = self.platform.request_pointer_lock();
        }
    }

    /// Touch start/end. Acts as the primary button only on touch-primary hosts.
    pub fn touch(&mut self, pressed: bool) {
        if self.platform.is_touch_primary() {
            self.primary_button(pressed);
        }
    }

    /// Host notification that pointer lock was gained or lost.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
        self.lock_requested = false;
        if !locked {
            self.mouse_delta = Vec2::ZERO;
        }
    }

    /// Mouse motion: relative movement while locked, absolute position otherwise.
    pub fn mouse_moved(&mut self, x: f32, y: f32, dx: f32, dy: f32) {
        if self.pointer_locked {
            self.mouse_delta += Vec2::new(dx, dy);
        } else {
            self.mouse_position = Vec2::new(x, y);
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
        self.primary_pressed = false;
        self.mouse_delta = Vec2::ZERO;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }
}

impl<P: Platform> InputSource for InputCollector<P> {
    fn snapshot(&mut self) -> InputSnapshot {
        let delta = std::mem::take(&mut self.mouse_delta);
        InputSnapshot {
            forward: self.is_held(Action::MoveForward),
            backward: self.is_held(Action::MoveBackward),
            left: self.is_held(Action::StrafeLeft),
            right: self.is_held(Action::StrafeRight),
            jump: self.is_held(Action::Jump),
            shoot: self.primary_pressed || self.is_held(Action::Shoot),
            mouse_delta_x: delta.x,
            mouse_delta_y: delta.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;

    struct LockingPlatform {
        requests: usize,
    }

    impl Platform for LockingPlatform {
        fn is_touch_primary(&self) -> bool {
            true
        }

        fn request_pointer_lock(&mut self) -> bool {
            self.requests += 1;
            true
        }
    }

    fn collector() -> InputCollector<HeadlessPlatform> {
        InputCollector::new(KeyBindings::default(), HeadlessPlatform::default())
    }

    #[test]
    fn held_keys_map_to_flags() {
        let mut c = collector();
        c.key_down("KeyW");
        c.key_down("KeyD");
        let s = c.snapshot();
        assert!(s.forward && s.right);
        assert!(!s.backward && !s.left && !s.jump);

        c.key_up("KeyW");
        let s = c.snapshot();
        assert!(!s.forward && s.right);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut c = collector();
        c.key_down("KeyZ");
        assert_eq!(c.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn mouse_deltas_drain_on_read() {
        let mut c = collector();
        c.set_pointer_locked(true);
        c.mouse_moved(0.0, 0.0, 3.0, -1.0);
        c.mouse_moved(0.0, 0.0, 2.0, -1.0);
        let s = c.snapshot();
        assert_eq!(s.mouse_delta_x, 5.0);
        assert_eq!(s.mouse_delta_y, -2.0);

        let s = c.snapshot();
        assert_eq!(s.mouse_delta_x, 0.0);
        assert_eq!(s.mouse_delta_y, 0.0);
    }

    #[test]
    fn unlocked_motion_tracks_position_only() {
        let mut c = collector();
        c.mouse_moved(120.0, 80.0, 4.0, 4.0);
        assert_eq!(c.mouse_position(), Vec2::new(120.0, 80.0));
        assert_eq!(c.snapshot().mouse_delta_x, 0.0);
    }

    #[test]
    fn primary_button_is_shoot() {
        let mut c = collector();
        c.primary_button(true);
        assert!(c.snapshot().shoot);
        c.primary_button(false);
        assert!(!c.snapshot().shoot);
    }

    #[test]
    fn touch_acts_as_click_and_requests_lock_once() {
        let mut c = InputCollector::new(KeyBindings::default(), LockingPlatform { requests: 0 });
        c.touch(true);
        assert!(c.snapshot().shoot);
        c.touch(false);
        c.touch(true);
        assert_eq!(c.platform.requests, 1);

        c.set_pointer_locked(true);
        c.touch(true);
        assert_eq!(c.platform.requests, 1);
    }

    #[test]
    fn touch_ignored_when_not_touch_primary() {
        let mut c = collector();
        c.touch(true);
        assert!(!c.snapshot().shoot);
    }

    #[test]
    fn clear_releases_everything() {
        let mut c = collector();
        c.key_down("Space");
        c.primary_button(true);
        c.clear();
        assert_eq!(c.snapshot(), InputSnapshot::default());
    }
}
