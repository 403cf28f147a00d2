use glam::Vec3;
use neonrun_input::InputSnapshot;
use serde::{Deserialize, Serialize};

use crate::actor::Actor;

/// Kinematic tuning for the character controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal speed while a direction is held, units/s.
    pub speed: f32,
    /// Upward velocity applied on jump, units/s.
    pub jump_force: f32,
    /// Downward acceleration while airborne, units/s².
    pub gravity: f32,
    /// Horizontal velocity multiplier per tick with no directional input.
    /// Applied once per tick regardless of `dt`.
    pub friction: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            jump_force: 20.0,
            gravity: 35.0,
            friction: 0.8,
        }
    }
}

/// What happened to ground contact during one [`CharacterController::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionReport {
    pub jumped: bool,
    pub landed: bool,
}

/// Owns the actor and advances it one tick at a time.
///
/// Explicit Euler, no sub-stepping, no collision except the ground plane at
/// the spawn height.
#[derive(Debug, Clone)]
pub struct CharacterController {
    actor: Actor,
    config: MovementConfig,
    ground_height: f32,
}

impl CharacterController {
    /// Spawn an actor at `spawn`; its height becomes the ground-contact height.
    pub fn new(spawn: Vec3, config: MovementConfig) -> Self {
        Self {
            actor: Actor::spawn(spawn),
            config,
            ground_height: spawn.y,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    /// Advance one tick. Negative or non-finite `dt` is treated as zero.
    pub fn advance(&mut self, dt: f32, input: &InputSnapshot) -> MotionReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let cfg = self.config;
        let actor = &mut self.actor;
        let mut report = MotionReport::default();

        let intent = move_intent(input);
        if intent != Vec3::ZERO {
            let v = intent * cfg.speed;
            actor.velocity.x = v.x;
            actor.velocity.z = v.z;
            actor.facing_yaw = intent.x.atan2(intent.z);
        } else {
            actor.velocity.x *= cfg.friction;
            actor.velocity.z *= cfg.friction;
        }

        if input.jump && actor.on_ground {
            actor.velocity.y = cfg.jump_force;
            actor.on_ground = false;
            report.jumped = true;
        }

        if !actor.on_ground {
            actor.velocity.y -= cfg.gravity * dt;
        }

        actor.position += actor.velocity * dt;

        if actor.position.y <= self.ground_height {
            report.landed = !actor.on_ground;
            actor.position.y = self.ground_height;
            actor.velocity.y = 0.0;
            actor.on_ground = true;
        }

        report
    }
}

/// Unit direction from the four movement flags, or zero.
///
/// Forward is -Z, right is +X. Opposing flags cancel.
pub fn move_intent(input: &InputSnapshot) -> Vec3 {
    let mut v = Vec3::ZERO;
    if input.forward {
        v.z -= 1.0;
    }
    if input.backward {
        v.z += 1.0;
    }
    if input.left {
        v.x -= 1.0;
    }
    if input.right {
        v.x += 1.0;
    }
    v.normalize_or_zero()
}
