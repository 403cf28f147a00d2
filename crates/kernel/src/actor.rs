use glam::Vec3;
use neonrun_common::Transform;
use serde::{Deserialize, Serialize};

/// Upper bound for [`Actor::health`].
pub const MAX_HEALTH: u32 = 100;

/// The player's kinematic and gameplay state.
///
/// Kinematics are advanced by [`CharacterController`](crate::CharacterController);
/// health and score only move through [`take_damage`](Actor::take_damage),
/// [`heal`](Actor::heal), and [`add_score`](Actor::add_score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) facing_yaw: f32,
    pub(crate) on_ground: bool,
    health: u32,
    score: u64,
}

impl Actor {
    /// A fresh actor resting on the ground at `position`, full health, no score.
    pub fn spawn(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            facing_yaw: 0.0,
            on_ground: true,
            health: MAX_HEALTH,
            score: 0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Horizontal speed (length of the XZ velocity).
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    /// Facing angle about +Y, radians; 0 faces +Z.
    pub fn facing_yaw(&self) -> f32 {
        self.facing_yaw
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose `amount` health, stopping at 0. Returns the new health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Gain `amount` health, stopping at [`MAX_HEALTH`]. Returns the new health.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_add(amount).min(MAX_HEALTH);
        self.health
    }

    /// Add points. No cap beyond the integer range.
    pub fn add_score(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Position and facing as a scene transform.
    pub fn transform(&self) -> Transform {
        Transform::from_position_yaw(self.position, self.facing_yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_grounded_at_full_health() {
        let a = Actor::spawn(Vec3::new(0.0, 1.0, 0.0));
        assert!(a.on_ground());
        assert_eq!(a.health(), MAX_HEALTH);
        assert_eq!(a.score(), 0);
        assert_eq!(a.velocity(), Vec3::ZERO);
    }

    #[test]
    fn heal_saturates_at_max() {
        for start_damage in [0, 1, 50, 99, 100] {
            let mut a = Actor::spawn(Vec3::ZERO);
            a.take_damage(start_damage);
            assert_eq!(a.heal(1000), 100);
        }
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut a = Actor::spawn(Vec3::ZERO);
        assert_eq!(a.take_damage(1000), 0);
        assert!(!a.is_alive());
        assert_eq!(a.take_damage(5), 0);
    }

    #[test]
    fn heal_partial() {
        let mut a = Actor::spawn(Vec3::ZERO);
        a.take_damage(30);
        assert_eq!(a.heal(10), 80);
        assert_eq!(a.heal(u32::MAX), 100);
    }

    #[test]
    fn score_accumulates_without_cap() {
        let mut a = Actor::spawn(Vec3::ZERO);
        a.add_score(50);
        a.add_score(10);
        assert_eq!(a.score(), 60);
        a.add_score(u64::MAX);
        assert_eq!(a.score(), u64::MAX);
    }
}
