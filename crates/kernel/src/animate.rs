use glam::Vec3;
use neonrun_common::EntityId;
use neonrun_scene::{AvatarAnimation, NodeUpdate, Scene};
use serde::{Deserialize, Serialize};

use crate::pickup::PickupRegistry;

/// Time-driven cosmetic animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub orb_bob_amplitude: f32,
    pub orb_bob_frequency: f32,
    /// Orb yaw rate, radians/s.
    pub orb_spin_rate: f32,
    pub light_base: f32,
    pub light_amplitude: f32,
    pub light_frequency: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            orb_bob_amplitude: 0.5,
            orb_bob_frequency: 2.0,
            orb_spin_rate: 2.0,
            light_base: 0.5,
            light_amplitude: 0.3,
            light_frequency: 3.0,
        }
    }
}

/// `base + amplitude * sin(frequency * time + phase)`
pub fn wave(base: f32, amplitude: f32, time: f32, frequency: f32, phase: f32) -> f32 {
    base + amplitude * (frequency * time + phase).sin()
}

/// Bobs and spins pickups, pulses city lights.
///
/// Purely a function of elapsed time and each item's stable index, so
/// results are identical regardless of how time was sliced into ticks.
#[derive(Debug, Clone)]
pub struct DecorAnimator {
    config: AnimationConfig,
    lights: Vec<EntityId>,
}

impl DecorAnimator {
    pub fn new(config: AnimationConfig, lights: Vec<EntityId>) -> Self {
        Self { config, lights }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn lights(&self) -> &[EntityId] {
        &self.lights
    }

    pub fn orb_position(&self, anchor: Vec3, time: f32, index: usize) -> Vec3 {
        let c = &self.config;
        let y = wave(anchor.y, c.orb_bob_amplitude, time, c.orb_bob_frequency, index as f32);
        Vec3::new(anchor.x, y, anchor.z)
    }

    pub fn orb_yaw(&self, time: f32) -> f32 {
        self.config.orb_spin_rate * time
    }

    pub fn light_intensity(&self, time: f32, index: usize) -> f32 {
        let c = &self.config;
        wave(c.light_base, c.light_amplitude, time, c.light_frequency, index as f32)
    }

    /// Update pickup positions in the registry and push node updates for
    /// orbs, their glows, and lights.
    pub fn animate<S: Scene + ?Sized>(
        &self,
        time: f32,
        pickups: &mut PickupRegistry,
        scene: &mut S,
    ) {
        let yaw = self.orb_yaw(time);
        for pickup in pickups.iter_mut() {
            pickup.position = self.orb_position(pickup.anchor, time, pickup.index);
            let pose = NodeUpdate::pose_yaw(pickup.position, yaw);
            scene.apply(pickup.id, pose);
            if let Some(glow) = pickup.glow {
                scene.apply(glow, pose);
            }
        }
        for (index, light) in self.lights.iter().enumerate() {
            scene.apply(*light, NodeUpdate::LightIntensity(self.light_intensity(time, index)));
        }
    }
}

/// Picks the avatar clip each tick and reports only changes.
///
/// A jump this tick wins, then movement intent selects walk, otherwise idle.
#[derive(Debug, Clone)]
pub struct AvatarAnimator {
    current: AvatarAnimation,
}

impl AvatarAnimator {
    pub fn new() -> Self {
        Self {
            current: AvatarAnimation::Idle,
        }
    }

    pub fn current(&self) -> AvatarAnimation {
        self.current
    }

    /// Returns the new clip when it differs from the one already playing.
    pub fn select(&mut self, moving: bool, jumped: bool) -> Option<AvatarAnimation> {
        let next = if jumped {
            AvatarAnimation::Jump
        } else if moving {
            AvatarAnimation::Walk
        } else {
            AvatarAnimation::Idle
        };
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

impl Default for AvatarAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pickup::Pickup;
    use neonrun_common::Transform;
    use neonrun_scene::{NodeKind, SceneGraph, SceneNode};

    #[test]
    fn orb_bob_matches_sine() {
        let anim = DecorAnimator::new(AnimationConfig::default(), Vec::new());
        let anchor = Vec3::new(10.0, 3.0, 10.0);
        let p = anim.orb_position(anchor, 0.25, 1);
        assert!((p.y - (3.0 + 0.5 * (0.5f32 + 1.0).sin())).abs() < 1e-6);
        assert_eq!((p.x, p.z), (10.0, 10.0));
        assert_eq!(anim.orb_position(anchor, 0.0, 0), anchor);
    }

    #[test]
    fn light_intensity_stays_in_band() {
        let anim = DecorAnimator::new(AnimationConfig::default(), Vec::new());
        for i in 0..20 {
            for step in 0..100 {
                let v = anim.light_intensity(step as f32 * 0.137, i);
                assert!((0.2 - 1e-6..=0.8 + 1e-6).contains(&v));
            }
        }
    }

    #[test]
    fn animate_pushes_updates_and_moves_pickups() {
        let mut scene = SceneGraph::new();
        let orb = scene.insert(SceneNode::new("orb", NodeKind::Pickup, Transform::default()));
        let glow = scene.insert(SceneNode::new("glow", NodeKind::PickupGlow, Transform::default()));
        let light = scene.insert(SceneNode::new("light", NodeKind::Light, Transform::default()));

        let mut pickups = PickupRegistry::new();
        pickups.insert(Pickup::energy_orb(orb, Vec3::new(0.0, 3.0, 0.0)).with_glow(glow));

        let anim = DecorAnimator::new(AnimationConfig::default(), vec![light]);
        anim.animate(1.0, &mut pickups, &mut scene);

        assert_eq!(scene.updates_applied(), 3);
        let moved = pickups.all()[0].position;
        assert!((moved.y - (3.0 + 0.5 * 2.0f32.sin())).abs() < 1e-6);
        assert_eq!(pickups.all()[0].anchor, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn avatar_clip_transitions() {
        let mut clips = AvatarAnimator::new();
        assert_eq!(clips.current(), AvatarAnimation::Idle);
        assert_eq!(clips.select(false, false), None);
        assert_eq!(clips.select(true, false), Some(AvatarAnimation::Walk));
        assert_eq!(clips.select(true, false), None);
        assert_eq!(clips.select(true, true), Some(AvatarAnimation::Jump));
        assert_eq!(clips.select(false, false), Some(AvatarAnimation::Idle));
    }

    #[test]
    fn animation_depends_only_on_time() {
        let anim = DecorAnimator::new(AnimationConfig::default(), Vec::new());
        let mut a = PickupRegistry::new();
        a.insert(Pickup::energy_orb(EntityId::new(), Vec3::new(1.0, 3.0, 1.0)));
        let mut b = a.clone();
        let mut scene = SceneGraph::new();

        anim.animate(2.0, &mut a, &mut scene);
        for t in [0.3, 1.1, 2.0] {
            anim.animate(t, &mut b, &mut scene);
        }
        assert_eq!(a.all()[0].position, b.all()[0].position);
    }
}
