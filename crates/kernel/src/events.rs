use glam::Vec3;
use neonrun_common::EntityId;
use neonrun_scene::AvatarAnimation;
use serde::{Deserialize, Serialize};

/// Notable things that happened during simulation, tagged with the tick
/// they happened on. Kept in order for replay inspection and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Started { tick: u64 },
    Stopped { tick: u64 },
    Jumped { tick: u64, position: Vec3 },
    Landed { tick: u64, position: Vec3 },
    /// Score and health are the actor's values after the reward.
    PickupCollected {
        tick: u64,
        id: EntityId,
        score: u64,
        health: u32,
    },
    Shot { tick: u64, score: u64 },
    AnimationChanged { tick: u64, animation: AvatarAnimation },
    Disposed { tick: u64 },
}

impl SimEvent {
    pub fn tick(&self) -> u64 {
        match self {
            SimEvent::Started { tick }
            | SimEvent::Stopped { tick }
            | SimEvent::Jumped { tick, .. }
            | SimEvent::Landed { tick, .. }
            | SimEvent::PickupCollected { tick, .. }
            | SimEvent::Shot { tick, .. }
            | SimEvent::AnimationChanged { tick, .. }
            | SimEvent::Disposed { tick } => *tick,
        }
    }
}
