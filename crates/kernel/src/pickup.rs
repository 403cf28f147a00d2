use glam::Vec3;
use neonrun_common::EntityId;
use neonrun_worldgen::PickupSpawn;
use serde::{Deserialize, Serialize};

/// Collectible variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    EnergyOrb,
}

/// Proximity radius and rewards for collecting pickups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupRules {
    /// Collection happens when the actor is strictly closer than this.
    pub radius: f32,
    pub score_reward: u64,
    pub heal_reward: u32,
    /// Score for each press of the shoot input.
    pub shoot_reward: u64,
}

impl Default for PickupRules {
    fn default() -> Self {
        Self {
            radius: 2.0,
            score_reward: 50,
            heal_reward: 10,
            shoot_reward: 10,
        }
    }
}

/// A live collectible.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    /// Scene id of the inner mesh; the only part tested for proximity.
    pub id: EntityId,
    pub kind: PickupKind,
    /// Current (animated) position.
    pub position: Vec3,
    /// Rest position the bob animation oscillates around.
    pub anchor: Vec3,
    /// Spawn order; fixed for the pickup's lifetime, used as animation phase.
    pub index: usize,
    /// Translucent companion mesh that disappears with the pickup.
    pub glow: Option<EntityId>,
    pub collected: bool,
}

impl Pickup {
    pub fn energy_orb(id: EntityId, position: Vec3) -> Self {
        Self {
            id,
            kind: PickupKind::EnergyOrb,
            position,
            anchor: position,
            index: 0,
            glow: None,
            collected: false,
        }
    }

    pub fn with_glow(mut self, glow: EntityId) -> Self {
        self.glow = Some(glow);
        self
    }
}

/// The live set of collectibles, in insertion order.
///
/// Proximity queries scan every pickup; there is no spatial index.
#[derive(Debug, Clone, Default)]
pub struct PickupRegistry {
    pickups: Vec<Pickup>,
    inserted: usize,
}

impl PickupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one energy orb per generated spawn, in spawn order.
    pub fn from_spawns(spawns: &[PickupSpawn]) -> Self {
        let mut registry = Self::new();
        for spawn in spawns {
            registry.insert(Pickup::energy_orb(spawn.orb, spawn.position).with_glow(spawn.glow));
        }
        registry
    }

    /// Append a pickup. Its `index` is set to the running insertion count.
    pub fn insert(&mut self, mut pickup: Pickup) -> EntityId {
        pickup.index = self.inserted;
        pickup.collected = false;
        self.inserted += 1;
        let id = pickup.id;
        self.pickups.push(pickup);
        id
    }

    /// All live pickups in insertion order.
    pub fn all(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn get(&self, id: EntityId) -> Option<&Pickup> {
        self.pickups.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    /// Ids of pickups strictly within `radius` of `point`, in insertion order.
    pub fn query_near(&self, point: Vec3, radius: f32) -> Vec<EntityId> {
        self.pickups
            .iter()
            .filter(|p| p.position.distance(point) < radius)
            .map(|p| p.id)
            .collect()
    }

    /// Remove a pickup, returning it marked collected. Unknown ids are a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<Pickup> {
        let index = self.pickups.iter().position(|p| p.id == id)?;
        let mut pickup = self.pickups.remove(index);
        pickup.collected = true;
        Some(pickup)
    }

    /// Remove everything, returning what was live.
    pub fn drain(&mut self) -> Vec<Pickup> {
        std::mem::take(&mut self.pickups)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pickup> {
        self.pickups.iter_mut()
    }
}
