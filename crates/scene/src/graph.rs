use std::collections::BTreeMap;

use neonrun_common::EntityId;
use serde::{Deserialize, Serialize};

use crate::node::{NodeKind, NodeUpdate, SceneNode};
use crate::Scene;

/// Events produced by structural scene mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    Inserted { id: EntityId, kind: NodeKind },
    Removed { id: EntityId, kind: NodeKind },
}

/// In-memory scene: nodes keyed by id in a BTreeMap for deterministic iteration.
///
/// Insert/remove are logged as [`SceneEvent`]s. Animation updates are applied
/// in place and only counted, since they arrive every tick.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<EntityId, SceneNode>,
    events: Vec<SceneEvent>,
    updates_applied: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }

    /// Total primitives across all nodes.
    pub fn primitive_count(&self) -> usize {
        self.nodes.values().map(|n| n.primitives.len()).sum()
    }

    pub fn updates_applied(&self) -> u64 {
        self.updates_applied
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Scene for SceneGraph {
    fn insert(&mut self, node: SceneNode) -> EntityId {
        let id = node.id;
        let kind = node.kind;
        if self.nodes.insert(id, node).is_some() {
            tracing::warn!(%id, "scene node replaced by insert with the same id");
        }
        self.events.push(SceneEvent::Inserted { id, kind });
        id
    }

    fn remove(&mut self, id: EntityId) -> bool {
        match self.nodes.remove(&id) {
            Some(node) => {
                self.events.push(SceneEvent::Removed {
                    id,
                    kind: node.kind,
                });
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, id: EntityId, update: NodeUpdate) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        match update {
            NodeUpdate::Transform(t) => node.transform = t,
            NodeUpdate::Pose { position, rotation } => {
                node.transform.position = position;
                node.transform.rotation = rotation;
            }
            NodeUpdate::Animation(animation) => node.animation = Some(animation),
            NodeUpdate::LightIntensity(intensity) => {
                if let Some(light) = node.light.as_mut() {
                    light.intensity = intensity;
                }
            }
        }
        self.updates_applied += 1;
    }
}
