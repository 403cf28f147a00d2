//! Scene collaborator: what the game inserts, removes, and animates.
//!
//! The simulation core only writes to a [`Scene`]; it never reads scene
//! internals back. [`SceneGraph`] is the in-memory implementation used by
//! the headless runner and by tests.
//!
//! # Invariants
//! - Nodes are immutable geometry once inserted; only transform and light
//!   intensity (plus the avatar's animation) change through [`NodeUpdate`].
//! - Insert and remove produce events; iteration order is deterministic.

mod graph;
mod node;

pub use graph::{SceneEvent, SceneGraph};
pub use node::{
    AvatarAnimation, Material, MeshHandle, NodeKind, NodeUpdate, PointLight, Primitive, SceneNode,
    Shape,
};

use neonrun_common::EntityId;

/// Write-only scene surface consumed by world generation and the simulation loop.
pub trait Scene {
    /// Insert a node and return its id.
    fn insert(&mut self, node: SceneNode) -> EntityId;

    /// Remove a node. Removing an unknown id is a no-op and returns `false`.
    fn remove(&mut self, id: EntityId) -> bool;

    /// Push an animation update to a node. Unknown ids are ignored.
    fn apply(&mut self, id: EntityId, update: NodeUpdate);
}
