//! Procedural world generation.
//!
//! Runs once at world creation: inserts ground, structures, city lights,
//! energy orbs, and the avatar into a [`Scene`](neonrun_scene::Scene), and
//! returns the ids the simulation needs to animate and collect them.
//!
//! # Invariants
//! - Placement comes from a [`SeedLayout`] table; the same layout always
//!   produces the same structure and pickup positions.
//! - Colors, lit windows, antennas, and scattered props draw from a separate
//!   cosmetic RNG and are not required to reproduce. Pass a seeded RNG
//!   (see [`cosmetic_rng`]) when they must.
//! - Generation never fails: an unavailable asset source falls back to the
//!   procedural catalog.

mod avatar;
mod catalog;
mod generator;
mod layout;

pub use avatar::build_avatar;
pub use catalog::{DecorKind, energy_orb};
pub use generator::{DecorEntity, GeneratedWorld, PickupSpawn, WorldGenerator};
pub use layout::{Placement, SeedLayout};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// RNG for cosmetic variation. `None` draws a fresh seed from the thread RNG.
pub fn cosmetic_rng(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "cosmetic rng seeded");
    ChaCha8Rng::seed_from_u64(seed)
}
