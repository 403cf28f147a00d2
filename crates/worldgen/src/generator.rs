use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use neonrun_assets::AssetSource;
use neonrun_common::{Color, EntityId, Transform};
use neonrun_scene::{
    Material, MeshHandle, NodeKind, PointLight, Primitive, Scene, SceneNode, Shape,
};
use rand::Rng;

use crate::avatar::build_avatar;
use crate::catalog::{DecorKind, energy_orb, unit};
use crate::layout::SeedLayout;

const CITY_MODEL: &str = "city";

/// A structure or prop inserted into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorEntity {
    pub id: EntityId,
    pub kind: DecorKind,
}

/// One collectible: the inner orb (used for proximity) and its glow companion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupSpawn {
    pub orb: EntityId,
    pub glow: EntityId,
    pub position: Vec3,
}

/// Ids of everything generation inserted, grouped by how the simulation uses them.
#[derive(Debug, Clone, Default)]
pub struct GeneratedWorld {
    pub ground: Option<EntityId>,
    /// Set when an external city model replaced the procedural structures.
    pub city_model: Option<EntityId>,
    pub decor: Vec<DecorEntity>,
    /// Flickering city lights, in spawn order.
    pub lights: Vec<EntityId>,
    pub pickups: Vec<PickupSpawn>,
    pub avatar: Option<EntityId>,
}

impl GeneratedWorld {
    /// Every static node id (ground, model, decor, lights). Excludes pickups and avatar.
    pub fn static_ids(&self) -> Vec<EntityId> {
        self.ground
            .iter()
            .chain(self.city_model.iter())
            .copied()
            .chain(self.decor.iter().map(|d| d.id))
            .chain(self.lights.iter().copied())
            .collect()
    }
}

/// Builds a world from a layout table into a scene.
pub struct WorldGenerator<'a, A: AssetSource + ?Sized> {
    layout: &'a SeedLayout,
    assets: &'a A,
}

impl<'a, A: AssetSource + ?Sized> WorldGenerator<'a, A> {
    pub fn new(layout: &'a SeedLayout, assets: &'a A) -> Self {
        Self { layout, assets }
    }

    /// Insert the whole world into `scene`. The avatar is placed at `spawn`.
    pub fn generate<S, R>(&self, scene: &mut S, rng: &mut R, spawn: Vec3) -> GeneratedWorld
    where
        S: Scene + ?Sized,
        R: Rng + ?Sized,
    {
        let _span = tracing::info_span!("worldgen").entered();
        let mut world = GeneratedWorld {
            ground: Some(scene.insert(self.ground())),
            ..GeneratedWorld::default()
        };

        match self.assets.load_model(CITY_MODEL) {
            Ok(model) => {
                tracing::info!(model = %model.name, "city model loaded");
                let node = SceneNode::new("city", NodeKind::Model, Transform::default())
                    .with_model(MeshHandle(model.id.0));
                world.city_model = Some(scene.insert(node));
            }
            Err(e) => {
                tracing::info!(error = %e, "city model unavailable; generating procedural city");
                self.structures(scene, rng, &mut world);
            }
        }

        self.pickups(scene, &mut world);
        self.city_lights(scene, rng, &mut world);
        world.avatar = Some(scene.insert(build_avatar(self.assets, rng, spawn)));

        tracing::info!(
            decor = world.decor.len(),
            pickups = world.pickups.len(),
            lights = world.lights.len(),
            "world generated"
        );
        world
    }

    fn ground(&self) -> SceneNode {
        let size = self.layout.ground_size;
        let plane = Primitive {
            rotation: Quat::from_rotation_x(-FRAC_PI_2),
            ..Primitive::new(
                Shape::Plane {
                    width: size,
                    height: size,
                },
                Material::lit(Color::from_hex(0x0a0a0a))
                    .with_emissive(Color::from_hex(0x1a1a1a), 0.1),
                Vec3::ZERO,
            )
        };
        let grid = Primitive::new(
            Shape::Grid {
                size,
                divisions: self.layout.grid_divisions,
            },
            Material::unlit(Color::from_hex(0x00ffff)).with_opacity(0.3),
            Vec3::new(0.0, 0.01, 0.0),
        );
        SceneNode::new("ground", NodeKind::Ground, Transform::default())
            .with_primitive(plane)
            .with_primitive(grid)
    }

    fn structures<S, R>(&self, scene: &mut S, rng: &mut R, world: &mut GeneratedWorld)
    where
        S: Scene + ?Sized,
        R: Rng + ?Sized,
    {
        for placement in &self.layout.structures {
            let name = match &placement.label {
                Some(label) => format!("{}:{label}", placement.kind.name()),
                None => placement.kind.name().to_string(),
            };
            let node = SceneNode::new(
                name,
                placement.kind.node_kind(),
                Transform::from_position(placement.position),
            )
            .with_primitives(placement.kind.build(placement.size, rng));
            world.decor.push(DecorEntity {
                id: scene.insert(node),
                kind: placement.kind,
            });
        }

        let scattered = std::iter::repeat_n(DecorKind::FlyingCar, self.layout.flying_cars)
            .chain(std::iter::repeat_n(DecorKind::Hologram, self.layout.holograms));
        for kind in scattered {
            let position = kind.scatter_position(rng);
            let node = SceneNode::new(kind.name(), kind.node_kind(), Transform::from_position(position))
                .with_primitives(kind.build(Vec3::ZERO, rng));
            world.decor.push(DecorEntity {
                id: scene.insert(node),
                kind,
            });
        }
    }

    fn pickups<S: Scene + ?Sized>(&self, scene: &mut S, world: &mut GeneratedWorld) {
        for &position in &self.layout.pickups {
            let (orb, glow) = energy_orb();
            let transform = Transform::from_position(position);
            let orb = scene.insert(
                SceneNode::new("energy_orb", NodeKind::Pickup, transform).with_primitive(orb),
            );
            let glow = scene.insert(
                SceneNode::new("energy_orb_glow", NodeKind::PickupGlow, transform)
                    .with_primitive(glow),
            );
            world.pickups.push(PickupSpawn {
                orb,
                glow,
                position,
            });
        }
    }

    fn city_lights<S, R>(&self, scene: &mut S, rng: &mut R, world: &mut GeneratedWorld)
    where
        S: Scene + ?Sized,
        R: Rng + ?Sized,
    {
        for _ in 0..self.layout.city_lights {
            let light = PointLight {
                color: Color::from_hsl(unit(rng), 0.8, 0.6),
                intensity: 1.0,
                range: 50.0,
            };
            let position = Vec3::new(
                (unit(rng) - 0.5) * 100.0,
                10.0 + unit(rng) * 20.0,
                (unit(rng) - 0.5) * 100.0,
            );
            let node = SceneNode::new("city_light", NodeKind::Light, Transform::from_position(position))
                .with_light(light);
            world.lights.push(scene.insert(node));
        }
    }
}
