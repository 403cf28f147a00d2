use std::f32::consts::{FRAC_PI_4, PI};

use glam::Vec3;
use neonrun_common::Color;
use neonrun_scene::{Material, NodeKind, Primitive, Shape};
use rand::Rng;
use serde::{Deserialize, Serialize};

const CYAN: u32 = 0x00ffff;
const NEON_PINK: u32 = 0xff0080;

/// Decor variants. Each maps to a construction function returning the
/// primitives of one compound entity, relative to its placement point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorKind {
    Building,
    Tower,
    Container,
    Sign,
    FlyingCar,
    Hologram,
}

impl DecorKind {
    pub fn build<R: Rng + ?Sized>(self, size: Vec3, rng: &mut R) -> Vec<Primitive> {
        match self {
            DecorKind::Building => building(size, rng),
            DecorKind::Tower => tower(size, rng),
            DecorKind::Container => container(size),
            DecorKind::Sign => sign(size),
            DecorKind::FlyingCar => flying_car(rng),
            DecorKind::Hologram => hologram(),
        }
    }

    pub fn node_kind(self) -> NodeKind {
        match self {
            DecorKind::FlyingCar => NodeKind::Vehicle,
            _ => NodeKind::Structure,
        }
    }

    /// Position for props that are scattered rather than placed from the table.
    pub fn scatter_position<R: Rng + ?Sized>(self, rng: &mut R) -> Vec3 {
        match self {
            DecorKind::FlyingCar => Vec3::new(
                (unit(rng) - 0.5) * 100.0,
                20.0 + unit(rng) * 30.0,
                (unit(rng) - 0.5) * 100.0,
            ),
            DecorKind::Hologram => {
                Vec3::new((unit(rng) - 0.5) * 80.0, 4.0, (unit(rng) - 0.5) * 80.0)
            }
            _ => Vec3::ZERO,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DecorKind::Building => "building",
            DecorKind::Tower => "tower",
            DecorKind::Container => "container",
            DecorKind::Sign => "sign",
            DecorKind::FlyingCar => "flying_car",
            DecorKind::Hologram => "hologram",
        }
    }
}

pub(crate) fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>()
}

/// Box skyscraper with a lit window grid, neon corner strips, and maybe an antenna.
fn building<R: Rng + ?Sized>(size: Vec3, rng: &mut R) -> Vec<Primitive> {
    let (w, h, d) = (size.x, size.y, size.z);
    let mut out = Vec::new();

    let body = Material::lit(Color::from_hsl(0.6, 0.3, 0.1 + unit(rng) * 0.2))
        .with_emissive(Color::from_hsl(0.6, 0.2, 0.05), 0.1);
    out.push(Primitive::new(
        Shape::Box { size },
        body,
        Vec3::new(0.0, h / 2.0, 0.0),
    ));

    let window = Material::unlit(Color::from_hex(CYAN)).with_opacity(0.7);
    let pane = Shape::Plane {
        width: 0.5,
        height: 1.0,
    };
    let rows = (h / 2.0).floor() as u32;
    let cols = (w / 1.5).floor() as u32;
    for row in 0..rows {
        for col in 0..cols {
            if unit(rng) <= 0.3 {
                continue;
            }
            let x = (col as f32 - cols as f32 / 2.0) * 1.5;
            let y = row as f32 * 2.0 + 1.0;
            out.push(Primitive::new(pane, window, Vec3::new(x, y, d / 2.0 + 0.01)));
            out.push(
                Primitive::new(pane, window, Vec3::new(x, y, -d / 2.0 - 0.01)).rotated_y(PI),
            );
        }
    }

    let neon = Material::unlit(Color::from_hsl(unit(rng), 1.0, 0.5));
    let strip = Shape::Box {
        size: Vec3::new(0.1, h, 0.1),
    };
    for (sx, sz) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
        out.push(Primitive::new(
            strip,
            neon,
            Vec3::new(sx * (w / 2.0 + 0.1), h / 2.0, sz * (d / 2.0 + 0.1)),
        ));
    }

    if unit(rng) > 0.5 {
        out.push(Primitive::new(
            Shape::Cylinder {
                radius_top: 0.1,
                radius_bottom: 0.1,
                height: 5.0,
            },
            Material::lit(Color::from_hex(0x666666)),
            Vec3::new(0.0, h + 2.5, 0.0),
        ));
        out.push(Primitive::new(
            Shape::Sphere { radius: 0.2 },
            Material::unlit(Color::from_hex(CYAN)),
            Vec3::new(0.0, h + 5.0, 0.0),
        ));
    }

    out
}

/// Cylinder column with a glowing sphere cap.
fn tower<R: Rng + ?Sized>(size: Vec3, rng: &mut R) -> Vec<Primitive> {
    let radius = size.x / 2.0;
    let h = size.y;
    vec![
        Primitive::new(
            Shape::Cylinder {
                radius_top: radius,
                radius_bottom: radius,
                height: h,
            },
            Material::lit(Color::from_hsl(0.6, 0.25, 0.12 + unit(rng) * 0.1)),
            Vec3::new(0.0, h / 2.0, 0.0),
        ),
        Primitive::new(
            Shape::Sphere {
                radius: radius * 0.6,
            },
            Material::unlit(Color::from_hsl(unit(rng), 1.0, 0.5)),
            Vec3::new(0.0, h, 0.0),
        ),
    ]
}

fn container(size: Vec3) -> Vec<Primitive> {
    vec![Primitive::new(
        Shape::Box { size },
        Material::lit(Color::from_hex(0x8b4513)),
        Vec3::new(0.0, size.y / 2.0, 0.0),
    )]
}

fn sign(size: Vec3) -> Vec<Primitive> {
    vec![
        Primitive::new(
            Shape::Plane {
                width: size.x,
                height: size.y,
            },
            Material::unlit(Color::from_hex(NEON_PINK)).with_opacity(0.8),
            Vec3::ZERO,
        )
        .rotated_y(FRAC_PI_4),
    ]
}

fn flying_car<R: Rng + ?Sized>(rng: &mut R) -> Vec<Primitive> {
    let body = Material::lit(Color::from_hsl(unit(rng), 0.8, 0.5))
        .with_emissive(Color::from_hsl(unit(rng), 0.8, 0.3), 0.3);
    vec![Primitive::new(
        Shape::Box {
            size: Vec3::new(2.0, 0.5, 4.0),
        },
        body,
        Vec3::ZERO,
    )]
}

fn hologram() -> Vec<Primitive> {
    vec![Primitive::new(
        Shape::Cylinder {
            radius_top: 2.0,
            radius_bottom: 2.0,
            height: 8.0,
        },
        Material::unlit(Color::from_hex(CYAN))
            .with_opacity(0.3)
            .wireframe(),
        Vec3::ZERO,
    )]
}

/// Energy orb: the collectible inner sphere and its translucent glow shell.
pub fn energy_orb() -> (Primitive, Primitive) {
    let cyan = Color::from_hex(CYAN);
    let orb = Primitive::new(
        Shape::Sphere { radius: 0.5 },
        Material::lit(cyan).with_emissive(cyan, 0.8),
        Vec3::ZERO,
    );
    let glow = Primitive::new(
        Shape::Sphere { radius: 0.8 },
        Material::unlit(cyan).with_opacity(0.3),
        Vec3::ZERO,
    );
    (orb, glow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn building_has_body_and_four_neon_strips() {
        let prims = DecorKind::Building.build(Vec3::new(8.0, 30.0, 8.0), &mut rng());
        assert!(matches!(prims[0].shape, Shape::Box { size } if size == Vec3::new(8.0, 30.0, 8.0)));
        assert_eq!(prims[0].offset.y, 15.0);
        let strips = prims
            .iter()
            .filter(|p| matches!(p.shape, Shape::Box { size } if size.x == 0.1))
            .count();
        assert_eq!(strips, 4);
    }

    #[test]
    fn building_windows_come_in_front_back_pairs_within_grid() {
        let prims = DecorKind::Building.build(Vec3::new(8.0, 30.0, 8.0), &mut rng());
        let windows = prims
            .iter()
            .filter(|p| matches!(p.shape, Shape::Plane { .. }))
            .count();
        // 15 rows x 5 cols, each lit window is mirrored on the back face
        assert_eq!(windows % 2, 0);
        assert!(windows <= 2 * 15 * 5);
    }

    #[test]
    fn antenna_is_cylinder_plus_cap_or_absent() {
        for seed in 0..16 {
            let mut r = ChaCha8Rng::seed_from_u64(seed);
            let prims = DecorKind::Building.build(Vec3::new(5.0, 20.0, 5.0), &mut r);
            let cylinders = prims
                .iter()
                .filter(|p| matches!(p.shape, Shape::Cylinder { .. }))
                .count();
            let caps = prims
                .iter()
                .filter(|p| matches!(p.shape, Shape::Sphere { .. }))
                .count();
            assert_eq!(cylinders, caps);
            assert!(cylinders <= 1);
        }
    }

    #[test]
    fn tower_cap_sits_on_top() {
        let prims = DecorKind::Tower.build(Vec3::new(3.0, 18.0, 3.0), &mut rng());
        assert_eq!(prims.len(), 2);
        assert_eq!(prims[1].offset.y, 18.0);
    }

    #[test]
    fn container_rests_on_ground() {
        let prims = DecorKind::Container.build(Vec3::splat(2.0), &mut rng());
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].offset.y, 1.0);
    }

    #[test]
    fn scatter_positions_stay_in_bounds() {
        let mut r = rng();
        for _ in 0..100 {
            let car = DecorKind::FlyingCar.scatter_position(&mut r);
            assert!(car.x.abs() <= 50.0 && car.z.abs() <= 50.0);
            assert!((20.0..50.0).contains(&car.y));
            let holo = DecorKind::Hologram.scatter_position(&mut r);
            assert!(holo.x.abs() <= 40.0 && holo.z.abs() <= 40.0);
            assert_eq!(holo.y, 4.0);
        }
    }

    #[test]
    fn orb_glow_is_larger_and_translucent() {
        let (orb, glow) = energy_orb();
        assert!(matches!(orb.shape, Shape::Sphere { radius } if radius == 0.5));
        assert!(matches!(glow.shape, Shape::Sphere { radius } if radius == 0.8));
        assert!(glow.material.is_transparent());
        assert!(!orb.material.is_transparent());
    }
}
