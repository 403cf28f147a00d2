use glam::Vec3;
use neonrun_assets::AssetSource;
use neonrun_common::{Color, Transform};
use neonrun_scene::{AvatarAnimation, Material, MeshHandle, NodeKind, Primitive, SceneNode, Shape};
use rand::Rng;

use crate::catalog::unit;

const AVATAR_MODEL: &str = "astronaut";

/// Build the avatar node: the external astronaut model when the source has
/// it, otherwise a procedural robot rig.
pub fn build_avatar<A, R>(assets: &A, rng: &mut R, spawn: Vec3) -> SceneNode
where
    A: AssetSource + ?Sized,
    R: Rng + ?Sized,
{
    match assets.load_model(AVATAR_MODEL) {
        Ok(model) => {
            tracing::info!(model = %model.name, animations = model.animations.len(), "avatar model loaded");
            SceneNode::new(
                "avatar",
                NodeKind::Avatar,
                Transform::from_position(spawn).with_scale(Vec3::splat(0.5)),
            )
            .with_model(MeshHandle(model.id.0))
            .with_clips(model.animations)
            .with_animation(AvatarAnimation::Idle)
        }
        Err(e) => {
            tracing::info!(error = %e, "avatar model unavailable; using procedural robot");
            SceneNode::new("avatar", NodeKind::Avatar, Transform::from_position(spawn))
                .with_primitives(robot(rng))
                .with_animation(AvatarAnimation::Idle)
        }
    }
}

fn robot<R: Rng + ?Sized>(rng: &mut R) -> Vec<Primitive> {
    let hull = Material::lit(Color::from_hex(0x2d3748))
        .with_emissive(Color::from_hex(0x1a202c), 0.3);
    let plating = Material::lit(Color::from_hex(0x4a5568))
        .with_emissive(Color::from_hex(0x2d3748), 0.2);
    let cyan = Color::from_hex(0x00ffff);
    let eye = Material::lit(cyan).with_emissive(cyan, 1.0);
    let limb = Shape::Capsule {
        radius: 0.15,
        length: 0.8,
    };

    let mut parts = vec![
        Primitive::new(
            Shape::Capsule {
                radius: 0.4,
                length: 1.2,
            },
            hull,
            Vec3::new(0.0, 0.6, 0.0),
        ),
        Primitive::new(Shape::Sphere { radius: 0.3 }, plating, Vec3::new(0.0, 1.5, 0.0)),
        Primitive::new(Shape::Sphere { radius: 0.05 }, eye, Vec3::new(-0.1, 1.55, 0.2)),
        Primitive::new(Shape::Sphere { radius: 0.05 }, eye, Vec3::new(0.1, 1.55, 0.2)),
        Primitive::new(limb, plating, Vec3::new(-0.6, 0.5, 0.0)),
        Primitive::new(limb, plating, Vec3::new(0.6, 0.5, 0.0)),
        Primitive::new(limb, plating, Vec3::new(-0.2, -0.4, 0.0)),
        Primitive::new(limb, plating, Vec3::new(0.2, -0.4, 0.0)),
    ];

    let dot = Material::unlit(cyan).with_emissive(cyan, 0.8);
    for _ in 0..6 {
        let offset = Vec3::new(
            (unit(rng) - 0.5) * 0.6,
            unit(rng) * 1.2,
            (unit(rng) - 0.5) * 0.3,
        );
        parts.push(Primitive::new(Shape::Sphere { radius: 0.02 }, dot, offset));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use neonrun_assets::{DirectoryAssets, NoAssets};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn falls_back_to_robot_without_assets() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let node = build_avatar(&NoAssets, &mut rng, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(node.kind, NodeKind::Avatar);
        assert!(node.model.is_none());
        assert_eq!(node.primitives.len(), 14);
        assert_eq!(node.transform.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn uses_model_when_available() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("astronaut.gltf"),
            r#"{"asset": {"version": "2.0"}, "animations": [{"name": "Idle"}]}"#,
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let node = build_avatar(&DirectoryAssets::new(dir.path()), &mut rng, Vec3::Y);
        assert!(node.model.is_some());
        assert!(node.primitives.is_empty());
        assert_eq!(node.transform.scale, Vec3::splat(0.5));
        assert_eq!(node.clips, vec!["Idle_0".to_string()]);
        assert_eq!(node.animation, Some(AvatarAnimation::Idle));
        assert_eq!(node.active_clip(), Some("Idle_0"));
    }
}
