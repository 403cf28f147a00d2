use std::fmt::Write;

use glam::Vec3;
use neonrun_kernel::CameraTransform;
use neonrun_scene::{NodeKind, SceneGraph};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    pub fn from_camera(camera: &CameraTransform) -> Self {
        Self {
            eye: camera.position,
            target: camera.look_at,
            ..Self::default()
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. Reads a scene and a view, produces output,
/// never mutates either.
pub trait Renderer {
    type Output;

    fn render(&self, scene: &SceneGraph, view: &RenderView) -> Self::Output;
}

/// Text renderer for the headless CLI, logs, and tests.
///
/// Static geometry is summarized by kind; moving nodes (avatar and pickups)
/// are listed with positions.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

const KINDS: [(NodeKind, &str); 8] = [
    (NodeKind::Ground, "ground"),
    (NodeKind::Model, "model"),
    (NodeKind::Structure, "structure"),
    (NodeKind::Vehicle, "vehicle"),
    (NodeKind::Light, "light"),
    (NodeKind::Pickup, "pickup"),
    (NodeKind::PickupGlow, "glow"),
    (NodeKind::Avatar, "avatar"),
];

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &SceneGraph, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (nodes={}, primitives={}) ===",
            scene.len(),
            scene.primitive_count()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        );

        let counts: Vec<String> = KINDS
            .iter()
            .map(|(kind, label)| (scene.count_kind(*kind), label))
            .filter(|(n, _)| *n > 0)
            .map(|(n, label)| format!("{label}={n}"))
            .collect();
        let _ = writeln!(out, "Kinds: {}", counts.join(" "));

        for node in scene
            .nodes()
            .filter(|n| matches!(n.kind, NodeKind::Avatar | NodeKind::Pickup))
        {
            let p = node.transform.position;
            let _ = writeln!(
                out,
                "  [{}] {} pos=({:.2}, {:.2}, {:.2})",
                node.id.short(),
                node.name,
                p.x,
                p.y,
                p.z
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neonrun_common::Transform;
    use neonrun_scene::{Scene, SceneNode};

    #[test]
    fn empty_scene() {
        let output = DebugTextRenderer::new().render(&SceneGraph::new(), &RenderView::default());
        assert!(output.contains("nodes=0"));
        assert!(output.contains("fov=75"));
    }

    #[test]
    fn lists_moving_nodes_and_counts_kinds() {
        let mut scene = SceneGraph::new();
        scene.insert(SceneNode::new("ground", NodeKind::Ground, Transform::default()));
        scene.insert(SceneNode::new(
            "avatar",
            NodeKind::Avatar,
            Transform::from_position(Vec3::new(1.0, 2.0, 3.0)),
        ));

        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());
        assert!(output.contains("ground=1 "));
        assert!(output.contains("avatar=1"));
        assert!(output.contains("avatar pos=(1.00, 2.00, 3.00)"));
        assert!(!output.contains("ground pos="));
    }

    #[test]
    fn view_from_camera() {
        let cam = CameraTransform {
            position: Vec3::new(0.0, 4.0, 8.0),
            look_at: Vec3::new(0.0, 1.0, 0.0),
        };
        let view = RenderView::from_camera(&cam);
        assert_eq!(view.eye, cam.position);
        assert_eq!(view.target, cam.look_at);
    }
}
