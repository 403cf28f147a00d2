use glam::{Quat, Vec3};
use neonrun_common::{Color, EntityId, Transform};
use serde::{Deserialize, Serialize};

/// A handle referencing an externally loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Geometry catalog. Sizes are full extents, not half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Box { size: Vec3 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32 },
    Sphere { radius: f32 },
    Capsule { radius: f32, length: f32 },
    Plane { width: f32, height: f32 },
    Grid { size: f32, divisions: u32 },
}

/// Surface description for a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub emissive: Option<Color>,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub wireframe: bool,
    /// Unlit materials ignore scene lighting (neon, glow, windows).
    pub unlit: bool,
}

impl Material {
    pub fn lit(color: Color) -> Self {
        Self {
            color,
            emissive: None,
            emissive_intensity: 0.0,
            opacity: 1.0,
            wireframe: false,
            unlit: false,
        }
    }

    pub fn unlit(color: Color) -> Self {
        Self {
            unlit: true,
            ..Self::lit(color)
        }
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = Some(emissive);
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// One shape with a material, placed relative to its node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
    pub offset: Vec3,
    pub rotation: Quat,
}

impl Primitive {
    pub fn new(shape: Shape, material: Material, offset: Vec3) -> Self {
        Self {
            shape,
            material,
            offset,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn rotated_y(mut self, yaw: f32) -> Self {
        self.rotation = Quat::from_rotation_y(yaw);
        self
    }
}

/// Point light attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

/// Coarse classification, used for counting and for debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    Ground,
    Structure,
    Vehicle,
    Light,
    Pickup,
    PickupGlow,
    Avatar,
    Model,
}

/// Animation clip the avatar should be playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvatarAnimation {
    Idle,
    Walk,
    Jump,
}

impl AvatarAnimation {
    pub fn name(self) -> &'static str {
        match self {
            AvatarAnimation::Idle => "idle",
            AvatarAnimation::Walk => "walk",
            AvatarAnimation::Jump => "jump",
        }
    }

    /// First clip whose name contains this animation's name, ignoring case.
    pub fn find_clip(self, clips: &[String]) -> Option<&str> {
        clips
            .iter()
            .find(|clip| clip.to_ascii_lowercase().contains(self.name()))
            .map(String::as_str)
    }
}

/// A compound scene entity: a transform plus the primitives hung off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: EntityId,
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub primitives: Vec<Primitive>,
    pub light: Option<PointLight>,
    pub model: Option<MeshHandle>,
    /// Clip names available on `model`.
    #[serde(default)]
    pub clips: Vec<String>,
    #[serde(default)]
    pub animation: Option<AvatarAnimation>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind, transform: Transform) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            kind,
            transform,
            primitives: Vec::new(),
            light: None,
            model: None,
            clips: Vec::new(),
            animation: None,
        }
    }

    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    pub fn with_primitives(mut self, primitives: impl IntoIterator<Item = Primitive>) -> Self {
        self.primitives.extend(primitives);
        self
    }

    pub fn with_light(mut self, light: PointLight) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_model(mut self, model: MeshHandle) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_clips(mut self, clips: impl IntoIterator<Item = String>) -> Self {
        self.clips.extend(clips);
        self
    }

    pub fn with_animation(mut self, animation: AvatarAnimation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// The model clip backing the current animation, if the model has one.
    pub fn active_clip(&self) -> Option<&str> {
        self.animation?.find_clip(&self.clips)
    }
}

/// Animation writes pushed into the scene each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeUpdate {
    Transform(Transform),
    /// Position and rotation only; the node keeps its scale.
    Pose { position: Vec3, rotation: Quat },
    LightIntensity(f32),
    Animation(AvatarAnimation),
}

impl NodeUpdate {
    /// Pose at `position` rotated `yaw` radians about +Y.
    pub fn pose_yaw(position: Vec3, yaw: f32) -> Self {
        NodeUpdate::Pose {
            position,
            rotation: Quat::from_rotation_y(yaw),
        }
    }
}
