use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::catalog::DecorKind;

/// One fixed structure in the layout table.
///
/// `position` is the footprint center on the ground (signs use it as their
/// hanging point). `size` is width/height/depth; cylinders read x as diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: DecorKind,
    pub position: Vec3,
    pub size: Vec3,
    #[serde(default)]
    pub label: Option<String>,
}

impl Placement {
    pub fn new(kind: DecorKind, position: Vec3, size: Vec3) -> Self {
        Self {
            kind,
            position,
            size,
            label: None,
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The world layout table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedLayout {
    pub ground_size: f32,
    pub grid_divisions: u32,
    pub structures: Vec<Placement>,
    pub pickups: Vec<Vec3>,
    /// Props placed at random positions.
    pub flying_cars: usize,
    pub holograms: usize,
    pub city_lights: usize,
}

impl Default for SeedLayout {
    fn default() -> Self {
        use DecorKind::*;

        let building = |x: f32, z: f32, w: f32, h: f32| {
            Placement::new(Building, Vec3::new(x, 0.0, z), Vec3::new(w, h, w))
        };
        let tower = |x: f32, z: f32, diameter: f32, h: f32| {
            Placement::new(Tower, Vec3::new(x, 0.0, z), Vec3::new(diameter, h, diameter))
        };
        let container =
            |x: f32, z: f32| Placement::new(Container, Vec3::new(x, 0.0, z), Vec3::splat(2.0));
        let sign = |x: f32, y: f32, z: f32, text: &str| {
            Placement::new(Sign, Vec3::new(x, y, z), Vec3::new(4.0, 1.0, 0.0)).labelled(text)
        };

        Self {
            ground_size: 200.0,
            grid_divisions: 100,
            structures: vec![
                building(20.0, 10.0, 8.0, 30.0),
                building(-15.0, -8.0, 6.0, 24.0),
                building(30.0, -20.0, 10.0, 36.0),
                building(-25.0, 15.0, 5.0, 20.0),
                building(10.0, -30.0, 12.0, 40.0),
                building(-35.0, -10.0, 7.0, 28.0),
                building(40.0, 25.0, 9.0, 32.0),
                building(-10.0, 35.0, 11.0, 44.0),
                tower(-45.0, -30.0, 3.0, 18.0),
                tower(48.0, -5.0, 4.0, 22.0),
                tower(-5.0, -45.0, 2.4, 14.0),
                tower(25.0, 40.0, 3.6, 16.0),
                container(10.0, 5.0),
                container(-8.0, -3.0),
                container(15.0, -10.0),
                container(-12.0, 8.0),
                container(5.0, -15.0),
                sign(15.0, 8.0, 5.0, "CYBER"),
                sign(-12.0, 6.0, -3.0, "PUNK"),
                sign(25.0, 10.0, -15.0, "FUTURE"),
                sign(-20.0, 7.0, 12.0, "TECH"),
            ],
            pickups: vec![
                Vec3::new(10.0, 3.0, 10.0),
                Vec3::new(-8.0, 3.0, -8.0),
                Vec3::new(15.0, 3.0, -15.0),
                Vec3::new(-12.0, 3.0, 12.0),
                Vec3::new(0.0, 3.0, 20.0),
            ],
            flying_cars: 5,
            holograms: 3,
            city_lights: 20,
        }
    }
}

impl SeedLayout {
    /// A layout with nothing but ground.
    pub fn empty() -> Self {
        Self {
            structures: Vec::new(),
            pickups: Vec::new(),
            flying_cars: 0,
            holograms: 0,
            city_lights: 0,
            ..Self::default()
        }
    }

    pub fn count(&self, kind: DecorKind) -> usize {
        self.structures.iter().filter(|p| p.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_contents() {
        let layout = SeedLayout::default();
        assert_eq!(layout.count(DecorKind::Building), 8);
        assert_eq!(layout.count(DecorKind::Tower), 4);
        assert_eq!(layout.count(DecorKind::Container), 5);
        assert_eq!(layout.count(DecorKind::Sign), 4);
        assert_eq!(layout.pickups.len(), 5);
        assert_eq!(layout.city_lights, 20);
    }

    #[test]
    fn signs_carry_labels() {
        let layout = SeedLayout::default();
        let labels: Vec<_> = layout
            .structures
            .iter()
            .filter(|p| p.kind == DecorKind::Sign)
            .filter_map(|p| p.label.as_deref())
            .collect();
        assert_eq!(labels, vec!["CYBER", "PUNK", "FUTURE", "TECH"]);
    }

    #[test]
    fn empty_layout_keeps_ground() {
        let layout = SeedLayout::empty();
        assert!(layout.structures.is_empty());
        assert_eq!(layout.ground_size, 200.0);
    }
}
