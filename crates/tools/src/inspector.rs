use std::time::Duration;

use glam::Vec3;
use neonrun_common::EntityId;
use neonrun_input::InputSource;
use neonrun_kernel::{Clock, LoopState, SimulationLoop, UiSink};
use neonrun_scene::Scene;

/// Read-only queries against a simulation for debugging and the CLI.
pub struct SimInspector;

impl SimInspector {
    pub fn summary<I, S, U, C>(sim: &SimulationLoop<I, S, U, C>) -> SimSummary
    where
        I: InputSource,
        S: Scene,
        U: UiSink,
        C: Clock,
    {
        let actor = sim.actor();
        SimSummary {
            tick: sim.tick_count(),
            elapsed: sim.elapsed(),
            state: sim.state(),
            score: actor.score(),
            health: actor.health(),
            position: actor.position(),
            on_ground: actor.on_ground(),
            pickups_remaining: sim.pickups().len(),
            pickups_collected: sim.pickups_collected(),
            avg_frame: sim.frame_timer().average(),
        }
    }

    /// Live pickups in registry order.
    pub fn pickups<I, S, U, C>(sim: &SimulationLoop<I, S, U, C>) -> Vec<PickupInfo>
    where
        I: InputSource,
        S: Scene,
        U: UiSink,
        C: Clock,
    {
        let actor = sim.actor().position();
        sim.pickups()
            .all()
            .iter()
            .map(|p| PickupInfo {
                id: p.id,
                index: p.index,
                position: p.position,
                distance: p.position.distance(actor),
            })
            .collect()
    }
}

/// Snapshot of simulation state.
#[derive(Debug, Clone)]
pub struct SimSummary {
    pub tick: u64,
    /// Accumulated simulation time, seconds.
    pub elapsed: f32,
    pub state: LoopState,
    pub score: u64,
    pub health: u32,
    pub position: Vec3,
    pub on_ground: bool,
    pub pickups_remaining: usize,
    pub pickups_collected: usize,
    pub avg_frame: Duration,
}

impl std::fmt::Display for SimSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sim: tick={} t={:.2}s state={:?} score={} health={} pos=({:.2}, {:.2}, {:.2}) ground={} pickups={} collected={} avg_dt={:?}",
            self.tick,
            self.elapsed,
            self.state,
            self.score,
            self.health,
            self.position.x,
            self.position.y,
            self.position.z,
            self.on_ground,
            self.pickups_remaining,
            self.pickups_collected,
            self.avg_frame,
        )
    }
}

/// One live pickup as seen from the actor.
#[derive(Debug, Clone)]
pub struct PickupInfo {
    pub id: EntityId,
    pub index: usize,
    pub position: Vec3,
    pub distance: f32,
}

impl std::fmt::Display for PickupInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pickup #{} [{}] pos=({:.2}, {:.2}, {:.2}) dist={:.2}",
            self.index,
            self.id.short(),
            self.position.x,
            self.position.y,
            self.position.z,
            self.distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neonrun_assets::NoAssets;
    use neonrun_input::NoInput;
    use neonrun_kernel::{FixedClock, GameConfig, NullUi};
    use neonrun_scene::SceneGraph;
    use neonrun_worldgen::{GeneratedWorld, PickupSpawn, SeedLayout, WorldGenerator, cosmetic_rng};

    fn sim() -> SimulationLoop<NoInput, SceneGraph, NullUi, FixedClock> {
        let config = GameConfig::default();
        let mut scene = SceneGraph::new();
        let world = WorldGenerator::new(&SeedLayout::default(), &NoAssets).generate(
            &mut scene,
            &mut cosmetic_rng(Some(1)),
            config.spawn,
        );
        SimulationLoop::new(config, world, NoInput, scene, NullUi, FixedClock::new(0.02))
    }

    #[test]
    fn summary_fresh_sim() {
        let sim = sim();
        let summary = SimInspector::summary(&sim);
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.state, LoopState::Stopped);
        assert_eq!(summary.health, 100);
        assert_eq!(summary.pickups_remaining, 5);
        assert_eq!(summary.avg_frame, Duration::ZERO);
    }

    #[test]
    fn summary_after_frames() {
        let mut sim = sim();
        sim.start();
        sim.frame();
        sim.frame();
        let summary = SimInspector::summary(&sim);
        assert_eq!(summary.tick, 2);
        assert_eq!(summary.state, LoopState::Running);
        assert!((summary.elapsed - 0.04).abs() < 1e-6);
        assert!((summary.avg_frame.as_secs_f32() - 0.02).abs() < 1e-6);
        let s = format!("{summary}");
        assert!(s.contains("tick=2"));
        assert!(s.contains("state=Running"));
    }

    #[test]
    fn collected_count_after_draining_events() {
        let world = GeneratedWorld {
            pickups: vec![PickupSpawn {
                orb: EntityId::new(),
                glow: EntityId::new(),
                position: Vec3::new(0.0, 1.0, 1.0),
            }],
            ..GeneratedWorld::default()
        };
        let mut sim = SimulationLoop::new(
            GameConfig::default(),
            world,
            NoInput,
            SceneGraph::new(),
            NullUi,
            FixedClock::new(0.02),
        );
        sim.start();
        sim.frame();
        assert!(!sim.drain_events().is_empty());

        let summary = SimInspector::summary(&sim);
        assert_eq!(summary.pickups_collected, 1);
        assert_eq!(summary.pickups_remaining, 0);
        assert!(format!("{summary}").contains("collected=1"));
    }

    #[test]
    fn pickups_listed_in_order_with_distance() {
        let sim = sim();
        let infos = SimInspector::pickups(&sim);
        assert_eq!(infos.len(), 5);
        assert_eq!(infos.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        // (0, 3, 20) from spawn (0, 1, 0)
        assert!((infos[4].distance - Vec3::new(0.0, 2.0, 20.0).length()).abs() < 1e-4);
        assert!(format!("{}", infos[0]).starts_with("Pickup #0"));
    }
}
