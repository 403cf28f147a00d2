use std::time::Duration;

use glam::Vec3;
use neonrun_common::EntityId;
use neonrun_input::InputSource;
use neonrun_scene::{AvatarAnimation, NodeUpdate, Scene};
use neonrun_worldgen::GeneratedWorld;

use crate::actor::Actor;
use crate::animate::{AvatarAnimator, DecorAnimator};
use crate::camera::{CameraFollow, CameraTransform};
use crate::clock::{Clock, FrameTimer};
use crate::config::GameConfig;
use crate::controller::{CharacterController, move_intent};
use crate::events::SimEvent;
use crate::pickup::PickupRegistry;

/// Most events kept between drains. When full, the oldest half is dropped.
pub const EVENT_LOG_CAPACITY: usize = 4096;

/// Write-only HUD surface, updated once per tick.
pub trait UiSink {
    fn update_score(&mut self, score: u64);
    fn update_health(&mut self, health: u32);
}

/// Discards all UI updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUi;

impl UiSink for NullUi {
    fn update_score(&mut self, _score: u64) {}
    fn update_health(&mut self, _health: u32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Owns the actor, the pickups, and every collaborator, and runs ticks.
///
/// [`frame`](Self::frame) is the host's per-frame callback: it only ticks
/// while running. [`tick`](Self::tick) steps unconditionally with an
/// explicit `dt`, for headless stepping.
pub struct SimulationLoop<I, S, U, C>
where
    I: InputSource,
    S: Scene,
    U: UiSink,
    C: Clock,
{
    config: GameConfig,
    state: LoopState,
    controller: CharacterController,
    pickups: PickupRegistry,
    animator: DecorAnimator,
    clips: AvatarAnimator,
    camera: CameraFollow,
    camera_transform: CameraTransform,
    input: I,
    scene: S,
    ui: U,
    clock: C,
    avatar: Option<EntityId>,
    static_nodes: Vec<EntityId>,
    elapsed: f32,
    tick: u64,
    pickups_collected: usize,
    shoot_held: bool,
    disposed: bool,
    frame_timer: FrameTimer,
    events: Vec<SimEvent>,
}

impl<I, S, U, C> SimulationLoop<I, S, U, C>
where
    I: InputSource,
    S: Scene,
    U: UiSink,
    C: Clock,
{
    /// Take ownership of a generated world. `scene` must be the scene the
    /// world was generated into.
    pub fn new(config: GameConfig, world: GeneratedWorld, input: I, scene: S, ui: U, clock: C) -> Self {
        let static_nodes = world.static_ids();
        let camera = CameraFollow::new(&config.camera);
        let camera_transform = camera.transform();
        Self {
            controller: CharacterController::new(config.spawn, config.movement),
            pickups: PickupRegistry::from_spawns(&world.pickups),
            animator: DecorAnimator::new(config.animation, world.lights),
            clips: AvatarAnimator::new(),
            camera,
            camera_transform,
            config,
            state: LoopState::Stopped,
            input,
            scene,
            ui,
            clock,
            avatar: world.avatar,
            static_nodes,
            elapsed: 0.0,
            tick: 0,
            pickups_collected: 0,
            shoot_held: false,
            disposed: false,
            frame_timer: FrameTimer::default(),
            events: Vec::new(),
        }
    }

    /// Stopped → Running. No-op while running or after dispose.
    pub fn start(&mut self) {
        if self.disposed {
            tracing::warn!("start ignored: simulation disposed");
            return;
        }
        if self.state == LoopState::Running {
            return;
        }
        self.clock.reset();
        self.state = LoopState::Running;
        self.record(SimEvent::Started { tick: self.tick });
        tracing::info!(tick = self.tick, "simulation started");
    }

    /// Running → Stopped. No-op while stopped.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        self.record(SimEvent::Stopped { tick: self.tick });
        tracing::info!(tick = self.tick, "simulation stopped");
    }

    /// Stop and remove every owned node from the scene. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.stop();
        let mut removed = 0usize;
        for pickup in self.pickups.drain() {
            removed += self.scene.remove(pickup.id) as usize;
            if let Some(glow) = pickup.glow {
                removed += self.scene.remove(glow) as usize;
            }
        }
        for id in self.static_nodes.drain(..).chain(self.avatar.take()) {
            removed += self.scene.remove(id) as usize;
        }
        self.disposed = true;
        self.record(SimEvent::Disposed { tick: self.tick });
        tracing::info!(removed, "simulation disposed");
    }

    /// Per-frame host callback. Ticks with the clock's delta only while
    /// running; returns whether a tick ran.
    pub fn frame(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        let dt = self.clock.delta();
        self.tick(dt);
        true
    }

    /// Run one tick with an explicit `dt` in seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.disposed {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.tick += 1;
        let tick = self.tick;
        let _span = tracing::trace_span!("tick", tick).entered();

        let input = self.input.snapshot();

        let motion = self.controller.advance(dt, &input);
        let position = self.controller.actor().position();
        if motion.jumped {
            self.record(SimEvent::Jumped { tick, position });
        }
        if motion.landed {
            self.record(SimEvent::Landed { tick, position });
        }

        let moving = move_intent(&input) != Vec3::ZERO;
        if let Some(animation) = self.clips.select(moving, motion.jumped) {
            if let Some(avatar) = self.avatar {
                self.scene.apply(avatar, NodeUpdate::Animation(animation));
            }
            self.record(SimEvent::AnimationChanged { tick, animation });
            tracing::debug!(tick, clip = animation.name(), "avatar animation");
        }

        self.resolve_pickups(tick);

        if input.shoot && !self.shoot_held {
            let score = self
                .controller
                .actor_mut()
                .add_score(self.config.pickups.shoot_reward);
            self.record(SimEvent::Shot { tick, score });
            tracing::debug!(tick, score, "shot");
        }
        self.shoot_held = input.shoot;

        self.elapsed += dt;
        self.animator
            .animate(self.elapsed, &mut self.pickups, &mut self.scene);

        let actor = self.controller.actor();
        if let Some(avatar) = self.avatar {
            self.scene
                .apply(avatar, NodeUpdate::pose_yaw(actor.position(), actor.facing_yaw()));
        }

        self.camera_transform = self.camera.update(actor.position());

        self.ui.update_score(actor.score());
        self.ui.update_health(actor.health());

        tracing::trace!(
            dt,
            x = actor.position().x,
            y = actor.position().y,
            z = actor.position().z,
            score = actor.score(),
            pickups = self.pickups.len(),
            "tick complete"
        );

        self.frame_timer
            .record(Duration::try_from_secs_f32(dt).unwrap_or(Duration::ZERO));
    }

    fn resolve_pickups(&mut self, tick: u64) {
        let rules = self.config.pickups;
        let position = self.controller.actor().position();
        for id in self.pickups.query_near(position, rules.radius) {
            let Some(pickup) = self.pickups.remove(id) else {
                continue;
            };
            let actor = self.controller.actor_mut();
            let score = actor.add_score(rules.score_reward);
            let health = actor.heal(rules.heal_reward);
            self.pickups_collected += 1;
            self.scene.remove(pickup.id);
            if let Some(glow) = pickup.glow {
                self.scene.remove(glow);
            }
            self.record(SimEvent::PickupCollected {
                tick,
                id,
                score,
                health,
            });
            tracing::info!(tick, %id, score, health, "pickup collected");
        }
    }

    fn record(&mut self, event: SimEvent) {
        if self.events.len() >= EVENT_LOG_CAPACITY {
            let dropped = EVENT_LOG_CAPACITY / 2;
            self.events.drain(..dropped);
            tracing::warn!(dropped, "event log full; oldest events dropped");
        }
        self.events.push(event);
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn actor(&self) -> &Actor {
        self.controller.actor()
    }

    /// Direct access for gameplay effects outside the tick (e.g. damage).
    pub fn actor_mut(&mut self) -> &mut Actor {
        self.controller.actor_mut()
    }

    pub fn pickups(&self) -> &PickupRegistry {
        &self.pickups
    }

    pub fn camera_transform(&self) -> CameraTransform {
        self.camera_transform
    }

    /// Accumulated simulation time, seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Pickups collected since creation. Unaffected by draining events.
    pub fn pickups_collected(&self) -> usize {
        self.pickups_collected
    }

    /// Clip the avatar is currently playing.
    pub fn avatar_animation(&self) -> AvatarAnimation {
        self.clips.current()
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Events since the last drain, oldest first. Hosts should drain
    /// regularly; past [`EVENT_LOG_CAPACITY`] the oldest half is discarded.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn frame_timer(&self) -> &FrameTimer {
        &self.frame_timer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
