//! Simulation kernel: the per-frame update pipeline.
//!
//! Each tick pulls an input snapshot, advances the character controller,
//! resolves pickups against the actor's new position, animates decor,
//! moves the follow camera, and reports score/health to the UI.
//!
//! # Invariants
//! - Ticks run strictly in sequence; pickup resolution always sees the
//!   post-movement actor position.
//! - Health and score change only through [`Actor`] operations and saturate
//!   instead of failing.
//! - Nothing in a tick can fail. Collaborators are write-only sinks.
//! - Friction and camera smoothing are per-tick factors, not time-normalized:
//!   results depend on frame rate.

pub mod actor;
pub mod animate;
pub mod camera;
pub mod clock;
pub mod config;
pub mod controller;
pub mod events;
pub mod pickup;
pub mod sim;

pub use actor::{Actor, MAX_HEALTH};
pub use animate::{AnimationConfig, AvatarAnimator, DecorAnimator};
pub use camera::{CameraConfig, CameraFollow, CameraTransform};
pub use clock::{Clock, FixedClock, FrameTimer, SystemClock};
pub use config::{ConfigError, GameConfig};
pub use controller::{CharacterController, MotionReport, MovementConfig};
pub use events::SimEvent;
pub use pickup::{Pickup, PickupKind, PickupRegistry, PickupRules};
pub use sim::{EVENT_LOG_CAPACITY, LoopState, NullUi, SimulationLoop, UiSink};
