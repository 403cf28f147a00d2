//! Input: turns raw key/mouse/touch events into one normalized snapshot per tick.
//!
//! # Invariants
//! - The simulation only ever sees [`InputSnapshot`], never raw events.
//! - Mouse deltas are drained on every read; they never persist across ticks.
//! - Platform quirks come from an injected [`Platform`], not ambient globals.

pub mod action;
pub mod collector;
pub mod platform;
pub mod script;
pub mod snapshot;

pub use action::{Action, KeyBindings};
pub use collector::InputCollector;
pub use platform::{HeadlessPlatform, Platform};
pub use script::{ScriptError, ScriptedInput};
pub use snapshot::InputSnapshot;

/// Anything that can produce the per-tick input snapshot.
pub trait InputSource {
    /// Read the current state. Accumulated mouse deltas are reset by this call.
    fn snapshot(&mut self) -> InputSnapshot;
}

/// A source that always reports no input.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot::default()
    }
}
