//! Presentation adapters: the score/health HUD and a text frame renderer.
//!
//! # Invariants
//! - Nothing here mutates simulation state; the HUD is a [`UiSink`] and the
//!   renderer only reads a scene and a view.
//! - HUD updates never fail.
//!
//! # Workaround
//! Frames are rendered as text. The [`Renderer`] trait is the seam for a GPU
//! backend; consumers do not change when one is added.
//!
//! [`UiSink`]: neonrun_kernel::UiSink

mod hud;
mod renderer;

pub use hud::{HealthBar, HealthTier, TextHud};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
