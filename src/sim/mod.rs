//! Deterministic castle-defense simulation
//!
//! Fixed-timestep core: build a [`GameState`] from a seed and a
//! [`crate::tuning::Tuning`], then drive it with [`tick`] and a [`TickInput`]
//! per step. Rendering, audio, and input decoding live with the caller; the
//! simulation only exposes [`GameState::drawables`] and the per-tick
//! [`state::FeedbackEvent`] list.

pub mod actors;
pub mod ballistics;
pub mod combat;
pub mod spawner;
pub mod state;
pub mod tick;

pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
