//! Castle-archer simulation core
//!
//! A deterministic, fixed-timestep 2D defense game: a lone archer and a
//! castle-mounted ballista hold a wall against escalating waves of swordsmen,
//! archers, and brutes. The crate is the headless core; a frontend supplies
//! input, calls [`sim::tick`] at [`consts::SIM_DT`], and draws whatever
//! [`sim::GameState::drawables`] returns.

pub mod highscores;
pub mod sim;
pub mod tuning;

/// Timestep constants shared by every frontend.
pub mod consts {
    /// Fixed simulation timestep, seconds.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Most catch-up steps a single frame may run before time is dropped.
    pub const MAX_SUBSTEPS: u32 = 3;
}
