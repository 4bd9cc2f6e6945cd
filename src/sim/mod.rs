//! Game simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Active cube position is a pure function of elapsed time
//! - Drop input arrives as a key level and is edge-detected here
//! - The fall animation advances a fixed step per frame

pub mod align;
pub mod state;
pub mod tick;

pub use align::{Alignment, classify};
pub use state::{GameEvent, GamePhase, GameState, PlacedCube};
pub use tick::{TickInput, oscillation_x, tick};
