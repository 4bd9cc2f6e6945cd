//! Game state and core simulation types
//!
//! Everything the game remembers between frames lives in [`GameState`].

use glam::Vec3;

use super::align::{Alignment, classify};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Active cube oscillating, waiting for a drop
    #[default]
    Playing,
    /// A drop missed; the cube is falling before the automatic reset
    Falling,
}

/// A cube that landed on the stack. Never mutated after placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCube {
    /// Horizontal offset
    pub x: f32,
    /// Stack height index, also its world y
    pub layer: u32,
}

impl PlacedCube {
    /// World-space center
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.layer as f32, 0.0)
    }
}

/// Notable transitions produced by the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A cube landed
    Placed {
        layer: u32,
        x: f32,
        alignment: Alignment,
    },
    /// A drop overshot the cube below and the run is over
    Missed { layer: u32, x: f32, offset: f32 },
    /// The fall finished and the stack was cleared
    Reset { final_score: usize },
}

/// Complete game state
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Placed cubes, bottom to top
    pub(super) stack: Vec<PlacedCube>,
    pub(super) phase: GamePhase,
    /// Vertical offset of the falling cube (0 while playing)
    pub(super) fall_offset: f32,
    /// Where the missed cube was released
    pub(super) fall_x: f32,
    /// Drop key seen held on the previous frame
    pub(super) drop_latched: bool,
    /// Seconds since the simulation started (never reset)
    pub(super) elapsed: f64,
    /// Active cube x for the current frame
    pub(super) active_x: f32,
}

impl GameState {
    /// Start state: empty stack, playing, nothing latched
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::Falling
    }

    pub fn stack(&self) -> &[PlacedCube] {
        &self.stack
    }

    /// Next slot to fill. Equals the stack length, including while falling.
    pub fn current_layer(&self) -> u32 {
        self.stack.len() as u32
    }

    /// Score is the number of placed cubes
    pub fn score(&self) -> usize {
        self.stack.len()
    }

    pub fn fall_offset(&self) -> f32 {
        self.fall_offset
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn active_x(&self) -> f32 {
        self.active_x
    }

    pub fn drop_latched(&self) -> bool {
        self.drop_latched
    }

    /// x of the top cube, if any
    pub fn top_x(&self) -> Option<f32> {
        self.stack.last().map(|c| c.x)
    }

    /// Active cube center while playing
    pub fn active_cube(&self) -> Option<Vec3> {
        match self.phase {
            GamePhase::Playing => Some(Vec3::new(
                self.active_x,
                self.current_layer() as f32,
                0.0,
            )),
            GamePhase::Falling => None,
        }
    }

    /// How the active cube lines up with the top of the stack right now
    pub fn active_alignment(&self) -> Option<Alignment> {
        match self.phase {
            GamePhase::Playing => Some(classify(self.active_x, self.top_x())),
            GamePhase::Falling => None,
        }
    }

    /// Falling cube center while the run is over
    pub fn falling_cube(&self) -> Option<Vec3> {
        match self.phase {
            GamePhase::Falling => Some(Vec3::new(
                self.fall_x,
                self.current_layer() as f32 + self.fall_offset,
                0.0,
            )),
            GamePhase::Playing => None,
        }
    }

    /// Back to the start state. Elapsed time and the key latch carry over.
    pub(super) fn reset(&mut self) {
        self.stack.clear();
        self.phase = GamePhase::Playing;
        self.fall_offset = 0.0;
        self.fall_x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(!state.game_over());
        assert!(state.stack().is_empty());
        assert_eq!(state.current_layer(), 0);
        assert_eq!(state.fall_offset(), 0.0);
        assert_eq!(state.score(), 0);
        assert!(state.falling_cube().is_none());
        assert_eq!(state.active_alignment(), Some(Alignment::First));
    }

    #[test]
    fn test_placed_cube_position() {
        let cube = PlacedCube { x: -1.5, layer: 3 };
        assert_eq!(cube.position(), Vec3::new(-1.5, 3.0, 0.0));
    }

    #[test]
    fn test_reset_keeps_clock_and_latch() {
        let mut state = GameState::new();
        state.stack.push(PlacedCube { x: 0.0, layer: 0 });
        state.phase = GamePhase::Falling;
        state.fall_offset = -5.1;
        state.fall_x = 1.2;
        state.elapsed = 42.0;
        state.drop_latched = true;

        state.reset();

        assert!(state.stack().is_empty());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.fall_offset(), 0.0);
        assert_eq!(state.elapsed(), 42.0);
        assert!(state.drop_latched());
    }
}
