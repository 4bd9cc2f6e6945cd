//! Per-frame simulation step
//!
//! The frame orchestrator interleaves drawing between these steps, so each
//! one is exposed on its own; [`tick`] runs them all in frame order.

use super::align::classify;
use super::state::{GameEvent, GamePhase, GameState, PlacedCube};
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Seconds since the simulation started
    pub time: f64,
    /// Drop key level (held or not); edges are detected by the latch
    pub drop_held: bool,
}

/// Active cube x at `elapsed` seconds since the simulation started
#[inline]
pub fn oscillation_x(elapsed: f64) -> f32 {
    ((elapsed * OSCILLATION_SPEED as f64).sin() * OSCILLATION_RANGE as f64) as f32
}

impl GameState {
    /// Record the frame time and move the active cube
    pub fn advance_clock(&mut self, time: f64) {
        self.elapsed = time;
        if self.phase == GamePhase::Playing {
            self.active_x = oscillation_x(time);
        }
    }

    /// Feed the drop key level; drops the active cube on a rising edge.
    ///
    /// Presses while falling are latched but otherwise ignored.
    pub fn apply_drop(&mut self, drop_held: bool) -> Option<GameEvent> {
        let rising = drop_held && !self.drop_latched;
        self.drop_latched = drop_held;
        if !rising {
            return None;
        }
        self.drop_cube(self.active_x)
    }

    /// Release the active cube at `x`
    pub fn drop_cube(&mut self, x: f32) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        let layer = self.current_layer();
        let alignment = classify(x, self.top_x());
        if !alignment.is_hit() {
            let offset = self.top_x().map_or(0.0, |top| (x - top).abs());
            self.phase = GamePhase::Falling;
            self.fall_offset = 0.0;
            self.fall_x = x;
            return Some(GameEvent::Missed { layer, x, offset });
        }

        self.stack.push(PlacedCube { x, layer });
        Some(GameEvent::Placed { layer, x, alignment })
    }

    /// Move the falling cube down one fixed step
    pub fn advance_fall(&mut self) {
        if self.phase == GamePhase::Falling {
            self.fall_offset -= FALL_STEP;
        }
    }

    /// Reset once the falling cube has dropped far enough
    pub fn finish_fall(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Falling || self.fall_offset >= FALL_RESET_OFFSET {
            return None;
        }
        let final_score = self.score();
        self.reset();
        Some(GameEvent::Reset { final_score })
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.advance_clock(input.time);
    events.extend(state.apply_drop(input.drop_held));
    state.advance_fall();
    events.extend(state.finish_fall());

    events
}
