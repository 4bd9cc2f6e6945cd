//! One frame of the game: simulate and draw in a fixed order

use glam::Mat4;

use crate::consts::WINDOW_TITLE;
use crate::hud;
use crate::renderer::{CubeRenderer, StackCamera, colors};
use crate::sim::{GameEvent, GameState, TickInput};

/// Per-frame presentation options
#[derive(Debug, Clone, Copy)]
pub struct FrameOptions {
    /// Window size in pixels, for the overlay projection
    pub viewport: (u32, u32),
    pub show_hud: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            viewport: (crate::consts::WINDOW_WIDTH, crate::consts::WINDOW_HEIGHT),
            show_hud: true,
        }
    }
}

/// What happened during a frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    /// Score after the frame's simulation steps
    pub score: usize,
    pub events: Vec<GameEvent>,
}

/// Run one frame: update `state` from `input` and draw it through `renderer`
pub fn run_frame<R: CubeRenderer>(
    state: &mut GameState,
    renderer: &mut R,
    input: &TickInput,
    options: &FrameOptions,
) -> Result<FrameReport, R::Error> {
    let mut events = Vec::new();

    renderer.clear();
    let camera = StackCamera::new(state.current_layer());
    renderer.set_view(camera.view_matrix());
    renderer.set_projection(StackCamera::projection_matrix());

    state.advance_clock(input.time);

    for cube in state.stack() {
        renderer.draw_cube(Mat4::from_translation(cube.position()), colors::STACK);
    }

    if let (Some(position), Some(alignment)) = (state.active_cube(), state.active_alignment()) {
        renderer.draw_cube(
            Mat4::from_translation(position),
            colors::for_alignment(alignment),
        );
    }

    events.extend(state.apply_drop(input.drop_held));

    state.advance_fall();
    if let Some(position) = state.falling_cube() {
        renderer.draw_cube(Mat4::from_translation(position), colors::FALLING);
    }
    events.extend(state.finish_fall());

    let score = state.score();
    if options.show_hud {
        hud::draw_score(renderer, score as i64, options.viewport);
    }

    renderer.present()?;

    Ok(FrameReport { score, events })
}

/// Window caption for `score`
pub fn window_title(score: usize) -> String {
    format!("{WINDOW_TITLE} - Score: {score}")
}

/// Remembers the last score shown in the caption
#[derive(Debug, Default)]
pub struct TitleTracker {
    shown: Option<usize>,
}

impl TitleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// New caption if the score changed since the last call
    pub fn update(&mut self, score: usize) -> Option<String> {
        if self.shown == Some(score) {
            return None;
        }
        self.shown = Some(score);
        Some(window_title(score))
    }
}
