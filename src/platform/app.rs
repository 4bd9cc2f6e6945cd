//! winit application handler driving the frame loop

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use super::clock::Clock;
use super::input::{InputAction, InputState};
use crate::consts::*;
use crate::error::InitError;
use crate::frame::{FrameOptions, TitleTracker, run_frame};
use crate::renderer::CubeRenderState;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput};

/// Window, GPU state and game, created on first resume
struct Running {
    window: Arc<Window>,
    render_state: CubeRenderState,
}

/// The game as a winit application
pub struct StackerApp {
    settings: Settings,
    state: GameState,
    input: InputState,
    clock: Clock,
    titles: TitleTracker,
    running: Option<Running>,
    error: Option<InitError>,
}

impl StackerApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: GameState::new(),
            input: InputState::default(),
            clock: Clock::start(),
            titles: TitleTracker::new(),
            running: None,
            error: None,
        }
    }

    /// Startup failure that stopped the loop, if any
    pub fn take_error(&mut self) -> Option<InitError> {
        self.error.take()
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<Running, InitError> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);
        log::info!("Window created: {}x{}", WINDOW_WIDTH, WINDOW_HEIGHT);

        let render_state = pollster::block_on(CubeRenderState::new(window.clone(), &self.settings))?;
        Ok(Running {
            window,
            render_state,
        })
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        if self.input.handle_key(code, event.state) == Some(InputAction::Close)
            && self.input.close_requested
        {
            log::info!("Escape pressed, closing");
            event_loop.exit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let input = TickInput {
            time: self.clock.now(),
            drop_held: self.input.drop_held,
        };
        let options = FrameOptions {
            viewport: running.render_state.size,
            show_hud: self.settings.show_hud,
        };

        match run_frame(&mut self.state, &mut running.render_state, &input, &options) {
            Ok(report) => {
                for event in &report.events {
                    log_event(event);
                }
                if self.settings.score_in_title {
                    if let Some(title) = self.titles.update(report.score) {
                        running.window.set_title(&title);
                    }
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                running.render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Placed { layer, x, alignment } => {
            log::debug!("Placed layer {} at x={:.3} ({:?})", layer, x, alignment);
        }
        GameEvent::Missed { layer, x, offset } => {
            log::debug!("Missed layer {} at x={:.3}, offset {:.3}", layer, x, offset);
        }
        GameEvent::Reset { final_score } => {
            log::info!("Game over, final score {}", final_score);
        }
    }
}

impl ApplicationHandler for StackerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("Startup failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.input.close_requested = true;
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event,
                is_synthetic: false,
                ..
            } => self.on_key(event_loop, &event),
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::Resized(size) => {
                if let Some(running) = self.running.as_mut() {
                    running.render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }
}
