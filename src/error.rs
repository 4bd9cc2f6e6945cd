//! Startup and settings errors
//!
//! Nothing in the simulation can fail; these cover the platform and GPU
//! setup that happens before the first frame, plus settings loading.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure while bringing up the window or GPU
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create event loop")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create rendering surface")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
