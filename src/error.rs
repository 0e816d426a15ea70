use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that end the program. `main` prints the message and exits
/// with a non-zero status; nothing below the entry point terminates the process.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Please specify the image file name as the first program argument")]
    MissingImageArgument,
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// The file could not be opened, or its contents are not a supported image.
    #[error("Unable to read image: {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The file decoded to an image with no pixels.
    #[error("Unable to read image: {}", path.display())]
    Empty { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}
