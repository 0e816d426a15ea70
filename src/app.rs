use std::ffi::OsString;
use std::sync::Arc;

use futures::executor::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::camera::CameraDolly;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::image_loader::{load_rgb_image, SourceImage};
use crate::input::{action_for_key, KeyAction};
use crate::renderer::Renderer;

struct RunningState {
    window: Arc<Window>,
    renderer: Renderer<'static>,
    camera: CameraDolly,
}

struct App {
    config: DemoConfig,
    image: SourceImage,
    state: Option<RunningState>,
    /// First fatal error seen inside the event loop, returned from `run`.
    error: Option<DemoError>,
}

impl App {
    fn new(config: DemoConfig, image: SourceImage) -> Self {
        Self {
            config,
            image,
            state: None,
            error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<RunningState, DemoError> {
        let window_config = &self.config.window;
        let attributes = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.size.0, window_config.size.1))
            .with_position(PhysicalPosition::new(
                window_config.position.0,
                window_config.position.1,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let window_size = window.inner_size();
        let physical_size = (window_size.width, window_size.height);
        let mut renderer = block_on(Renderer::new(
            window.clone(),
            physical_size,
            &self.image,
            &self.config,
        ))?;
        renderer.resize(physical_size);

        Ok(RunningState {
            window,
            renderer,
            camera: CameraDolly::new(&self.config.dolly),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: DemoError) {
        tracing::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if window_id != state.window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window closed, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                state
                    .renderer
                    .resize((physical_size.width, physical_size.height));
                state.window.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if action_for_key(&event.logical_key) == KeyAction::Exit {
                    tracing::info!("Escape pressed, exiting");
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                let camera_offset = state.camera.advance();
                match state.renderer.render(camera_offset) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state.renderer.resize(state.renderer.size())
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("Surface out of memory, exiting");
                        event_loop.exit();
                    }
                    Err(e) => tracing::warn!("Skipping frame: {:?}", e),
                }
                state.window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Runs the demo until Escape is pressed or the window is closed.
///
/// `args` are the full process arguments, program name first; the image path is
/// the one after it. The image is decoded before any window is opened, so a bad
/// path fails without showing one.
pub fn run<I>(args: I) -> Result<(), DemoError>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let config = DemoConfig::from_args(args)?;
    let image = load_rgb_image(&config.image_path)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, image);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
