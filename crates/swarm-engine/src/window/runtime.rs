use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::render::{FrameOutcome, InstancedCircleRenderer, RendererConfig};

use super::status::StatusLine;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Presented frames between status line refreshes.
    pub status_interval: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "swarm".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            status_interval: 30,
        }
    }
}

/// Entry point for the runtime.
///
/// Initializes the renderer exactly once when the window appears and renders
/// one frame per redraw. If init fails, no frame is ever rendered and the
/// error is returned once the event loop exits.
pub struct Runtime;

impl Runtime {
    pub fn run(config: RuntimeConfig, renderer: RendererConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, renderer);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    status: StatusLine,

    window: Window,

    #[borrows(window)]
    #[covariant]
    renderer: InstancedCircleRenderer<'this>,
}

struct AppState {
    config: RuntimeConfig,
    renderer_config: RendererConfig,
    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, renderer_config: RendererConfig) -> Self {
        Self {
            config,
            renderer_config,
            entry: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.entry = None;
        event_loop.exit();
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let renderer_config = self.renderer_config.clone();
        let entry = WindowEntry::try_new(
            StatusLine::new(self.config.title.clone(), self.config.status_interval),
            window,
            |w| pollster::block_on(InstancedCircleRenderer::init(w, renderer_config)),
        )
        .context("failed to initialize renderer")?;

        Ok(entry)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let result = entry.with_mut(|fields| {
            let outcome = fields.renderer.render()?;
            if let FrameOutcome::Presented(stats) = outcome {
                if let Some(line) = fields.status.record(&stats) {
                    log::debug!("{line}");
                    fields.window.set_title(&line);
                }
            }
            // Re-arm for the next frame.
            fields.window.request_redraw();
            Ok::<_, crate::RendererError>(())
        });

        if let Err(err) = result {
            self.fail(event_loop, anyhow::Error::new(err).context("frame failed"));
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.failure.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        match self.create_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_renderer_mut(|r| r.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_renderer_mut(|r| r.resize(new_size));
                }
            }

            WindowEvent::Occluded(false) => {
                // Hidden time should not turn into one big simulation step.
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_renderer_mut(|r| r.reset_clock());
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
