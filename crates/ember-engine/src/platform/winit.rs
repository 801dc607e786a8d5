//! Desktop backend: winit event loop in pump mode + wgpu surface.
//!
//! The event loop is pumped with a zero timeout from `poll_events`, which
//! leaves the driver in control of the loop instead of handing it to winit.
//! Supported on the desktop platforms where `pump_app_events` is available.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::core::{AppControl, FrameCtx};
use crate::device::{Canvas, Gpu, GpuInit, SurfaceErrorAction};
use crate::error::{RuntimeError, RuntimeResult};
use crate::paint::Color;
use crate::platform::{FrameOutcome, Platform, PlatformWindow};
use crate::time::FrameTime;
use crate::window::WindowConfig;

/// Pump timeout while waiting for the first `resumed` during window creation.
const BOOTSTRAP_PUMP: Duration = Duration::from_millis(10);

/// Process-wide winit state.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    gpu_init: GpuInit,
}

impl WinitPlatform {
    /// Acquires the process-wide windowing state.
    pub fn init(gpu_init: GpuInit) -> RuntimeResult<Self> {
        let event_loop = EventLoop::new()
            .map_err(|e| RuntimeError::Init(anyhow::Error::new(e)))?;
        Ok(Self {
            event_loop,
            gpu_init,
        })
    }
}

impl Platform for WinitPlatform {
    type Window = WinitWindow;

    fn create_window(&mut self, config: &WindowConfig) -> RuntimeResult<WinitWindow> {
        let mut bootstrap = Bootstrap {
            config,
            gpu_init: &self.gpu_init,
            result: None,
        };

        // Window creation must happen inside the loop, after `resumed`.
        // Keep pumping until the bootstrap handler produced a result.
        loop {
            if let Some(result) = bootstrap.result.take() {
                return result;
            }

            match self
                .event_loop
                .pump_app_events(Some(BOOTSTRAP_PUMP), &mut bootstrap)
            {
                PumpStatus::Exit(code) => {
                    return Err(RuntimeError::WindowCreation(anyhow!(
                        "event loop exited with code {code} before a window was created"
                    )));
                }
                PumpStatus::Continue => {}
            }
        }
    }

    fn poll_events(&mut self, window: &mut WinitWindow) {
        let mut pump = EventPump {
            window: &mut *window,
        };

        match self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut pump)
        {
            // The loop going away counts as a platform close request.
            PumpStatus::Exit(_) => window.close_requested = true,
            PumpStatus::Continue => {}
        }
    }

    fn terminate(self) {
        log::info!("windowing platform terminated");
    }
}

/// One-shot handler that creates the window + GPU context on `resumed`.
struct Bootstrap<'a> {
    config: &'a WindowConfig,
    gpu_init: &'a GpuInit,
    result: Option<RuntimeResult<WinitWindow>>,
}

impl ApplicationHandler for Bootstrap<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.result.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ));

        let built = event_loop
            .create_window(attrs)
            .map_err(|e| RuntimeError::WindowCreation(anyhow::Error::new(e)))
            .and_then(|window| {
                let window = Arc::new(window);
                let gpu = pollster::block_on(Gpu::new(window.clone(), self.gpu_init.clone()))
                    .map_err(RuntimeError::WindowCreation)?;
                Ok(WinitWindow {
                    window,
                    gpu,
                    close_requested: false,
                })
            });

        self.result = Some(built);
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

/// Handler used for the per-iteration event pump.
struct EventPump<'a> {
    window: &'a mut WinitWindow,
}

impl ApplicationHandler for EventPump<'_> {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if window_id != self.window.window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.window.close_requested = true,

            WindowEvent::Resized(new_size) => self.window.gpu.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self.window.window.inner_size();
                self.window.gpu.resize(new_size);
            }

            // Frames are driven unconditionally by the runtime loop.
            _ => {}
        }
    }
}

/// Window plus its GPU surface, created by [`WinitPlatform::create_window`].
pub struct WinitWindow {
    window: Arc<Window>,
    gpu: Gpu,
    close_requested: bool,
}

impl PlatformWindow for WinitWindow {
    type Canvas<'c> = Canvas<'c>;

    fn close_requested(&self) -> bool {
        self.close_requested
    }

    fn render_frame<'a>(
        &mut self,
        clear: Color,
        time: FrameTime,
        frame: &'a mut dyn FnMut(&mut FrameCtx<'_, Canvas<'_>>) -> anyhow::Result<AppControl>,
    ) -> RuntimeResult<FrameOutcome>
    where
        Self: 'a,
    {
        let mut acquired = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        Err(RuntimeError::Device(anyhow!("surface ran out of memory")))
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::warn!("surface unavailable, skipping frame {}", time.frame_index);
                        Ok(FrameOutcome::Skipped)
                    }
                };
            }
        };

        self.gpu.clear(&mut acquired, clear);

        // Canvas borrows the acquired frame; dropped before present().
        let control = {
            let mut canvas = Canvas {
                device: self.gpu.device(),
                queue: self.gpu.queue(),
                encoder: &mut acquired.encoder,
                view: &acquired.view,
                format: self.gpu.surface_format(),
                size: self.gpu.size(),
            };
            let mut ctx = FrameCtx {
                canvas: &mut canvas,
                time,
            };
            frame(&mut ctx)
        };

        match control {
            Ok(control) => {
                self.window.pre_present_notify();
                self.gpu.present(acquired);
                Ok(match control {
                    AppControl::Continue => FrameOutcome::Presented,
                    AppControl::Exit => FrameOutcome::Exit,
                })
            }
            // The acquired texture is dropped unpresented; teardown follows.
            Err(err) => Err(RuntimeError::Frame(err)),
        }
    }
}
