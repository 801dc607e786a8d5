use anyhow::Result;

use ember_engine::core::{App, AppControl, FrameCtx};
use ember_engine::device::{Canvas, GpuInit};
use ember_engine::logging::{LoggingConfig, init_logging};
use ember_engine::paint::Color;
use ember_engine::platform::winit::{WinitPlatform, WinitWindow};
use ember_engine::window::{Runtime, WindowConfig};

/// Leaves drawing to the driver's clear and reports the frame rate once per
/// second. Close the window to exit.
struct ClearDemo {
    elapsed: f32,
    frames: u32,
}

impl App<WinitWindow> for ClearDemo {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, Canvas<'_>>) -> Result<AppControl> {
        self.elapsed += ctx.time.dt;
        self.frames += 1;

        if self.elapsed >= 1.0 {
            log::info!(
                "{} frames over {:.2}s ({}x{})",
                self.frames,
                self.elapsed,
                ctx.canvas.size.width,
                ctx.canvas.size.height
            );
            self.elapsed = 0.0;
            self.frames = 0;
        }

        Ok(AppControl::Continue)
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let platform = WinitPlatform::init(GpuInit::default())?;
    let runtime = Runtime::new(platform);

    let config = WindowConfig {
        title: "ember demo".to_string(),
        width: 1280,
        height: 720,
        clear: Color::rgb(0.08, 0.02, 0.10),
    };

    runtime.run(&config, ClearDemo {
        elapsed: 0.0,
        frames: 0,
    })?;

    Ok(())
}
