//! Platform seam between the runtime loop and the windowing backend.
//!
//! The production backend lives in [`winit`] and pairs a winit event loop in
//! pump mode with a wgpu surface. Tests drive the runtime through scripted
//! implementations of these traits instead.

pub mod winit;

use crate::core::{AppControl, FrameCtx};
use crate::error::RuntimeResult;
use crate::paint::Color;
use crate::time::FrameTime;
use crate::window::WindowConfig;

/// Outcome of one driven frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The frame ran the callback and was presented.
    Presented,
    /// The callback asked to stop; the completed frame was still presented.
    Exit,
    /// Transient surface problem; the callback was not invoked.
    Skipped,
}

/// A window together with its graphics context.
///
/// The handle owns everything needed to clear, draw and present one frame,
/// and carries the close flag the runtime polls each iteration.
pub trait PlatformWindow {
    /// Drawing handle lent to the frame callback.
    type Canvas<'c>;

    /// True once the platform (or a previous frame) requested closing.
    fn close_requested(&self) -> bool;

    /// Clears the framebuffer, invokes `frame`, then presents.
    ///
    /// A callback error aborts the frame without presenting it and is
    /// reported as [`RuntimeError::Frame`](crate::error::RuntimeError).
    fn render_frame<'a>(
        &mut self,
        clear: Color,
        time: FrameTime,
        frame: &'a mut dyn FnMut(&mut FrameCtx<'_, Self::Canvas<'_>>) -> anyhow::Result<AppControl>,
    ) -> RuntimeResult<FrameOutcome>
    where
        Self: 'a;
}

/// Process-wide windowing state.
///
/// Construction is the backend's `initialize()`; `terminate` consumes the
/// platform so release can happen at most once.
pub trait Platform {
    type Window: PlatformWindow;

    fn create_window(&mut self, config: &WindowConfig) -> RuntimeResult<Self::Window>;

    /// Dispatches pending platform events for `window`.
    ///
    /// Expected to return promptly; the runtime calls this once per loop
    /// iteration before evaluating the close flag.
    fn poll_events(&mut self, window: &mut Self::Window);

    /// Releases process-wide platform state.
    fn terminate(self);
}
