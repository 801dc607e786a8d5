use anyhow::Result;

use crate::platform::PlatformWindow;

use super::ctx::FrameCtx;

/// Control directive returned by the frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Per-frame application contract.
///
/// The driver clears the framebuffer before `frame` runs and presents it
/// after `frame` returns `Ok`. An `Err` stops the loop; teardown completes
/// before the error reaches the caller of `run`.
pub trait App<W: PlatformWindow> {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, W::Canvas<'_>>) -> Result<AppControl>;
}

/// Adapter that lets a closure serve as the frame callback.
pub struct FnApp<F>(pub F);

impl<W, F> App<W> for FnApp<F>
where
    W: PlatformWindow,
    F: FnMut(&mut FrameCtx<'_, W::Canvas<'_>>) -> Result<AppControl>,
{
    fn frame(&mut self, ctx: &mut FrameCtx<'_, W::Canvas<'_>>) -> Result<AppControl> {
        (self.0)(ctx)
    }
}
