use crate::time::FrameTime;

/// Context passed to [`App::frame`](super::App::frame) once per frame.
///
/// `C` is the backend's drawing handle; for the winit/wgpu backend it is
/// [`Canvas`](crate::device::Canvas), which carries the encoder and target
/// view of the already-cleared frame.
pub struct FrameCtx<'a, C> {
    pub canvas: &'a mut C,
    pub time: FrameTime,
}
