//! GPU device + surface management.
//!
//! Responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames, recording the clear pass and presenting

mod canvas;
mod gpu;

pub use canvas::Canvas;
pub use gpu::{Frame, Gpu, GpuInit, SurfaceErrorAction};
