//! Caller-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform
//! loop) and application code: the per-frame callback trait and the context
//! it receives. Runtime internals are not leaked through these types.

mod app;
mod ctx;

pub use app::{App, AppControl, FnApp};
pub use ctx::FrameCtx;
