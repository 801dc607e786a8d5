//! Window configuration and the render-loop runtime.

mod config;
mod lifecycle;
mod runtime;

pub use config::WindowConfig;
pub use lifecycle::Lifecycle;
pub use runtime::Runtime;
