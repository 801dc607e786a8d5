//! Ember engine crate.
//!
//! A windowed render-loop driver: owns the platform window + GPU surface and
//! drives a caller-supplied frame callback until the window is closed.

pub mod core;
pub mod device;
pub mod platform;
pub mod window;
pub mod time;

pub mod error;
pub mod logging;
pub mod paint;
