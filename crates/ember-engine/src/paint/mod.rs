//! Color values used for framebuffer clears.

mod color;

pub use color::Color;
