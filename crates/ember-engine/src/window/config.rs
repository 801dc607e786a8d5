use crate::paint::Color;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,

    /// Initial logical width in pixels.
    pub width: u32,

    /// Initial logical height in pixels.
    pub height: u32,

    /// Color the framebuffer is cleared to at the start of every frame.
    pub clear: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ember".to_string(),
            width: 1280,
            height: 720,
            clear: Color::BLACK,
        }
    }
}
