use winit::dpi::PhysicalSize;

/// Drawing handle lent to the frame callback for a single frame.
///
/// The target has already been cleared when the callback runs. Commands
/// recorded through `encoder` against `view` are submitted and presented
/// after the callback returns successfully; nothing is presented if the
/// callback fails.
pub struct Canvas<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
    pub format: wgpu::TextureFormat,

    /// Drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
}
