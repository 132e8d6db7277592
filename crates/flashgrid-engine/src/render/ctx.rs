use winit::dpi::PhysicalSize;

/// Device handles plus the framebuffer the current frame renders into.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Physical pixels. Zero while the window is minimized.
    pub framebuffer: PhysicalSize<u32>,
}

impl<'a> RenderCtx<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue, framebuffer: PhysicalSize<u32>) -> Self {
        Self {
            device,
            queue,
            framebuffer,
        }
    }

    /// Viewport covering the whole framebuffer, never smaller than 1x1.
    pub fn full_viewport(&self) -> [f32; 2] {
        viewport_extent(self.framebuffer)
    }
}

fn viewport_extent(size: PhysicalSize<u32>) -> [f32; 2] {
    [size.width.max(1) as f32, size.height.max(1) as f32]
}

/// Encoder and swap chain view for the frame being recorded.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_matches_framebuffer() {
        assert_eq!(viewport_extent(PhysicalSize::new(600, 400)), [600.0, 400.0]);
    }

    #[test]
    fn minimized_framebuffer_keeps_unit_viewport() {
        assert_eq!(viewport_extent(PhysicalSize::new(0, 0)), [1.0, 1.0]);
    }
}
